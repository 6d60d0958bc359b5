//! Session extractors: the typed request context for the session gate.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::Session;

pub const SESSION_COOKIE: &str = "credgate_session";

/// Session cookie carrying a signed token. Lives as long as the browser session;
/// the server enforces the real expiry.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Extractor: the raw session token (if sent) and the live session it maps to.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub token: Option<String>,
    pub session: Option<Session>,
}

impl CurrentSession {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
        let session = match token.as_deref() {
            Some(t) => state.sessions().resolve(t).await?,
            None => None,
        };
        Ok(CurrentSession { token, session })
    }
}

/// Extractor: an authenticated session. Anonymous requests are redirected to `/login`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentSession::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        match current.session {
            Some(session) => Ok(AuthUser(session)),
            None => {
                debug!(path = %parts.uri.path(), "anonymous request to protected route");
                Err(Redirect::to("/login").into_response())
            }
        }
    }
}
