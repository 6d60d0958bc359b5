//! Auth HTTP handlers: register, login, logout.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, info};

use super::service::CreateUser;
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::auth::{clear_session_cookie, session_cookie, CurrentSession};
use crate::models::{
    username_from_email, LoginForm, RegisterForm, MSG_EMAIL_TAKEN, MSG_INVALID_CREDENTIALS,
};
use crate::views;

/// GET /login
pub async fn login_form() -> Html<String> {
    Html(views::login(""))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    current: CurrentSession,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let form = match form.check() {
        Ok(form) => form,
        Err(msg) => return Ok(Html(views::login(msg)).into_response()),
    };

    if !state
        .credentials()
        .authenticate_user(&form.email, &form.password)
        .await?
    {
        debug!("login rejected");
        return Ok(Html(views::login(MSG_INVALID_CREDENTIALS)).into_response());
    }

    let jar = start_session(&state, current, jar, &form.email).await?;
    info!(username = username_from_email(&form.email), "logged in");
    Ok((jar, Redirect::to("/private")).into_response())
}

/// GET /register
pub async fn register_form() -> Html<String> {
    Html(views::register(""))
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    current: CurrentSession,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let form = match form.check() {
        Ok(form) => form,
        Err(msg) => return Ok(Html(views::register(msg)).into_response()),
    };

    let username = username_from_email(&form.email);
    match state
        .credentials()
        .create_user(username, &form.email, &form.password)
        .await?
    {
        CreateUser::Created => {}
        CreateUser::DuplicateEmail => {
            return Ok(Html(views::register(MSG_EMAIL_TAKEN)).into_response());
        }
    }

    let jar = start_session(&state, current, jar, &form.email).await?;
    info!(%username, "registered");
    Ok((jar, Redirect::to("/private")).into_response())
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentSession,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(token) = current.token.as_deref() {
        state.sessions().destroy(token).await?;
    }
    Ok((clear_session_cookie(jar), Redirect::to("/")))
}

/// Replace whatever session the client carried with a fresh one for `email`.
async fn start_session(
    state: &AppState,
    current: CurrentSession,
    jar: CookieJar,
    email: &str,
) -> Result<CookieJar, AppError> {
    if let Some(old) = current.token.as_deref() {
        state.sessions().destroy(old).await?;
    }
    let token = state.sessions().create(email).await?;
    Ok(jar.add(session_cookie(token, state.secure_cookies)))
}
