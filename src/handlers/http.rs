//! HTTP handlers: public pages, the protected page, health.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde_json::json;

use crate::auth::CredentialStore;
use crate::middleware::AuthUser;
use crate::services::SessionService;
use crate::views;

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub sessions: SessionService,
    /// Mark session cookies `Secure` (production posture).
    pub secure_cookies: bool,
}

impl AppState {
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }
}

/// GET /
pub async fn home() -> Html<String> {
    Html(views::home())
}

/// GET /private — only reachable with a live session.
pub async fn private(AuthUser(session): AuthUser) -> Html<String> {
    Html(views::private(session.username()))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::not_found()))
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "credgate" })),
    )
}
