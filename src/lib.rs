//! Credential store and session-gated access control.
//!
//! Users register with an email and password (stored as a salted Argon2id hash in
//! SQLite), log in to obtain a server-side session, and reach `/private` only while
//! that session is live.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod views;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::get;
use handlers::http;
use tower_http::trace::TraceLayer;

/// Build the router. Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(http::home))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/private", get(http::private))
        .route("/logout", get(auth::logout))
        .route("/health", get(http::health))
        .fallback(http::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
