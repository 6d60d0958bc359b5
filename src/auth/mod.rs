//! Credential store and the auth form handlers built on it.

mod handlers;
mod password;
mod service;

pub use handlers::{login, login_form, logout, register, register_form};
pub use password::Argon2Hasher;
pub use service::{CreateUser, CredentialStore};
