//! Server-side session bound to a verified email.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Display name shown on the private page.
    pub fn username(&self) -> &str {
        username_from_email(&self.email)
    }
}

/// Local part of an email (everything before the first `@`).
pub fn username_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
