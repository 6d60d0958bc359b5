//! Credential store: user creation and password verification over the users table.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::password::Argon2Hasher;
use crate::db::{user_insert, user_password_hash, DbPool};
use crate::error::AppResult;

/// Outcome of [`CredentialStore::create_user`]. Storage faults come back as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUser {
    Created,
    DuplicateEmail,
}

/// Owns persisted user identity and password verification.
#[derive(Clone)]
pub struct CredentialStore {
    db: DbPool,
    hasher: Argon2Hasher,
    decoy_hash: Arc<str>,
}

impl CredentialStore {
    /// Computes a decoy hash once so unknown emails cost as much as wrong passwords.
    pub async fn new(db: DbPool, hasher: Argon2Hasher) -> AppResult<Self> {
        let decoy_hash = hasher
            .hash_blocking(Uuid::new_v4().simple().to_string())
            .await?;
        Ok(Self {
            db,
            hasher,
            decoy_hash: decoy_hash.into(),
        })
    }

    pub fn db(&self) -> &DbPool {
        &self.db
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AppResult<CreateUser> {
        let password_hash = self.hasher.hash_blocking(password.to_owned()).await?;
        if user_insert(&self.db, username, email, &password_hash).await? {
            debug!(%username, "user created");
            Ok(CreateUser::Created)
        } else {
            Ok(CreateUser::DuplicateEmail)
        }
    }

    /// `true` iff `password` matches the stored hash for `email`. Unknown emails are `false`.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> AppResult<bool> {
        let (stored, known) = match user_password_hash(&self.db, email).await? {
            Some(hash) => (hash, true),
            None => (self.decoy_hash.to_string(), false),
        };
        let matched = self
            .hasher
            .verify_blocking(password.to_owned(), stored)
            .await?;
        Ok(known && matched)
    }
}
