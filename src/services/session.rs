//! Session lifecycle: create on sign-in, resolve per request, destroy on logout.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::signer::SessionSigner;
use super::store::SessionStore;
use crate::error::AppResult;
use crate::models::Session;

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    signer: SessionSigner,
    ttl: Duration,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, secret: &str, ttl: Duration) -> Self {
        Self {
            store,
            signer: SessionSigner::new(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a new session for `email` and return its signed token.
    pub async fn create(&self, email: &str) -> AppResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.store.insert(&id, Session::new(email, self.ttl)).await?;
        self.signer.sign(&id)
    }

    /// Look up the live session behind a cookie token. Expired sessions are dropped.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<Session>> {
        let Some(id) = self.signer.verify(token)? else {
            debug!("rejected session token with bad signature");
            return Ok(None);
        };
        match self.store.get(id).await? {
            Some(session) if session.is_expired_at(Utc::now()) => {
                self.store.remove(id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    pub async fn destroy(&self, token: &str) -> AppResult<()> {
        if let Some(id) = self.signer.verify(token)? {
            self.store.remove(id).await?;
        }
        Ok(())
    }

    /// Periodically purge expired sessions from the store.
    pub fn spawn_sweeper(&self, every: std::time::Duration) -> JoinHandle<()> {
        let store = self.store.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                match store.purge_expired(Utc::now()).await {
                    Ok(0) => {}
                    Ok(removed) => debug!(removed, "purged expired sessions"),
                    Err(e) => warn!(error = %e, "session purge failed"),
                }
            }
        })
    }
}
