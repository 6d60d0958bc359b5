//! Session storage backends.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::Session;

/// Keyed storage for live sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, id: &str, session: Session) -> AppResult<()>;
    async fn get(&self, id: &str) -> AppResult<Option<Session>>;
    async fn remove(&self, id: &str) -> AppResult<()>;
    /// Drop every session expired at `now`; returns how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<usize>;
}

/// Single-node in-process store. Sessions do not survive a restart.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, id: &str, session: Session) -> AppResult<()> {
        self.sessions.write().await.insert(id.to_string(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &str) -> AppResult<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn insert_get_remove() {
        let store = MemorySessionStore::new();
        let session = Session::new("alice@x.com", Duration::minutes(5));
        store.insert("abc", session.clone()).await.unwrap();
        assert_eq!(store.get("abc").await.unwrap(), Some(session));
        store.remove("abc").await.unwrap();
        assert_eq!(store.get("abc").await.unwrap(), None);
        store.remove("abc").await.unwrap();
    }

    #[tokio::test]
    async fn purge_keeps_live_sessions() {
        let store = MemorySessionStore::new();
        store
            .insert("old", Session::new("a@x.com", Duration::seconds(1)))
            .await
            .unwrap();
        store
            .insert("new", Session::new("b@x.com", Duration::hours(1)))
            .await
            .unwrap();

        let removed = store
            .purge_expired(Utc::now() + Duration::seconds(2))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("new").await.unwrap().is_some());
    }
}
