//! In-Memory Session Store Adapter
//!
//! Keeps game sessions in a map behind a tokio `RwLock`.
//! Useful for tests and single-process play.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::game::GameSession;
use crate::ports::{SessionStore, StoreError};

/// In-memory storage for game sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, GameSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every session (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &GameSession) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn load(&self, id: &SessionId) -> Result<Option<GameSession>, StoreError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, StoreError> {
        Ok(self.sessions.read().await.contains_key(id))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*id))
    }
}
