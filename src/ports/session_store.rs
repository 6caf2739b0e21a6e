//! Session store port.
//!
//! Defines the contract for persisting and retrieving `GameSession`
//! aggregates between handler invocations.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::game::{GameError, GameSession};

/// Errors raised by session store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode session snapshot: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => GameError::NotFound(id),
            other => GameError::Infrastructure(other.to_string()),
        }
    }
}

/// Port for game session persistence.
///
/// `save` is an upsert: saving an existing session overwrites it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert or replace a session.
    async fn save(&self, session: &GameSession) -> Result<(), StoreError>;

    /// Find a session by id. Returns `None` if not found.
    async fn load(&self, id: &SessionId) -> Result<Option<GameSession>, StoreError>;

    /// Check if a session exists.
    async fn exists(&self, id: &SessionId) -> Result<bool, StoreError>;

    /// Remove a session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;
}
