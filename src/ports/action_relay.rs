//! Action relay port - mirrors game actions between the partners' devices.
//!
//! Each session is a room. Both devices subscribe to the room and publish
//! every action they perform locally; receivers skip envelopes they sent
//! themselves.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::warn;

use crate::domain::foundation::SessionId;
use crate::domain::game::{ActionEnvelope, GameError};

/// Errors raised by relay adapters.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Relay is closed")]
    Closed,

    #[error("Relay transport failed: {0}")]
    Transport(String),
}

impl From<RelayError> for GameError {
    fn from(err: RelayError) -> Self {
        GameError::Infrastructure(err.to_string())
    }
}

/// Receiving end of a room subscription.
pub struct ActionSubscription {
    session_id: SessionId,
    receiver: broadcast::Receiver<ActionEnvelope>,
}

impl ActionSubscription {
    pub fn new(session_id: SessionId, receiver: broadcast::Receiver<ActionEnvelope>) -> Self {
        Self {
            session_id,
            receiver,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Waits for the next envelope.
    ///
    /// A subscriber that falls behind skips the dropped envelopes and keeps
    /// receiving. Returns `None` once the room is closed.
    pub async fn recv(&mut self) -> Option<ActionEnvelope> {
        loop {
            match self.receiver.recv().await {
                Ok(envelope) => return Some(envelope),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(session = %self.session_id, skipped, "Relay subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next envelope if one is already queued.
    pub fn try_recv(&mut self) -> Option<ActionEnvelope> {
        loop {
            match self.receiver.try_recv() {
                Ok(envelope) => return Some(envelope),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(session = %self.session_id, skipped, "Relay subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }
}

/// Port for broadcasting game actions to a session room.
#[async_trait]
pub trait ActionRelay: Send + Sync {
    /// Publish an envelope to its session room.
    ///
    /// Returns the number of subscribers it was delivered to. Publishing to
    /// a room nobody has joined is not an error.
    async fn publish(&self, envelope: ActionEnvelope) -> Result<usize, RelayError>;

    /// Join a session room.
    async fn subscribe(&self, session_id: &SessionId) -> Result<ActionSubscription, RelayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::GameAction;
    use crate::domain::quiz::Partner;

    #[test]
    fn action_relay_is_object_safe() {
        fn _accepts_dyn(_relay: &dyn ActionRelay) {}
    }

    #[tokio::test]
    async fn subscription_skips_lagged_envelopes() {
        let session_id = SessionId::new();
        let (tx, rx) = broadcast::channel(2);
        let mut subscription = ActionSubscription::new(session_id, rx);

        for _ in 0..3 {
            tx.send(ActionEnvelope::new(session_id, Partner::One, GameAction::RoundTwoUnlocked))
                .unwrap();
        }

        assert!(subscription.recv().await.is_some());
        assert!(subscription.try_recv().is_some());
        assert!(subscription.try_recv().is_none());
    }

    #[tokio::test]
    async fn subscription_ends_when_room_closes() {
        let session_id = SessionId::new();
        let (tx, rx) = broadcast::channel(4);
        let mut subscription = ActionSubscription::new(session_id, rx);
        drop(tx);
        assert!(subscription.recv().await.is_none());
    }
}
