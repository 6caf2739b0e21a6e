//! In-process action relay built on tokio broadcast channels.
//!
//! Rooms are organized by session ID; every device playing a session joins
//! its room and receives every action published there.
//!
//! ```text
//! Room: session-123    Room: session-456
//! ├── partner one      ├── partner one
//! └── partner two      └── partner two
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, trace};

use crate::domain::foundation::SessionId;
use crate::domain::game::ActionEnvelope;
use crate::ports::{ActionRelay, ActionSubscription, RelayError};

/// Default buffer size for each room's channel.
pub const DEFAULT_ROOM_CAPACITY: usize = 64;

/// Manages broadcast rooms keyed by session.
///
/// # Thread Safety
///
/// Uses `RwLock` for the room registry since publishes (reads) vastly
/// outnumber joins (writes).
pub struct BroadcastRelay {
    rooms: RwLock<HashMap<SessionId, broadcast::Sender<ActionEnvelope>>>,
    channel_capacity: usize,
}

impl BroadcastRelay {
    /// Create a relay whose rooms buffer `channel_capacity` envelopes.
    ///
    /// Subscribers that fall further behind skip the oldest envelopes.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_ROOM_CAPACITY)
    }

    /// Number of subscribers in a room (0 if the room doesn't exist).
    pub async fn subscriber_count(&self, session_id: &SessionId) -> usize {
        self.rooms
            .read()
            .await
            .get(session_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drops rooms nobody is subscribed to.
    ///
    /// Call once a game is over; `subscribe` also sweeps abandoned rooms
    /// whenever a new one is opened.
    pub async fn prune_empty_rooms(&self) -> usize {
        let mut rooms = self.rooms.write().await;
        Self::prune(&mut rooms)
    }

    fn prune(rooms: &mut HashMap<SessionId, broadcast::Sender<ActionEnvelope>>) -> usize {
        let before = rooms.len();
        rooms.retain(|_, sender| sender.receiver_count() > 0);
        let pruned = before - rooms.len();
        if pruned > 0 {
            debug!(pruned, "Pruned empty relay rooms");
        }
        pruned
    }
}

impl Default for BroadcastRelay {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl ActionRelay for BroadcastRelay {
    async fn publish(&self, envelope: ActionEnvelope) -> Result<usize, RelayError> {
        let rooms = self.rooms.read().await;
        let Some(sender) = rooms.get(&envelope.session_id) else {
            trace!(session = %envelope.session_id, "Publish to empty room");
            return Ok(0);
        };

        let session_id = envelope.session_id;
        let action = envelope.action.name();
        // A send error only means every receiver has gone away.
        let delivered = sender.send(envelope).unwrap_or(0);
        debug!(session = %session_id, action, delivered, "Action relayed");
        Ok(delivered)
    }

    async fn subscribe(&self, session_id: &SessionId) -> Result<ActionSubscription, RelayError> {
        let mut rooms = self.rooms.write().await;
        if !rooms.contains_key(session_id) {
            Self::prune(&mut rooms);
        }
        let sender = rooms.entry(*session_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });
        Ok(ActionSubscription::new(*session_id, sender.subscribe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CardId;
    use crate::domain::game::GameAction;
    use crate::domain::quiz::{Choice, Partner};

    fn answered(session_id: SessionId) -> ActionEnvelope {
        ActionEnvelope::new(
            session_id,
            Partner::One,
            GameAction::Answered {
                card_id: CardId::new(0),
                partner: Partner::One,
                choice: Choice::A,
            },
        )
    }

    #[tokio::test]
    async fn subscribers_receive_published_actions() {
        let relay = BroadcastRelay::with_default_capacity();
        let session_id = SessionId::new();
        let mut one = relay.subscribe(&session_id).await.unwrap();
        let mut two = relay.subscribe(&session_id).await.unwrap();

        let delivered = relay.publish(answered(session_id)).await.unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(one.recv().await, Some(answered(session_id)));
        assert_eq!(two.recv().await, Some(answered(session_id)));
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let relay = BroadcastRelay::with_default_capacity();
        let first = SessionId::new();
        let second = SessionId::new();
        let mut other_room = relay.subscribe(&second).await.unwrap();

        relay.publish(answered(first)).await.unwrap();

        assert!(other_room.try_recv().is_none());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_ok() {
        let relay = BroadcastRelay::with_default_capacity();
        assert_eq!(relay.publish(answered(SessionId::new())).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn dropped_subscribers_leave_prunable_rooms() {
        let relay = BroadcastRelay::with_default_capacity();
        let session_id = SessionId::new();
        let subscription = relay.subscribe(&session_id).await.unwrap();
        assert_eq!(relay.subscriber_count(&session_id).await, 1);

        drop(subscription);

        assert_eq!(relay.subscriber_count(&session_id).await, 0);
        assert_eq!(relay.prune_empty_rooms().await, 1);
        assert_eq!(relay.prune_empty_rooms().await, 0);
    }

    #[tokio::test]
    async fn opening_a_room_sweeps_abandoned_rooms() {
        let relay = BroadcastRelay::with_default_capacity();
        let finished = SessionId::new();
        let live = SessionId::new();
        drop(relay.subscribe(&finished).await.unwrap());
        let _live_sub = relay.subscribe(&live).await.unwrap();

        let _next = relay.subscribe(&SessionId::new()).await.unwrap();

        // Only the two rooms with subscribers remain.
        assert_eq!(relay.rooms.read().await.len(), 2);
        assert!(!relay.rooms.read().await.contains_key(&finished));
        assert_eq!(relay.subscriber_count(&live).await, 1);
    }
}
