//! Relay Adapters
//!
//! Implementations of the ActionRelay port.
//!
//! - **BroadcastRelay** - In-process rooms on tokio broadcast channels

mod broadcast_relay;

pub use broadcast_relay::{BroadcastRelay, DEFAULT_ROOM_CAPACITY};
