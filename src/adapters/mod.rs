//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Session stores (in-memory, YAML files)
//! - `relay` - Action relay rooms (tokio broadcast)

pub mod relay;
pub mod storage;

pub use relay::BroadcastRelay;
pub use storage::{FileSessionStore, InMemorySessionStore};
