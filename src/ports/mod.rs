//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Game session persistence
//! - `ActionRelay` - Mirrors game actions to the other partner's device

mod action_relay;
mod session_store;

pub use action_relay::{ActionRelay, ActionSubscription, RelayError};
pub use session_store::{SessionStore, StoreError};
