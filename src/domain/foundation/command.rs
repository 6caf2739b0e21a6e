//! Command infrastructure for application handlers.
//!
//! `CommandMetadata` is the context that flows through command processing:
//! which partner's device issued the command and an optional correlation id
//! that ends up on every log line the handler emits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::quiz::Partner;

/// Metadata context for command handlers.
///
/// # Example
///
/// ```ignore
/// let metadata = CommandMetadata::new(Partner::One).with_correlation_id("req-42");
/// handler.handle(cmd, metadata).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The partner whose device issued the command. Relayed actions are
    /// tagged with this sender so the device can skip its own echoes.
    pub sender: Partner,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    pub fn new(sender: Partner) -> Self {
        Self {
            sender,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if absent.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}
