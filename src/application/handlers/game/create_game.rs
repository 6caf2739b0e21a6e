//! CreateGameHandler - Command handler for starting a new game session.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::game::{GameError, GameSession};
use crate::ports::SessionStore;

/// Command to create a game for two partners.
#[derive(Debug, Clone)]
pub struct CreateGameCommand {
    pub partner_one: String,
    pub partner_two: String,
}

/// Result of successful game creation.
#[derive(Debug, Clone)]
pub struct CreateGameResult {
    pub session: GameSession,
}

/// Handler for creating game sessions.
pub struct CreateGameHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateGameHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: CreateGameCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateGameResult, GameError> {
        let session = GameSession::new(SessionId::new(), cmd.partner_one, cmd.partner_two)?;
        self.store.save(&session).await?;

        info!(
            session = %session.id(),
            correlation_id = %metadata.correlation_id(),
            "Game created"
        );
        Ok(CreateGameResult { session })
    }
}
