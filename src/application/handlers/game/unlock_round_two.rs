//! UnlockRoundTwoHandler - Command handler for the checkout return.

use std::sync::Arc;
use tracing::info;

use super::{load_session, relay_action};
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::game::{GameAction, GameError, GameSession};
use crate::domain::paywall::CheckoutReturn;
use crate::ports::{ActionRelay, SessionStore};

/// Command carrying the outcome of a checkout.
#[derive(Debug, Clone)]
pub struct UnlockRoundTwoCommand {
    pub session_id: SessionId,
    pub outcome: CheckoutReturn,
}

/// Result of processing a checkout return.
#[derive(Debug, Clone)]
pub struct UnlockRoundTwoResult {
    pub session: GameSession,
    /// True if this command changed the session from locked to unlocked.
    pub newly_unlocked: bool,
}

/// Handler for unlocking round two after payment.
pub struct UnlockRoundTwoHandler {
    store: Arc<dyn SessionStore>,
    relay: Arc<dyn ActionRelay>,
}

impl UnlockRoundTwoHandler {
    pub fn new(store: Arc<dyn SessionStore>, relay: Arc<dyn ActionRelay>) -> Self {
        Self { store, relay }
    }

    pub async fn handle(
        &self,
        cmd: UnlockRoundTwoCommand,
        metadata: CommandMetadata,
    ) -> Result<UnlockRoundTwoResult, GameError> {
        let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;

        if !cmd.outcome.unlocks_round_two() || session.is_round_two_unlocked() {
            info!(
                session = %cmd.session_id,
                outcome = ?cmd.outcome,
                "Checkout return left round two unchanged"
            );
            return Ok(UnlockRoundTwoResult {
                session,
                newly_unlocked: false,
            });
        }

        session.unlock_round_two();
        self.store.save(&session).await?;
        relay_action(
            self.relay.as_ref(),
            cmd.session_id,
            &metadata,
            GameAction::RoundTwoUnlocked,
        )
        .await?;

        info!(
            session = %cmd.session_id,
            correlation_id = %metadata.correlation_id(),
            "Round two unlocked after checkout"
        );
        Ok(UnlockRoundTwoResult {
            session,
            newly_unlocked: true,
        })
    }
}
