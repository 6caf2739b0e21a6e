//! DealRoundOneHandler - Command handler for dealing the warm-up round.

use std::sync::Arc;
use tracing::info;

use super::{load_session, relay_action, DealerRng};
use crate::domain::foundation::{CommandMetadata, QuestionId, SessionId};
use crate::domain::game::{GameAction, GameError, GameSession};
use crate::domain::quiz::QuestionCatalog;
use crate::ports::{ActionRelay, SessionStore};

/// Command to deal round one.
#[derive(Debug, Clone)]
pub struct DealRoundOneCommand {
    pub session_id: SessionId,
}

/// Result of a successful deal.
#[derive(Debug, Clone)]
pub struct DealRoundOneResult {
    pub session: GameSession,
    pub question_ids: Vec<QuestionId>,
}

/// Handler for dealing round one.
pub struct DealRoundOneHandler {
    store: Arc<dyn SessionStore>,
    relay: Arc<dyn ActionRelay>,
    catalog: Arc<QuestionCatalog>,
    rng: DealerRng,
}

impl DealRoundOneHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        relay: Arc<dyn ActionRelay>,
        catalog: Arc<QuestionCatalog>,
        rng: DealerRng,
    ) -> Self {
        Self {
            store,
            relay,
            catalog,
            rng,
        }
    }

    pub async fn handle(
        &self,
        cmd: DealRoundOneCommand,
        metadata: CommandMetadata,
    ) -> Result<DealRoundOneResult, GameError> {
        // 1. Load session
        let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;

        // 2. Shuffle and deal
        let question_ids = {
            let mut rng = self.rng.lock()?;
            session.deal_round_one(&self.catalog, &mut *rng)?
        };

        // 3. Persist
        self.store.save(&session).await?;

        // 4. Relay the dealt order
        relay_action(
            self.relay.as_ref(),
            cmd.session_id,
            &metadata,
            GameAction::RoundOneDealt {
                question_ids: question_ids.clone(),
            },
        )
        .await?;

        info!(
            session = %cmd.session_id,
            correlation_id = %metadata.correlation_id(),
            cards = question_ids.len(),
            "Round one dealt"
        );
        Ok(DealRoundOneResult {
            session,
            question_ids,
        })
    }
}
