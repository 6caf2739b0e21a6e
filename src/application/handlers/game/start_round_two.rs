//! StartRoundTwoHandler - Command handler for starting or replaying round two.

use std::sync::Arc;
use tracing::info;

use super::{load_session, relay_action, DealerRng};
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::game::{GameAction, GameError, GamePhase, GameSession};
use crate::domain::personalization::AllocationPlan;
use crate::domain::quiz::{QuestionCatalog, Round};
use crate::ports::{ActionRelay, SessionStore};

/// Command to deal a personalized round two deck.
///
/// Starts round two after round one results, or replays it after round two
/// results.
#[derive(Debug, Clone)]
pub struct StartRoundTwoCommand {
    pub session_id: SessionId,
}

/// Result of a round two deal.
#[derive(Debug, Clone)]
pub struct StartRoundTwoResult {
    pub session: GameSession,
    pub plan: AllocationPlan,
    pub replay: bool,
}

/// Handler for dealing round two.
pub struct StartRoundTwoHandler {
    store: Arc<dyn SessionStore>,
    relay: Arc<dyn ActionRelay>,
    catalog: Arc<QuestionCatalog>,
    rng: DealerRng,
}

impl StartRoundTwoHandler {
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
        cmd: StartRoundTwoCommand,
        metadata: CommandMetadata,
    ) -> Result<StartRoundTwoResult, GameError> {
        // 1. Load session
        let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;

        // 2. Personalize and deal
        let replay = match session.phase() {
            GamePhase::RoundOneResults => false,
            GamePhase::RoundTwoResults => true,
            other => {
                return Err(GameError::invalid_phase(format!(
                    "Round two cannot start during {}",
                    other
                )))
            }
        };
        let plan = {
            let mut rng = self.rng.lock()?;
            if replay {
                session.replay_round_two(&self.catalog, &mut *rng)?
            } else {
                session.start_round_two(&self.catalog, &mut *rng)?
            }
        };

        // 3. Persist
        self.store.save(&session).await?;

        // 4. Relay the deck so the other device deals the same cards
        relay_action(
            self.relay.as_ref(),
            cmd.session_id,
            &metadata,
            GameAction::RoundTwoDealt {
                question_ids: session.question_ids(Round::Two),
            },
        )
        .await?;

        info!(
            session = %cmd.session_id,
            correlation_id = %metadata.correlation_id(),
            strategy = ?plan.strategy,
            replay,
            "Round two dealt"
        );
        Ok(StartRoundTwoResult {
            session,
            plan,
            replay,
        })
    }
}
