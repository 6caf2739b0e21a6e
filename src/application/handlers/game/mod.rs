//! Game command handlers.
//!
//! Each handler loads the session, mutates the aggregate, saves it and
//! publishes the matching `GameAction` so the other device can mirror it.

mod apply_remote_action;
mod create_game;
mod deal_round_one;
mod start_round_two;
mod submit_answer;
mod unlock_round_two;

pub use apply_remote_action::{ApplyRemoteActionHandler, ApplyRemoteActionResult};
pub use create_game::{CreateGameCommand, CreateGameHandler, CreateGameResult};
pub use deal_round_one::{DealRoundOneCommand, DealRoundOneHandler, DealRoundOneResult};
pub use start_round_two::{StartRoundTwoCommand, StartRoundTwoHandler, StartRoundTwoResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
pub use unlock_round_two::{UnlockRoundTwoCommand, UnlockRoundTwoHandler, UnlockRoundTwoResult};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::game::{ActionEnvelope, GameAction, GameError, GameSession};
use crate::ports::{ActionRelay, SessionStore};

/// Loads a session or fails with `NotFound`.
async fn load_session(store: &dyn SessionStore, id: &SessionId) -> Result<GameSession, GameError> {
    store
        .load(id)
        .await?
        .ok_or_else(|| GameError::not_found(*id))
}

/// Publishes an action on behalf of the command's sender.
async fn relay_action(
    relay: &dyn ActionRelay,
    session_id: SessionId,
    metadata: &CommandMetadata,
    action: GameAction,
) -> Result<(), GameError> {
    let envelope = ActionEnvelope::new(session_id, metadata.sender, action);
    relay.publish(envelope).await?;
    Ok(())
}

/// Random source shared by the dealing handlers.
pub struct DealerRng(Mutex<StdRng>);

impl DealerRng {
    pub fn from_entropy() -> Self {
        Self(Mutex::new(StdRng::from_entropy()))
    }

    /// Fixed seed for reproducible decks.
    pub fn seeded(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    /// Builds from an optional configured seed.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StdRng>, GameError> {
        self.0
            .lock()
            .map_err(|_| GameError::infrastructure("Dealer rng lock poisoned"))
    }
}
