//! ApplyRemoteActionHandler - Mirrors an action received from the other device.

use std::sync::Arc;
use tracing::{debug, warn};

use super::load_session;
use crate::domain::game::{ActionEnvelope, GameError, GameSession};
use crate::domain::quiz::{Partner, QuestionCatalog};
use crate::ports::SessionStore;

/// Result of handling a relayed envelope.
#[derive(Debug, Clone)]
pub enum ApplyRemoteActionResult {
    /// The envelope was applied and the session saved.
    Applied(GameSession),
    /// The envelope was our own echo and was skipped.
    SkippedOwn,
}

/// Handler applying relayed actions to the local copy of a session.
///
/// Does not publish anything: the action already came from the relay.
pub struct ApplyRemoteActionHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<QuestionCatalog>,
    local_partner: Partner,
}

impl ApplyRemoteActionHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<QuestionCatalog>,
        local_partner: Partner,
    ) -> Self {
        Self {
            store,
            catalog,
            local_partner,
        }
    }

    pub async fn handle(&self, envelope: ActionEnvelope) -> Result<ApplyRemoteActionResult, GameError> {
        if envelope.is_from(self.local_partner) {
            debug!(session = %envelope.session_id, action = envelope.action.name(), "Skipping own echo");
            return Ok(ApplyRemoteActionResult::SkippedOwn);
        }

        let mut session = load_session(self.store.as_ref(), &envelope.session_id).await?;
        if let Err(err) = session.apply(&self.catalog, &envelope.action) {
            warn!(
                session = %envelope.session_id,
                action = envelope.action.name(),
                error = %err,
                "Relayed action rejected"
            );
            return Err(err.into());
        }
        self.store.save(&session).await?;

        debug!(session = %envelope.session_id, action = envelope.action.name(), "Relayed action applied");
        Ok(ApplyRemoteActionResult::Applied(session))
    }
}
