//! SubmitAnswerHandler - Command handler for recording a partner's answer.

use std::sync::Arc;
use tracing::{debug, info};

use super::{load_session, relay_action};
use crate::domain::foundation::{CardId, CommandMetadata, SessionId};
use crate::domain::game::{GameAction, GameError, GameSession};
use crate::domain::quiz::{Choice, Partner};
use crate::ports::{ActionRelay, SessionStore};

/// Command to answer a card.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub card_id: CardId,
    pub partner: Partner,
    pub choice: Choice,
}

/// Result of a recorded answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub session: GameSession,
    /// Match flag once both partners answered the card.
    pub matched: Option<bool>,
    /// True when this answer finished the round.
    pub round_complete: bool,
}

/// Handler for answering cards.
pub struct SubmitAnswerHandler {
    store: Arc<dyn SessionStore>,
    relay: Arc<dyn ActionRelay>,
}

impl SubmitAnswerHandler {
    pub fn new(store: Arc<dyn SessionStore>, relay: Arc<dyn ActionRelay>) -> Self {
        Self { store, relay }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitAnswerResult, GameError> {
        let mut session = load_session(self.store.as_ref(), &cmd.session_id).await?;

        let phase_before = session.phase();
        let matched = session.respond(cmd.card_id, cmd.partner, cmd.choice)?;
        let round_complete = session.phase() != phase_before;

        self.store.save(&session).await?;

        relay_action(
            self.relay.as_ref(),
            cmd.session_id,
            &metadata,
            GameAction::Answered {
                card_id: cmd.card_id,
                partner: cmd.partner,
                choice: cmd.choice,
            },
        )
        .await?;

        debug!(
            session = %cmd.session_id,
            correlation_id = %metadata.correlation_id(),
            card = %cmd.card_id,
            ?matched,
            "Answer submitted"
        );
        if round_complete {
            info!(session = %cmd.session_id, phase = %session.phase(), "Round finished");
        }

        Ok(SubmitAnswerResult {
            session,
            matched,
            round_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::game::test_support::{MockRelay, MockStore};
    use crate::domain::game::GamePhase;
    use crate::domain::quiz::{QuestionCatalog, Round};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dealt_session() -> GameSession {
        let catalog = QuestionCatalog::bundled().unwrap();
        let mut session = GameSession::new(SessionId::new(), "Alex", "Sam").unwrap();
        session
            .deal_round_one(&catalog, &mut StdRng::seed_from_u64(1))
            .unwrap();
        session
    }

    fn cmd(session: &GameSession, index: usize, partner: Partner, choice: Choice) -> SubmitAnswerCommand {
        SubmitAnswerCommand {
            session_id: *session.id(),
            card_id: session.cards(Round::One)[index].id,
            partner,
            choice,
        }
    }

    #[tokio::test]
    async fn records_answer_and_relays() {
        let session = dealt_session();
        let command = cmd(&session, 0, Partner::One, Choice::A);
        let store = Arc::new(MockStore::with_session(session));
        let relay = Arc::new(MockRelay::new());
        let handler = SubmitAnswerHandler::new(store.clone(), relay.clone());

        let result = handler
            .handle(command.clone(), CommandMetadata::new(Partner::One))
            .await
            .unwrap();

        assert_eq!(result.matched, None);
        assert!(!result.round_complete);
        assert_eq!(
            relay.actions(),
            vec![GameAction::Answered {
                card_id: command.card_id,
                partner: Partner::One,
                choice: Choice::A,
            }]
        );
        let saved = store.get(&command.session_id).unwrap();
        assert_eq!(
            saved.cards(Round::One)[0].answer.choice_of(Partner::One),
            Some(Choice::A)
        );
    }

    #[tokio::test]
    async fn second_partner_resolves_match() {
        let session = dealt_session();
        let first = cmd(&session, 0, Partner::One, Choice::A);
        let second = cmd(&session, 0, Partner::Two, Choice::B);
        let store = Arc::new(MockStore::with_session(session));
        let handler = SubmitAnswerHandler::new(store, Arc::new(MockRelay::new()));

        handler.handle(first, CommandMetadata::new(Partner::One)).await.unwrap();
        let result = handler
            .handle(second, CommandMetadata::new(Partner::Two))
            .await
            .unwrap();

        assert_eq!(result.matched, Some(false));
        assert!(result.session.cards(Round::One)[0].revealed);
    }

    #[tokio::test]
    async fn duplicate_answer_is_rejected_without_relay() {
        let session = dealt_session();
        let command = cmd(&session, 0, Partner::One, Choice::A);
        let store = Arc::new(MockStore::with_session(session));
        let relay = Arc::new(MockRelay::new());
        let handler = SubmitAnswerHandler::new(store, relay.clone());

        handler
            .handle(command.clone(), CommandMetadata::new(Partner::One))
            .await
            .unwrap();
        let err = handler
            .handle(command, CommandMetadata::new(Partner::One))
            .await
            .unwrap_err();

        assert!(matches!(err, GameError::AlreadyAnswered(_)));
        assert_eq!(relay.actions().len(), 1);
    }

    #[tokio::test]
    async fn last_answer_completes_round() {
        let session = dealt_session();
        let session_id = *session.id();
        let card_ids: Vec<CardId> = session.cards(Round::One).iter().map(|c| c.id).collect();
        let store = Arc::new(MockStore::with_session(session));
        let handler = SubmitAnswerHandler::new(store, Arc::new(MockRelay::new()));

        let mut last = None;
        for card_id in card_ids {
            for partner in [Partner::One, Partner::Two] {
                let command = SubmitAnswerCommand {
                    session_id,
                    card_id,
                    partner,
                    choice: Choice::A,
                };
                last = Some(
                    handler
                        .handle(command, CommandMetadata::new(partner))
                        .await
                        .unwrap(),
                );
            }
        }

        let last = last.unwrap();
        assert!(last.round_complete);
        assert_eq!(last.session.phase(), GamePhase::RoundOneResults);
    }

    #[tokio::test]
    async fn relay_failure_is_infrastructure() {
        let session = dealt_session();
        let command = cmd(&session, 0, Partner::One, Choice::A);
        let store = Arc::new(MockStore::with_session(session));
        let handler = SubmitAnswerHandler::new(store, Arc::new(MockRelay::failing()));

        let err = handler
            .handle(command, CommandMetadata::new(Partner::One))
            .await
            .unwrap_err();

        assert!(matches!(err, GameError::Infrastructure(_)));
    }
}
