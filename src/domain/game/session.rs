//! Game session aggregate.
//!
//! A session holds everything two partners share during one play-through:
//! their names, the phase, the round one and round two decks, and whether
//! round two has been paid for.
//!
//! # Determinism
//!
//! Randomness is only consumed by the partner that deals a deck. The dealt
//! question ids travel to the other device as a [`GameAction`], and
//! [`GameSession::apply`] installs them with the same sequential card ids,
//! so both copies of the session stay identical.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{Card, GameAction, GamePhase, RoundResults};
use crate::domain::foundation::{
    CardId, DomainError, ErrorCode, QuestionId, SessionId, StateMachine, Timestamp,
};
use crate::domain::personalization::{AllocationPlan, RoundTwoPersonalizer};
use crate::domain::quiz::{Answer, Choice, Partner, Question, QuestionCatalog, Round};

/// Maximum length for a partner name, in characters.
pub const MAX_NAME_LENGTH: usize = 40;

/// Game session aggregate.
///
/// # Invariants
///
/// - partner names are trimmed, 1-40 characters
/// - `round_one` is non-empty once the phase leaves `Setup`
/// - `round_two` is non-empty while in `RoundTwo` or `RoundTwoResults`
/// - card ids are unique across both rounds and strictly increasing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    id: SessionId,
    partner_one: String,
    partner_two: String,
    phase: GamePhase,
    round_two_unlocked: bool,
    round_one: Vec<Card>,
    round_two: Vec<Card>,
    next_card_id: CardId,
    /// Number of round two decks dealt (1 after the first start, +1 per replay).
    round_two_plays: u32,
    last_plan: Option<AllocationPlan>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl GameSession {
    /// Creates a session in `Setup`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if either name is blank or too long
    pub fn new(
        id: SessionId,
        partner_one: impl Into<String>,
        partner_two: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let partner_one = Self::validate_name("partner_one", partner_one.into())?;
        let partner_two = Self::validate_name("partner_two", partner_two.into())?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            partner_one,
            partner_two,
            phase: GamePhase::Setup,
            round_two_unlocked: false,
            round_one: Vec::new(),
            round_two: Vec::new(),
            next_card_id: CardId::new(0),
            round_two_plays: 0,
            last_plan: None,
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Display name of a partner.
    pub fn partner_name(&self, partner: Partner) -> &str {
        match partner {
            Partner::One => &self.partner_one,
            Partner::Two => &self.partner_two,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_round_two_unlocked(&self) -> bool {
        self.round_two_unlocked
    }

    /// Cards dealt for a round, in play order.
    pub fn cards(&self, round: Round) -> &[Card] {
        match round {
            Round::One => &self.round_one,
            Round::Two => &self.round_two,
        }
    }

    /// Question ids of a round's deck, in play order.
    pub fn question_ids(&self, round: Round) -> Vec<QuestionId> {
        self.cards(round)
            .iter()
            .map(|card| card.question.id.clone())
            .collect()
    }

    /// Answer records for a round.
    pub fn answers(&self, round: Round) -> impl Iterator<Item = &Answer> + '_ {
        self.cards(round).iter().map(|card| &card.answer)
    }

    pub fn round_two_plays(&self) -> u32 {
        self.round_two_plays
    }

    /// Allocation behind the current round two deck, if one was dealt locally.
    pub fn last_plan(&self) -> Option<&AllocationPlan> {
        self.last_plan.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Play
    // ─────────────────────────────────────────────────────────────────────────

    /// The first card of the active round that is still waiting for an answer.
    pub fn current_card(&self) -> Option<&Card> {
        let round = self.phase.active_round()?;
        self.cards(round).iter().find(|card| !card.is_resolved())
    }

    /// Partner expected to answer next.
    ///
    /// Partner one opens even-indexed cards and partner two opens odd-indexed
    /// ones; once the opener has answered it is the other partner's turn.
    /// Returns `None` outside of a round or when every card is resolved.
    pub fn current_turn(&self) -> Option<Partner> {
        let round = self.phase.active_round()?;
        let (index, card) = self
            .cards(round)
            .iter()
            .enumerate()
            .find(|(_, card)| !card.is_resolved())?;

        let opener = if index % 2 == 0 {
            Partner::One
        } else {
            Partner::Two
        };
        if card.answer.choice_of(opener).is_none() {
            Some(opener)
        } else {
            Some(opener.other())
        }
    }

    /// Deals the round one deck in a random order.
    ///
    /// Returns the dealt question ids so they can be relayed.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless in `Setup`
    pub fn deal_round_one<R: Rng + ?Sized>(
        &mut self,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Result<Vec<QuestionId>, DomainError> {
        self.ensure_transition(GamePhase::RoundOne)?;

        let mut questions = catalog.round_one().to_vec();
        questions.shuffle(rng);
        let question_ids = questions.iter().map(|q| q.id.clone()).collect();

        self.install_round_one(questions)?;
        Ok(question_ids)
    }

    /// Records a partner's answer on a card of the active round.
    ///
    /// Resolving the last card moves the session to that round's results.
    /// Returns the card's match flag (`None` until both partners answered).
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` when no round is being played
    /// - `CardNotFound` if the card is not in the active round
    /// - `AlreadyAnswered` if the partner already answered the card
    pub fn respond(
        &mut self,
        card_id: CardId,
        partner: Partner,
        choice: Choice,
    ) -> Result<Option<bool>, DomainError> {
        let round = self.phase.active_round().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot answer during {}", self.phase),
            )
        })?;

        let deck = match round {
            Round::One => &mut self.round_one,
            Round::Two => &mut self.round_two,
        };
        let card = deck
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::CardNotFound,
                    format!("{} is not part of {}", card_id, round),
                )
                .with_detail("card_id", card_id.value().to_string())
            })?;

        let matched = card.respond(partner, choice)?;
        debug!(card = %card_id, partner = %partner, ?matched, "Answer recorded");

        if deck.iter().all(Card::is_resolved) {
            self.phase = self.phase.transition_to(GamePhase::results_for(round))?;
            info!(session = %self.id, round = round.number(), "Round complete");
        }
        self.touch();
        Ok(matched)
    }

    /// Marks round two as paid for.
    ///
    /// Idempotent: unlocking twice is not an error.
    pub fn unlock_round_two(&mut self) {
        if !self.round_two_unlocked {
            self.round_two_unlocked = true;
            info!(session = %self.id, "Round two unlocked");
            self.touch();
        }
    }

    /// Personalizes and deals the first round two deck.
    ///
    /// # Errors
    ///
    /// - `RoundTwoLocked` if round two has not been unlocked
    /// - `InvalidStateTransition` unless in `RoundOneResults`
    pub fn start_round_two<R: Rng + ?Sized>(
        &mut self,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Result<AllocationPlan, DomainError> {
        self.ensure_phase(GamePhase::RoundOneResults, "start round two")?;
        self.deal_round_two(catalog, rng)
    }

    /// Deals a fresh round two deck after round two results.
    ///
    /// The deck is personalized from round one answers again, so a replay
    /// keeps the same weighting but draws new questions.
    ///
    /// # Errors
    ///
    /// - `RoundTwoLocked` if round two has not been unlocked
    /// - `InvalidStateTransition` unless in `RoundTwoResults`
    pub fn replay_round_two<R: Rng + ?Sized>(
        &mut self,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Result<AllocationPlan, DomainError> {
        self.ensure_phase(GamePhase::RoundTwoResults, "replay round two")?;
        self.deal_round_two(catalog, rng)
    }

    /// Installs a round two deck dealt on the other device.
    ///
    /// # Errors
    ///
    /// - `RoundTwoLocked` if round two has not been unlocked
    /// - `InvalidStateTransition` unless round two can start from the current phase
    /// - `QuestionNotFound` / `ValidationFailed` if an id is unknown or not a round two question
    pub fn apply_round_two_deck(
        &mut self,
        catalog: &QuestionCatalog,
        question_ids: &[QuestionId],
    ) -> Result<(), DomainError> {
        self.ensure_unlocked()?;
        self.ensure_transition(GamePhase::RoundTwo)?;
        let questions = Self::resolve(catalog, question_ids, Round::Two)?;
        self.install_round_two(questions, None)
    }

    /// Summary of a round's resolved cards.
    pub fn round_results(&self, round: Round) -> RoundResults {
        RoundResults::from_cards(round, self.cards(round))
    }

    /// Applies a relayed action.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns.
    pub fn apply(
        &mut self,
        catalog: &QuestionCatalog,
        action: &GameAction,
    ) -> Result<(), DomainError> {
        match action {
            GameAction::RoundOneDealt { question_ids } => {
                self.ensure_transition(GamePhase::RoundOne)?;
                let questions = Self::resolve(catalog, question_ids, Round::One)?;
                self.install_round_one(questions)
            }
            GameAction::Answered {
                card_id,
                partner,
                choice,
            } => self.respond(*card_id, *partner, *choice).map(|_| ()),
            GameAction::RoundTwoUnlocked => {
                self.unlock_round_two();
                Ok(())
            }
            GameAction::RoundTwoDealt { question_ids } => {
                self.apply_round_two_deck(catalog, question_ids)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn deal_round_two<R: Rng + ?Sized>(
        &mut self,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Result<AllocationPlan, DomainError> {
        self.ensure_unlocked()?;
        self.ensure_transition(GamePhase::RoundTwo)?;

        let deck = RoundTwoPersonalizer::personalize(self.answers(Round::One), catalog, rng);
        let plan = deck.plan;
        self.install_round_two(deck.questions, Some(plan))?;
        Ok(plan)
    }

    fn install_round_one(&mut self, questions: Vec<Question>) -> Result<(), DomainError> {
        self.round_one = self.deal_cards(questions);
        self.phase = self.phase.transition_to(GamePhase::RoundOne)?;
        info!(session = %self.id, cards = self.round_one.len(), "Round one dealt");
        self.touch();
        Ok(())
    }

    fn install_round_two(
        &mut self,
        questions: Vec<Question>,
        plan: Option<AllocationPlan>,
    ) -> Result<(), DomainError> {
        self.round_two = self.deal_cards(questions);
        self.phase = self.phase.transition_to(GamePhase::RoundTwo)?;
        self.round_two_plays += 1;
        self.last_plan = plan;
        info!(
            session = %self.id,
            cards = self.round_two.len(),
            play = self.round_two_plays,
            "Round two dealt"
        );
        self.touch();
        Ok(())
    }

    fn deal_cards(&mut self, questions: Vec<Question>) -> Vec<Card> {
        questions
            .into_iter()
            .map(|question| {
                let id = self.next_card_id;
                self.next_card_id = id.next();
                Card::deal(id, question)
            })
            .collect()
    }

    fn resolve(
        catalog: &QuestionCatalog,
        question_ids: &[QuestionId],
        round: Round,
    ) -> Result<Vec<Question>, DomainError> {
        if question_ids.is_empty() {
            return Err(DomainError::validation("question_ids", "Deck is empty"));
        }
        question_ids
            .iter()
            .map(|id| {
                let question = catalog.get(id).ok_or_else(|| {
                    DomainError::new(ErrorCode::QuestionNotFound, format!("Unknown question {}", id))
                        .with_detail("field", "question_ids")
                })?;
                if question.round != round {
                    return Err(DomainError::validation(
                        "question_ids",
                        format!("{} is not a {} question", id, round),
                    ));
                }
                Ok(question.clone())
            })
            .collect()
    }

    fn ensure_transition(&self, target: GamePhase) -> Result<(), DomainError> {
        if self.phase.can_transition_to(&target) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot move from {} to {}", self.phase, target),
            ))
        }
    }

    fn ensure_phase(&self, expected: GamePhase, operation: &str) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot {} during {}", operation, self.phase),
            ))
        }
    }

    fn ensure_unlocked(&self) -> Result<(), DomainError> {
        if self.round_two_unlocked {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::RoundTwoLocked,
                "Round two requires payment",
            ))
        }
    }

    fn validate_name(field: &str, name: String) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(field, "Name is required"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                field,
                format!("Name must be at most {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(trimmed.to_string())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
