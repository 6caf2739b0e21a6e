//! Dealt question cards.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardId, DomainError};
use crate::domain::quiz::{Answer, Choice, Partner, Question, Round, Theme};

/// A question dealt into a round together with both partners' answers.
///
/// # Invariants
///
/// - `answer.question_id == question.id`
/// - `revealed` becomes true exactly when both partners have answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub question: Question,
    pub answer: Answer,
    pub revealed: bool,
}

impl Card {
    /// Deals a fresh, unanswered card for a question.
    pub fn deal(id: CardId, question: Question) -> Self {
        let answer = Answer::unanswered(question.id.clone(), question.theme);
        Self {
            id,
            question,
            answer,
            revealed: false,
        }
    }

    /// Records a partner's choice and reveals the card once both answered.
    ///
    /// Returns the match flag (`None` while waiting for the other partner).
    ///
    /// # Errors
    ///
    /// - `AlreadyAnswered` if this partner already answered the card
    pub fn respond(&mut self, partner: Partner, choice: Choice) -> Result<Option<bool>, DomainError> {
        let matched = self.answer.record(partner, choice)?;
        if matched.is_some() {
            self.revealed = true;
        }
        Ok(matched)
    }

    pub fn theme(&self) -> Theme {
        self.question.theme
    }

    pub fn round(&self) -> Round {
        self.question.round
    }

    /// True once both partners have answered.
    pub fn is_resolved(&self) -> bool {
        self.answer.is_resolved()
    }
}
