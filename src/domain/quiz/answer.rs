//! Two-partner answer state attached to a card.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Theme;
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};

/// One of the two answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partner {
    One,
    Two,
}

impl Partner {
    /// Returns the other partner.
    pub fn other(&self) -> Partner {
        match self {
            Partner::One => Partner::Two,
            Partner::Two => Partner::One,
        }
    }
}

impl fmt::Display for Partner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partner::One => write!(f, "partner one"),
            Partner::Two => write!(f, "partner two"),
        }
    }
}

/// Answer record for a single question.
///
/// # Invariants
///
/// - `matched` is `None` until both partners have answered
/// - once `matched` is set it never changes
/// - each partner answers at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub theme: Theme,
    partner_one: Option<Choice>,
    partner_two: Option<Choice>,
    matched: Option<bool>,
}

impl Answer {
    /// Creates an unanswered record for a freshly dealt question.
    pub fn unanswered(question_id: QuestionId, theme: Theme) -> Self {
        Self {
            question_id,
            theme,
            partner_one: None,
            partner_two: None,
            matched: None,
        }
    }

    /// Creates a fully resolved record from two choices.
    pub fn resolved(question_id: QuestionId, theme: Theme, one: Choice, two: Choice) -> Self {
        Self {
            question_id,
            theme,
            partner_one: Some(one),
            partner_two: Some(two),
            matched: Some(one == two),
        }
    }

    /// Returns the choice made by a partner, if any.
    pub fn choice_of(&self, partner: Partner) -> Option<Choice> {
        match partner {
            Partner::One => self.partner_one,
            Partner::Two => self.partner_two,
        }
    }

    /// Tri-state match flag.
    pub fn matched(&self) -> Option<bool> {
        self.matched
    }

    /// True when the partners chose differently.
    pub fn is_mismatch(&self) -> bool {
        self.matched == Some(false)
    }

    /// True once both partners have answered.
    pub fn is_resolved(&self) -> bool {
        self.matched.is_some()
    }

    /// Records a partner's choice and resolves the match flag when the
    /// second partner answers.
    ///
    /// # Errors
    ///
    /// - `AlreadyAnswered` if this partner already chose
    pub fn record(&mut self, partner: Partner, choice: Choice) -> Result<Option<bool>, DomainError> {
        let slot = match partner {
            Partner::One => &mut self.partner_one,
            Partner::Two => &mut self.partner_two,
        };
        if slot.is_some() {
            return Err(DomainError::new(
                ErrorCode::AlreadyAnswered,
                format!("{} already answered {}", partner, self.question_id),
            ));
        }
        *slot = Some(choice);

        if let (Some(one), Some(two)) = (self.partner_one, self.partner_two) {
            self.matched = Some(one == two);
        }
        Ok(self.matched)
    }
}
