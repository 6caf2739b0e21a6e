//! Static question records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Choice, Theme};
use crate::domain::foundation::{QuestionId, ValidationError};

/// Which round a question (or card) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Round {
    One,
    Two,
}

impl Round {
    /// Returns the round number (1 or 2).
    pub fn number(&self) -> u8 {
        match self {
            Round::One => 1,
            Round::Two => 2,
        }
    }
}

impl TryFrom<u8> for Round {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::One),
            2 => Ok(Round::Two),
            other => Err(ValidationError::out_of_range("round", 1, 2, other as i32)),
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> Self {
        round.number()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "round {}", self.number())
    }
}

/// Immutable multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub theme: Theme,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    pub round: Round,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Question {
    /// Returns the option text for a choice.
    pub fn option(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.option_a,
            Choice::B => &self.option_b,
        }
    }

    /// Checks that the display fields are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.text", self.id)));
        }
        if self.option_a.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.option_a", self.id)));
        }
        if self.option_b.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.option_b", self.id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: QuestionId::new("conflict-01").unwrap(),
            theme: Theme::Conflict,
            text: "After an argument, what helps most?".to_string(),
            option_a: "Talking it through right away".to_string(),
            option_b: "Some space first".to_string(),
            round: Round::Two,
            example: None,
        }
    }

    #[test]
    fn option_returns_matching_text() {
        let q = sample();
        assert_eq!(q.option(Choice::A), "Talking it through right away");
        assert_eq!(q.option(Choice::B), "Some space first");
    }

    #[test]
    fn validate_rejects_blank_option() {
        let mut q = sample();
        q.option_b = "  ".to_string();
        assert!(q.validate().is_err());
    }

    #[test]
    fn round_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Round::Two).unwrap(), "2");
        let round: Round = serde_json::from_str("1").unwrap();
        assert_eq!(round, Round::One);
        assert!(serde_json::from_str::<Round>("3").is_err());
    }

    #[test]
    fn question_deserializes_from_yaml() {
        let yaml = r#"
id: growth-03
theme: growth
text: Which feels more like growing together?
option_a: Learning something new side by side
option_b: Cheering each other on separately
round: 2
example: Taking a class together
"#;
        let q: Question = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(q.theme, Theme::Growth);
        assert_eq!(q.round, Round::Two);
        assert_eq!(q.example.as_deref(), Some("Taking a class together"));
    }
}
