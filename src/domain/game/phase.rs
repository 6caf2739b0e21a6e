//! Game phase state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;
use crate::domain::quiz::Round;

/// Where a game session is in its lifecycle.
///
/// ```text
/// Setup ─► RoundOne ─► RoundOneResults ─► RoundTwo ─► RoundTwoResults
///                                            ▲                │
///                                            └──── replay ────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Setup,
    RoundOne,
    RoundOneResults,
    RoundTwo,
    RoundTwoResults,
}

impl GamePhase {
    /// The round being played in this phase, if any.
    pub fn active_round(&self) -> Option<Round> {
        match self {
            GamePhase::RoundOne => Some(Round::One),
            GamePhase::RoundTwo => Some(Round::Two),
            _ => None,
        }
    }

    /// Results phase that follows a finished round.
    pub fn results_for(round: Round) -> Self {
        match round {
            Round::One => GamePhase::RoundOneResults,
            Round::Two => GamePhase::RoundTwoResults,
        }
    }

    /// Returns true while a round is being answered.
    pub fn is_playing(&self) -> bool {
        self.active_round().is_some()
    }
}

impl StateMachine for GamePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GamePhase::*;
        matches!(
            (self, target),
            (Setup, RoundOne)
                | (RoundOne, RoundOneResults)
                | (RoundOneResults, RoundTwo)
                | (RoundTwo, RoundTwoResults)
                | (RoundTwoResults, RoundTwo)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use GamePhase::*;
        match self {
            Setup => vec![RoundOne],
            RoundOne => vec![RoundOneResults],
            RoundOneResults => vec![RoundTwo],
            RoundTwo => vec![RoundTwoResults],
            RoundTwoResults => vec![RoundTwo],
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Setup => "setup",
            GamePhase::RoundOne => "round one",
            GamePhase::RoundOneResults => "round one results",
            GamePhase::RoundTwo => "round two",
            GamePhase::RoundTwoResults => "round two results",
        };
        write!(f, "{}", name)
    }
}
