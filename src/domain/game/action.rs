//! Game actions exchanged between the two partners' clients.
//!
//! Every state change that must be mirrored on the other device is expressed
//! as a `GameAction`. Random choices (deck order, round two selection) are
//! made once by the acting client and relayed as explicit question ids, so
//! applying the same actions in the same order yields identical sessions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardId, QuestionId, SessionId};
use crate::domain::quiz::{Choice, Partner};

/// A mirrored state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    RoundOneDealt { question_ids: Vec<QuestionId> },
    Answered {
        card_id: CardId,
        partner: Partner,
        choice: Choice,
    },
    RoundTwoUnlocked,
    RoundTwoDealt { question_ids: Vec<QuestionId> },
}

impl GameAction {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::RoundOneDealt { .. } => "round_one_dealt",
            GameAction::Answered { .. } => "answered",
            GameAction::RoundTwoUnlocked => "round_two_unlocked",
            GameAction::RoundTwoDealt { .. } => "round_two_dealt",
        }
    }
}

/// An action addressed to a session room, tagged with the partner who sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    pub session_id: SessionId,
    pub sender: Partner,
    pub action: GameAction,
}

impl ActionEnvelope {
    pub fn new(session_id: SessionId, sender: Partner, action: GameAction) -> Self {
        Self {
            session_id,
            sender,
            action,
        }
    }

    /// True when this envelope was sent by `partner` (and so is already applied locally).
    pub fn is_from(&self, partner: Partner) -> bool {
        self.sender == partner
    }
}
