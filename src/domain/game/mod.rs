//! Game module - the two-partner play-through.
//!
//! - `GameSession` aggregate and its `GamePhase` state machine
//! - `Card` pairing a question with both partners' answers
//! - `RoundResults` per-round agreement summary
//! - `GameAction` mirrored between the partners' devices

mod action;
mod card;
mod errors;
mod phase;
mod results;
mod session;

pub use action::{ActionEnvelope, GameAction};
pub use card::Card;
pub use errors::GameError;
pub use phase::GamePhase;
pub use results::{RoundResults, ThemeScore};
pub use session::{GameSession, MAX_NAME_LENGTH};
