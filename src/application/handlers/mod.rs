//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod game;

pub use game::{
    ApplyRemoteActionHandler, ApplyRemoteActionResult, CreateGameCommand, CreateGameHandler,
    CreateGameResult, DealRoundOneCommand, DealRoundOneHandler, DealRoundOneResult, DealerRng,
    StartRoundTwoCommand, StartRoundTwoHandler, StartRoundTwoResult, SubmitAnswerCommand,
    SubmitAnswerHandler, SubmitAnswerResult, UnlockRoundTwoCommand, UnlockRoundTwoHandler,
    UnlockRoundTwoResult,
};
