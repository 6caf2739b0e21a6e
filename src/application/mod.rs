//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ApplyRemoteActionHandler, ApplyRemoteActionResult, CreateGameCommand, CreateGameHandler,
    CreateGameResult, DealRoundOneCommand, DealRoundOneHandler, DealRoundOneResult, DealerRng,
    StartRoundTwoCommand, StartRoundTwoHandler, StartRoundTwoResult, SubmitAnswerCommand,
    SubmitAnswerHandler, SubmitAnswerResult, UnlockRoundTwoCommand, UnlockRoundTwoHandler,
    UnlockRoundTwoResult,
};
