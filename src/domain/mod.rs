//! Domain layer containing the quiz rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `quiz` - Themes, questions, answers and the question catalog
//! - `personalization` - Round two allocation and sampling
//! - `game` - Game session aggregate, phases, cards and results
//! - `paywall` - Checkout outcome parsing

pub mod foundation;
pub mod game;
pub mod paywall;
pub mod personalization;
pub mod quiz;
