//! Duet Quiz - two-player relationship quiz
//!
//! Partners answer the same multiple-choice questions on their own devices
//! and see where they agree. Round two is a paid, personalized deck weighted
//! toward the themes where round one answers diverged.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
