//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Checkout URL must be an absolute HTTPS URL")]
    CheckoutUrlMustBeHttps,

    #[error("Round two price must be greater than zero")]
    InvalidPrice,

    #[error("Checkout return parameter must be a non-empty query key")]
    InvalidSuccessParam,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
