//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables use the `DUET_QUIZ` prefix and nested values
//! are separated by double underscores. Every section has defaults, so an
//! empty environment yields a playable local configuration.
//!
//! # Example
//!
//! ```no_run
//! use duet_quiz::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Round two costs {}", config.payment.display_price());
//! ```

mod error;
mod game;
mod logging;
mod payment;

pub use error::{ConfigError, ValidationError};
pub use game::GameConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use payment::PaymentConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Catalog, seed and session storage
    #[serde(default)]
    pub game: GameConfig,

    /// Hosted checkout for the round two unlock
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Log format and filter
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DUET_QUIZ` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `DUET_QUIZ__GAME__RNG_SEED=42` -> `game.rng_seed = 42`
    /// - `DUET_QUIZ__PAYMENT__CHECKOUT_URL=...` -> `payment.checkout_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DUET_QUIZ")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Payment settings are only checked once a checkout URL is configured;
    /// without one the paywall is disabled and round two must be unlocked
    /// another way.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.game.validate()?;
        self.logging.validate()?;
        if self.paywall_enabled() {
            self.payment.validate()?;
        }
        Ok(())
    }

    /// Whether a hosted checkout is configured
    pub fn paywall_enabled(&self) -> bool {
        !self.payment.checkout_url.is_empty()
    }
}
