//! Game configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::quiz::{CatalogError, QuestionCatalog};

/// Game configuration (question catalog, randomness, session storage)
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// YAML question catalog; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// Fixed seed for reproducible decks; entropy is used when unset
    pub rng_seed: Option<u64>,

    /// Directory for session snapshots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Buffer size of each relay room
    #[serde(default = "default_relay_capacity")]
    pub relay_capacity: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/sessions")
}

fn default_relay_capacity() -> usize {
    64
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            rng_seed: None,
            data_dir: default_data_dir(),
            relay_capacity: default_relay_capacity(),
        }
    }
}

impl GameConfig {
    /// Loads the configured catalog, or the bundled one.
    pub fn load_catalog(&self) -> Result<QuestionCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => QuestionCatalog::load(path),
            None => QuestionCatalog::bundled(),
        }
    }

    /// Validate game configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("GAME__DATA_DIR"));
        }
        if self.relay_capacity == 0 {
            return Err(ValidationError::MissingRequired("GAME__RELAY_CAPACITY"));
        }
        Ok(())
    }
}
