//! Question catalog - the fixed, read-only question pools.
//!
//! The catalog is loaded once (from the bundled YAML file or a file named
//! in configuration) and shared read-only for the lifetime of the process.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::{Question, Round, Theme, ThemeMap};
use crate::domain::foundation::{QuestionId, ValidationError};

const BUNDLED_CATALOG: &str = include_str!("../../../data/questions.yaml");

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error("Invalid question: {0}")]
    InvalidQuestion(#[from] ValidationError),

    #[error("No round two questions for theme '{0}'")]
    EmptyPool(Theme),

    #[error("No round one questions")]
    EmptyRoundOne,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    RoundOne(usize),
    Pool(Theme, usize),
}

/// Read-only question pools keyed by round and theme.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    round_one: Vec<Question>,
    pools: ThemeMap<Vec<Question>>,
    index: HashMap<QuestionId, Slot>,
}

impl QuestionCatalog {
    /// Builds a catalog from a list of questions.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if two questions share an id
    /// - `InvalidQuestion` if display text is missing
    /// - `EmptyRoundOne` / `EmptyPool` if a round or theme has no questions
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut round_one = Vec::new();
        let mut pools: ThemeMap<Vec<Question>> = ThemeMap::default();
        let mut index = HashMap::with_capacity(questions.len());

        for question in questions {
            question.validate()?;
            let slot = match question.round {
                Round::One => Slot::RoundOne(round_one.len()),
                Round::Two => Slot::Pool(question.theme, pools[question.theme].len()),
            };
            if index.insert(question.id.clone(), slot).is_some() {
                return Err(CatalogError::DuplicateId(question.id));
            }
            match slot {
                Slot::RoundOne(_) => round_one.push(question),
                Slot::Pool(theme, _) => pools[theme].push(question),
            }
        }

        if round_one.is_empty() {
            return Err(CatalogError::EmptyRoundOne);
        }
        if let Some((theme, _)) = pools.iter().find(|(_, pool)| pool.is_empty()) {
            return Err(CatalogError::EmptyPool(theme));
        }

        Ok(Self {
            round_one,
            pools,
            index,
        })
    }

    /// Parses a catalog from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.questions)
    }

    /// Loads a catalog from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUNDLED_CATALOG)
    }

    /// Round one questions in catalog order.
    pub fn round_one(&self) -> &[Question] {
        &self.round_one
    }

    /// Round two pool for a theme.
    pub fn pool(&self, theme: Theme) -> &[Question] {
        &self.pools[theme]
    }

    /// Looks up a question by id.
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        match self.index.get(id)? {
            Slot::RoundOne(i) => self.round_one.get(*i),
            Slot::Pool(theme, i) => self.pools[*theme].get(*i),
        }
    }

    /// Total number of questions across both rounds.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always false for a constructed catalog; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
