//! Game-specific error types.

use crate::domain::foundation::{CardId, DomainError, ErrorCode, SessionId};

/// Errors surfaced by game operations and handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Session was not found.
    NotFound(SessionId),
    /// Operation not allowed in the current phase.
    InvalidPhase(String),
    /// Card is not part of the active round.
    CardNotFound(CardId),
    /// Partner already answered the card.
    AlreadyAnswered(String),
    /// Round two has not been paid for.
    RoundTwoLocked,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Storage or relay failure.
    Infrastructure(String),
}

impl GameError {
    pub fn not_found(id: SessionId) -> Self {
        GameError::NotFound(id)
    }
    pub fn invalid_phase(message: impl Into<String>) -> Self {
        GameError::InvalidPhase(message.into())
    }
    pub fn card_not_found(id: CardId) -> Self {
        GameError::CardNotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GameError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        GameError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::NotFound(_) => ErrorCode::SessionNotFound,
            GameError::InvalidPhase(_) => ErrorCode::InvalidStateTransition,
            GameError::CardNotFound(_) => ErrorCode::CardNotFound,
            GameError::AlreadyAnswered(_) => ErrorCode::AlreadyAnswered,
            GameError::RoundTwoLocked => ErrorCode::RoundTwoLocked,
            GameError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            GameError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            GameError::NotFound(id) => format!("Session not found: {}", id),
            GameError::InvalidPhase(msg) => format!("Invalid phase: {}", msg),
            GameError::CardNotFound(id) => format!("Card not found: {}", id),
            GameError::AlreadyAnswered(msg) => msg.clone(),
            GameError::RoundTwoLocked => "Round two is locked until payment completes".to_string(),
            GameError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            GameError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for GameError {}

impl From<DomainError> for GameError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => GameError::InvalidPhase(err.message),
            ErrorCode::AlreadyAnswered => GameError::AlreadyAnswered(err.message),
            ErrorCode::RoundTwoLocked => GameError::RoundTwoLocked,
            ErrorCode::CardNotFound => match err.details.get("card_id").and_then(|v| v.parse().ok()) {
                Some(seq) => GameError::CardNotFound(CardId::new(seq)),
                None => GameError::Infrastructure(err.to_string()),
            },
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::QuestionNotFound => GameError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => GameError::Infrastructure(err.to_string()),
        }
    }
}
