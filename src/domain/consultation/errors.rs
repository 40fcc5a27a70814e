//! Consultation-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Errors raised by consultation commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsultationError {
    /// The category has no rules.
    InvalidCategory(String),
    /// Session was not found.
    SessionNotFound(SessionId),
    /// The session has not been started.
    NoActiveSession,
    /// Nothing to undo.
    NoHistory,
    /// The session already reached a conclusion (or failed).
    SessionFinished,
    /// A conclusion is reachable but only through skipped questions.
    StuckSession,
    /// The label is not an askable question of this rule set.
    UnknownQuestion(String),
    /// The label already has a value.
    FactAlreadyKnown(String),
    /// The category has no terminal rule, so nothing can be concluded.
    NoTerminalRules(String),
    /// Invalid state for operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ConsultationError {
    pub fn invalid_category(category: impl Into<String>) -> Self {
        ConsultationError::InvalidCategory(category.into())
    }
    pub fn session_not_found(id: SessionId) -> Self {
        ConsultationError::SessionNotFound(id)
    }
    pub fn unknown_question(label: impl Into<String>) -> Self {
        ConsultationError::UnknownQuestion(label.into())
    }
    pub fn fact_already_known(label: impl Into<String>) -> Self {
        ConsultationError::FactAlreadyKnown(label.into())
    }
    pub fn no_terminal_rules(category: impl Into<String>) -> Self {
        ConsultationError::NoTerminalRules(category.into())
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        ConsultationError::InvalidState(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ConsultationError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ConsultationError::InvalidCategory(_) => ErrorCode::InvalidCategory,
            ConsultationError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            ConsultationError::NoActiveSession => ErrorCode::NoActiveSession,
            ConsultationError::NoHistory => ErrorCode::NoHistory,
            ConsultationError::SessionFinished => ErrorCode::SessionFinished,
            ConsultationError::StuckSession => ErrorCode::StuckSession,
            ConsultationError::UnknownQuestion(_) => ErrorCode::UnknownQuestion,
            ConsultationError::FactAlreadyKnown(_) => ErrorCode::FactAlreadyKnown,
            ConsultationError::NoTerminalRules(_) => ErrorCode::NoTerminalRules,
            ConsultationError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ConsultationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ConsultationError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ConsultationError::InvalidCategory(category) => {
                format!("No rules defined for category: {}", category)
            }
            ConsultationError::SessionNotFound(id) => format!("Session not found: {}", id),
            ConsultationError::NoActiveSession => "Consultation has not been started".to_string(),
            ConsultationError::NoHistory => "No previous answer to go back to".to_string(),
            ConsultationError::SessionFinished => "Consultation has already finished".to_string(),
            ConsultationError::StuckSession => {
                "Every remaining question has been skipped".to_string()
            }
            ConsultationError::UnknownQuestion(label) => format!("Not an askable question: {}", label),
            ConsultationError::FactAlreadyKnown(label) => {
                format!("Question already answered: {}", label)
            }
            ConsultationError::NoTerminalRules(category) => {
                format!("Category {} has no terminal rule", category)
            }
            ConsultationError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ConsultationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ConsultationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ConsultationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConsultationError {}

impl From<ValidationError> for ConsultationError {
    fn from(err: ValidationError) -> Self {
        ConsultationError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ConsultationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidCategory => ConsultationError::InvalidCategory(
                err.details.get("category").cloned().unwrap_or_default(),
            ),
            ErrorCode::ValidationFailed => ConsultationError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message.clone(),
            },
            _ => ConsultationError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(ConsultationError::NoHistory.code(), ErrorCode::NoHistory);
        assert_eq!(ConsultationError::StuckSession.code(), ErrorCode::StuckSession);
        assert_eq!(
            ConsultationError::no_terminal_rules("E").code(),
            ErrorCode::NoTerminalRules
        );
    }

    #[test]
    fn message_names_the_label() {
        let err = ConsultationError::fact_already_known("a");
        assert!(err.to_string().contains("a"));
    }

    #[test]
    fn storage_domain_error_becomes_infrastructure() {
        let err: ConsultationError = DomainError::new(ErrorCode::StorageError, "down").into();
        assert!(matches!(err, ConsultationError::Infrastructure(_)));
    }
}
