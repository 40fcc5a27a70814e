//! Rule-store error types.

use crate::domain::foundation::{
    Category, DomainError, ErrorCode, QuestionId, RuleId, ValidationError,
};

/// Errors raised by rule management operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// Rule was not found.
    NotFound(RuleId),
    /// Question catalog entry was not found.
    QuestionNotFound(QuestionId),
    /// Another rule in the category already uses this name.
    DuplicateName { name: String, category: Category },
    /// Rule violates a structural invariant.
    Malformed { name: String, reason: String },
    /// No rules exist for the category.
    InvalidCategory(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl RuleError {
    pub fn not_found(id: RuleId) -> Self {
        RuleError::NotFound(id)
    }
    pub fn question_not_found(id: QuestionId) -> Self {
        RuleError::QuestionNotFound(id)
    }
    pub fn duplicate_name(name: impl Into<String>, category: Category) -> Self {
        RuleError::DuplicateName {
            name: name.into(),
            category,
        }
    }
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RuleError::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }
    pub fn invalid_category(category: impl Into<String>) -> Self {
        RuleError::InvalidCategory(category.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        RuleError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            RuleError::NotFound(_) => ErrorCode::RuleNotFound,
            RuleError::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
            RuleError::DuplicateName { .. } => ErrorCode::DuplicateRuleName,
            RuleError::Malformed { .. } => ErrorCode::MalformedRule,
            RuleError::InvalidCategory(_) => ErrorCode::InvalidCategory,
            RuleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RuleError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            RuleError::NotFound(id) => format!("Rule not found: {}", id),
            RuleError::QuestionNotFound(id) => format!("Question priority not found: {}", id),
            RuleError::DuplicateName { name, category } => {
                format!("Rule name '{}' already exists in category {}", name, category)
            }
            RuleError::Malformed { name, reason } => format!("Rule '{}': {}", name, reason),
            RuleError::InvalidCategory(category) => format!("Unknown category: {}", category),
            RuleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RuleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RuleError {}

impl From<ValidationError> for RuleError {
    fn from(err: ValidationError) -> Self {
        RuleError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for RuleError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned().unwrap_or_default();
        match err.code {
            ErrorCode::DuplicateRuleName => match Category::new(detail("category")) {
                Ok(category) => RuleError::DuplicateName {
                    name: detail("name"),
                    category,
                },
                Err(_) => RuleError::Infrastructure(err.to_string()),
            },
            ErrorCode::MalformedRule => RuleError::Malformed {
                name: detail("name"),
                reason: err.message.clone(),
            },
            ErrorCode::RuleNotFound => match detail("id").parse::<RuleId>() {
                Ok(id) => RuleError::NotFound(id),
                Err(_) => RuleError::Infrastructure(err.to_string()),
            },
            ErrorCode::QuestionNotFound => match detail("id").parse::<QuestionId>() {
                Ok(id) => RuleError::QuestionNotFound(id),
                Err(_) => RuleError::Infrastructure(err.to_string()),
            },
            ErrorCode::ValidationFailed => RuleError::ValidationFailed {
                field: detail("field"),
                message: err.message.clone(),
            },
            _ => RuleError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_maps_to_code() {
        let err = RuleError::duplicate_name("R1", Category::new("E").unwrap());
        assert_eq!(err.code(), ErrorCode::DuplicateRuleName);
        assert!(err.message().contains("R1"));
    }

    #[test]
    fn domain_duplicate_error_round_trips_details() {
        let domain = DomainError::new(ErrorCode::DuplicateRuleName, "dup")
            .with_detail("name", "R1")
            .with_detail("category", "E");
        let err: RuleError = domain.into();
        assert_eq!(
            err,
            RuleError::DuplicateName {
                name: "R1".to_string(),
                category: Category::new("E").unwrap()
            }
        );
    }

    #[test]
    fn unexpected_domain_error_becomes_infrastructure() {
        let err: RuleError = DomainError::new(ErrorCode::InternalError, "boom").into();
        assert!(matches!(err, RuleError::Infrastructure(_)));
    }
}
