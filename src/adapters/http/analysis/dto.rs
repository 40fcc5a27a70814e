//! HTTP DTOs for validation and question priority endpoints.

use serde::Deserialize;

use crate::domain::analysis::OrderViolation;

/// Category named in the query string.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryQuery {
    #[serde(alias = "visa_type")]
    pub category: String,
}

/// Violations to fix, usually copied from a validation report.
#[derive(Debug, Clone, Deserialize)]
pub struct AutoFixRequest {
    pub category: String,
    pub violations: Vec<OrderViolation>,
    #[serde(default)]
    pub apply: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuestionPriorityRequest {
    pub priority: i64,
}
