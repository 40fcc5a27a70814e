//! HTTP DTOs for rule management endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::rules::{ConditionLogic, Rule, RuleKind};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Optional category filter for list, export and catalog endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryFilter {
    #[serde(default, alias = "visa_type")]
    pub category: Option<String>,
}

/// New priority order: each id gets its index as priority.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRulesRequest {
    pub rule_ids: Vec<String>,
}

/// Import body. Entries are validated one by one.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRulesRequest {
    pub rules: Vec<serde_json::Value>,
    #[serde(default)]
    pub overwrite: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct RuleResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub kind: RuleKind,
    pub logic: ConditionLogic,
    pub conditions: Vec<String>,
    pub actions: Vec<String>,
    pub priority: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Rule> for RuleResponse {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id().to_string(),
            name: rule.name().to_string(),
            category: rule.category().to_string(),
            kind: rule.kind(),
            logic: rule.logic(),
            conditions: rule.conditions().to_vec(),
            actions: rule.actions().to_vec(),
            priority: rule.priority(),
            created_at: rule.created_at().to_rfc3339(),
            updated_at: rule.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleCommandResponse {
    pub rule_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReorderRulesResponse {
    pub updated: usize,
    pub missing: Vec<String>,
}
