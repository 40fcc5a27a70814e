//! AutoFixPrioritiesHandler - Command handler for clearing order violations.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::analysis::{OrderViolation, PriorityAutoFixer, PriorityChange, ValidationReport};
use crate::domain::foundation::{Category, CommandMetadata};
use crate::domain::rules::RuleError;
use crate::ports::RuleRepository;

use super::validate_rules::{ValidateRulesHandler, ValidateRulesQuery};

#[derive(Debug, Clone)]
pub struct AutoFixPrioritiesCommand {
    pub category: Category,
    pub violations: Vec<OrderViolation>,
    /// Persist the changes; otherwise only report them.
    pub apply: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutoFixResult {
    pub changes: Vec<PriorityChange>,
    pub applied: bool,
    /// Fresh validation after applying, when `applied`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
}

pub struct AutoFixPrioritiesHandler {
    rules: Arc<dyn RuleRepository>,
    validator: ValidateRulesHandler,
}

impl AutoFixPrioritiesHandler {
    pub fn new(rules: Arc<dyn RuleRepository>, validator: ValidateRulesHandler) -> Self {
        Self { rules, validator }
    }

    pub async fn handle(
        &self,
        cmd: AutoFixPrioritiesCommand,
        metadata: CommandMetadata,
    ) -> Result<AutoFixResult, RuleError> {
        let rules = self.rules.list(Some(&cmd.category)).await?;
        let changes = PriorityAutoFixer::plan(&rules, &cmd.violations);

        if !cmd.apply {
            return Ok(AutoFixResult {
                changes,
                applied: false,
                report: None,
            });
        }

        for change in &changes {
            let mut rule = self
                .rules
                .find_by_id(&change.rule_id)
                .await?
                .ok_or_else(|| RuleError::not_found(change.rule_id))?;
            rule.set_priority(change.new_priority);
            self.rules.update(&rule).await?;
        }

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            category = %cmd.category,
            changes = changes.len(),
            "rule priorities auto-fixed"
        );

        let report = self
            .validator
            .handle(ValidateRulesQuery {
                category: cmd.category,
            })
            .await?;
        Ok(AutoFixResult {
            changes,
            applied: true,
            report: Some(report),
        })
    }
}
