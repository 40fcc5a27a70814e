//! ReorderRulesHandler - Command handler for rewriting rule priorities.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{CommandMetadata, RuleId};
use crate::domain::rules::RuleError;
use crate::ports::RuleRepository;

/// Command to assign priorities from list position: the first rule gets
/// priority 0, the next 1, and so on.
#[derive(Debug, Clone)]
pub struct ReorderRulesCommand {
    pub rule_ids: Vec<RuleId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderRulesResult {
    pub updated: usize,
    /// IDs in the request that matched no rule.
    pub missing: Vec<RuleId>,
}

pub struct ReorderRulesHandler {
    repository: Arc<dyn RuleRepository>,
}

impl ReorderRulesHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ReorderRulesCommand,
        metadata: CommandMetadata,
    ) -> Result<ReorderRulesResult, RuleError> {
        let mut updated = 0;
        let mut missing = Vec::new();

        for (position, rule_id) in cmd.rule_ids.iter().enumerate() {
            let Some(mut rule) = self.repository.find_by_id(rule_id).await? else {
                missing.push(*rule_id);
                continue;
            };
            let priority = position as i64;
            if rule.priority() != priority {
                rule.set_priority(priority);
                self.repository.update(&rule).await?;
                updated += 1;
            }
        }

        if !missing.is_empty() {
            tracing::warn!(
                correlation_id = %metadata.correlation_id(),
                missing = missing.len(),
                "reorder referenced unknown rules"
            );
        }
        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            updated,
            "rules reordered"
        );
        Ok(ReorderRulesResult { updated, missing })
    }
}
