//! UpdateRuleHandler - Command handler for editing a rule.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, RuleId};
use crate::domain::rules::{Rule, RuleError, RulePatch};
use crate::ports::RuleRepository;

#[derive(Debug, Clone)]
pub struct UpdateRuleCommand {
    pub rule_id: RuleId,
    pub patch: RulePatch,
}

pub struct UpdateRuleHandler {
    repository: Arc<dyn RuleRepository>,
}

impl UpdateRuleHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateRuleCommand,
        metadata: CommandMetadata,
    ) -> Result<Rule, RuleError> {
        let mut rule = self
            .repository
            .find_by_id(&cmd.rule_id)
            .await?
            .ok_or_else(|| RuleError::not_found(cmd.rule_id))?;

        rule.apply(cmd.patch)?;
        self.repository.update(&rule).await?;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            rule_id = %rule.id(),
            rule = %rule.name(),
            "rule updated"
        );
        Ok(rule)
    }
}
