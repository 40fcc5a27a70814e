//! DeleteRuleHandler - Command handler for removing a rule.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, RuleId};
use crate::domain::rules::RuleError;
use crate::ports::RuleRepository;

#[derive(Debug, Clone)]
pub struct DeleteRuleCommand {
    pub rule_id: RuleId,
}

pub struct DeleteRuleHandler {
    repository: Arc<dyn RuleRepository>,
}

impl DeleteRuleHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: DeleteRuleCommand,
        metadata: CommandMetadata,
    ) -> Result<(), RuleError> {
        self.repository.delete(&cmd.rule_id).await?;
        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            rule_id = %cmd.rule_id,
            "rule deleted"
        );
        Ok(())
    }
}
