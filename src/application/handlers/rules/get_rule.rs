//! GetRuleHandler - Query handler for a single rule.

use std::sync::Arc;

use crate::domain::foundation::RuleId;
use crate::domain::rules::{Rule, RuleError};
use crate::ports::RuleRepository;

#[derive(Debug, Clone)]
pub struct GetRuleQuery {
    pub rule_id: RuleId,
}

pub struct GetRuleHandler {
    repository: Arc<dyn RuleRepository>,
}

impl GetRuleHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetRuleQuery) -> Result<Rule, RuleError> {
        self.repository
            .find_by_id(&query.rule_id)
            .await?
            .ok_or_else(|| RuleError::not_found(query.rule_id))
    }
}
