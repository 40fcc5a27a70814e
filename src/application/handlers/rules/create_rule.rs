//! CreateRuleHandler - Command handler for adding a rule.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, RuleId};
use crate::domain::rules::{Rule, RuleDraft, RuleError};
use crate::ports::RuleRepository;

#[derive(Debug, Clone)]
pub struct CreateRuleCommand {
    pub draft: RuleDraft,
}

pub struct CreateRuleHandler {
    repository: Arc<dyn RuleRepository>,
}

impl CreateRuleHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// - `Malformed` if the draft violates rule invariants
    /// - `DuplicateName` if the category already has a rule with that name
    pub async fn handle(
        &self,
        cmd: CreateRuleCommand,
        metadata: CommandMetadata,
    ) -> Result<Rule, RuleError> {
        let rule = Rule::new(RuleId::new(), cmd.draft)?;
        self.repository.save(&rule).await?;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            rule_id = %rule.id(),
            rule = %rule.name(),
            category = %rule.category(),
            "rule created"
        );
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRuleRepository;
    use crate::domain::foundation::Category;
    use crate::domain::rules::{ConditionLogic, RuleKind};

    fn draft(name: &str, conditions: Vec<String>) -> RuleDraft {
        RuleDraft {
            name: name.to_string(),
            category: Category::new("E").unwrap(),
            kind: RuleKind::Terminal,
            logic: ConditionLogic::All,
            conditions,
            actions: vec!["ok".to_string()],
            priority: 0,
        }
    }

    #[tokio::test]
    async fn creates_and_persists_rule() {
        let repo = Arc::new(InMemoryRuleRepository::new());
        let handler = CreateRuleHandler::new(repo.clone());

        let rule = handler
            .handle(
                CreateRuleCommand {
                    draft: draft("R1", vec!["a".to_string()]),
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap();

        assert_eq!(repo.find_by_id(rule.id()).await.unwrap(), Some(rule));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let handler = CreateRuleHandler::new(Arc::new(InMemoryRuleRepository::new()));
        let cmd = CreateRuleCommand {
            draft: draft("R1", vec!["a".to_string()]),
        };
        handler.handle(cmd.clone(), CommandMetadata::new()).await.unwrap();

        let err = handler.handle(cmd, CommandMetadata::new()).await.unwrap_err();
        assert!(matches!(err, RuleError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn empty_conditions_are_malformed() {
        let handler = CreateRuleHandler::new(Arc::new(InMemoryRuleRepository::new()));
        let err = handler
            .handle(
                CreateRuleCommand {
                    draft: draft("R1", vec![]),
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RuleError::Malformed { .. }));
    }
}
