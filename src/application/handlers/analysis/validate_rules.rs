//! ValidateRulesHandler - Query handler for rule-base validation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::analysis::{RuleBaseValidator, ValidationReport};
use crate::domain::foundation::Category;
use crate::domain::rules::{RuleError, RuleSet};
use crate::ports::{QuestionPriorityRepository, RuleRepository};

#[derive(Debug, Clone)]
pub struct ValidateRulesQuery {
    pub category: Category,
}

pub struct ValidateRulesHandler {
    rules: Arc<dyn RuleRepository>,
    questions: Arc<dyn QuestionPriorityRepository>,
}

impl ValidateRulesHandler {
    pub fn new(
        rules: Arc<dyn RuleRepository>,
        questions: Arc<dyn QuestionPriorityRepository>,
    ) -> Self {
        Self { rules, questions }
    }

    /// Validates the category's rules (shared rules included).
    ///
    /// Declared questions come from the question catalog. A category whose
    /// catalog is still empty treats every unproduced condition as declared.
    ///
    /// # Limitations
    ///
    /// Unreachable-rule detection is only as strict as the catalog. With an
    /// empty catalog a condition nothing produces (a typo, say) counts as a
    /// question, so its rule is never reported. Question priority
    /// initialization writes those same labels into the catalog, so the rule
    /// stays unreported until the stray entry is removed from the catalog.
    pub async fn handle(&self, query: ValidateRulesQuery) -> Result<ValidationReport, RuleError> {
        let rules = self.rules.list(Some(&query.category)).await?;
        let catalog = self.questions.list(&query.category).await?;

        let declared: HashSet<String> = if catalog.is_empty() {
            let set = RuleSet::compile(query.category.clone(), &rules);
            set.askable_labels()
                .iter()
                .map(|&label| set.label(label).to_string())
                .collect()
        } else {
            catalog.iter().map(|entry| entry.question().to_string()).collect()
        };

        let report = RuleBaseValidator::validate(&query.category, &rules, &declared);
        tracing::info!(
            category = %query.category,
            status = ?report.status,
            errors = report.error_count,
            warnings = report.warning_count,
            "rule base validated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryQuestionPriorityRepository, InMemoryRuleRepository};
    use crate::domain::analysis::ValidationStatus;
    use crate::domain::foundation::RuleId;
    use crate::domain::rules::{ConditionLogic, QuestionPriority, Rule, RuleDraft, RuleKind};

    fn rule(name: &str, conditions: &[&str], actions: &[&str], priority: i64) -> Rule {
        Rule::new(
            RuleId::new(),
            RuleDraft {
                name: name.to_string(),
                category: Category::new("E").unwrap(),
                kind: RuleKind::Terminal,
                logic: ConditionLogic::All,
                conditions: conditions.iter().map(|s| s.to_string()).collect(),
                actions: actions.iter().map(|s| s.to_string()).collect(),
                priority,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn catalog_questions_drive_reachability() {
        let rules = Arc::new(InMemoryRuleRepository::new());
        rules.save(&rule("R1", &["a"], &["ok"], 0)).await.unwrap();
        rules.save(&rule("R3", &["undefined_label"], &["y"], 1)).await.unwrap();
        let questions = Arc::new(InMemoryQuestionPriorityRepository::new());
        questions
            .save(&QuestionPriority::new(Category::new("E").unwrap(), "a", 0).unwrap())
            .await
            .unwrap();

        let report = ValidateRulesHandler::new(rules, questions)
            .handle(ValidateRulesQuery {
                category: Category::new("E").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(report.status, ValidationStatus::Warning);
        assert_eq!(report.unreachable_rules.len(), 1);
        assert_eq!(report.unreachable_rules[0].rule_name, "R3");
    }

    #[tokio::test]
    async fn empty_catalog_cannot_flag_undeclared_labels() {
        let rules = Arc::new(InMemoryRuleRepository::new());
        rules.save(&rule("R1", &["a"], &["ok"], 0)).await.unwrap();
        rules.save(&rule("R3", &["undefined_label"], &["y"], 1)).await.unwrap();

        let report = ValidateRulesHandler::new(rules, Arc::new(InMemoryQuestionPriorityRepository::new()))
            .handle(ValidateRulesQuery {
                category: Category::new("E").unwrap(),
            })
            .await
            .unwrap();

        assert!(report.unreachable_rules.is_empty());
    }

    #[tokio::test]
    async fn empty_catalog_accepts_every_leaf() {
        let rules = Arc::new(InMemoryRuleRepository::new());
        rules.save(&rule("R1", &["a"], &["ok"], 0)).await.unwrap();

        let report = ValidateRulesHandler::new(rules, Arc::new(InMemoryQuestionPriorityRepository::new()))
            .handle(ValidateRulesQuery {
                category: Category::new("E").unwrap(),
            })
            .await
            .unwrap();

        assert!(report.is_ok());
    }
}
