//! ListQuestionsHandler - Query handler for a category's question catalog
//! view: its rules plus every condition label they test.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::Category;
use crate::domain::rules::{Rule, RuleError};
use crate::ports::RuleRepository;

#[derive(Debug, Clone)]
pub struct ListQuestionsQuery {
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionEntry {
    pub question: String,
    /// False when some rule derives the label, so it is never asked.
    pub askable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionCatalogView {
    pub category: Category,
    pub rules: Vec<Rule>,
    pub questions: Vec<QuestionEntry>,
}

pub struct ListQuestionsHandler {
    repository: Arc<dyn RuleRepository>,
}

impl ListQuestionsHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    /// Condition labels come in first-occurrence order over the rules in
    /// priority order.
    pub async fn handle(&self, query: ListQuestionsQuery) -> Result<QuestionCatalogView, RuleError> {
        let rules = self.repository.list(Some(&query.category)).await?;

        let produced: HashSet<&str> = rules
            .iter()
            .flat_map(|rule| rule.actions().iter().map(String::as_str))
            .collect();
        let mut seen = HashSet::new();
        let questions = rules
            .iter()
            .flat_map(|rule| rule.conditions().iter())
            .filter(|label| seen.insert(label.as_str()))
            .map(|label| QuestionEntry {
                question: label.clone(),
                askable: !produced.contains(label.as_str()),
            })
            .collect();

        Ok(QuestionCatalogView {
            category: query.category,
            rules,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRuleRepository;
    use crate::domain::foundation::RuleId;
    use crate::domain::rules::{ConditionLogic, RuleDraft, RuleKind};

    #[tokio::test]
    async fn derived_labels_are_not_askable() {
        let repo = Arc::new(InMemoryRuleRepository::new());
        for (name, kind, conditions, actions, priority) in [
            ("R1", RuleKind::Intermediate, vec!["a"], vec!["x"], 0),
            ("R2", RuleKind::Terminal, vec!["x", "a", "b"], vec!["ok"], 1),
        ] {
            let rule = Rule::new(
                RuleId::new(),
                RuleDraft {
                    name: name.to_string(),
                    category: Category::new("E").unwrap(),
                    kind,
                    logic: ConditionLogic::All,
                    conditions: conditions.into_iter().map(String::from).collect(),
                    actions: actions.into_iter().map(String::from).collect(),
                    priority,
                },
            )
            .unwrap();
            repo.save(&rule).await.unwrap();
        }

        let view = ListQuestionsHandler::new(repo)
            .handle(ListQuestionsQuery {
                category: Category::new("E").unwrap(),
            })
            .await
            .unwrap();

        let entries: Vec<(&str, bool)> = view
            .questions
            .iter()
            .map(|q| (q.question.as_str(), q.askable))
            .collect();
        assert_eq!(entries, vec![("a", true), ("x", false), ("b", true)]);
        assert_eq!(view.rules.len(), 2);
    }
}
