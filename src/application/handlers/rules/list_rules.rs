//! ListRulesHandler - Query handler for rules of a category.

use std::sync::Arc;

use crate::domain::foundation::Category;
use crate::domain::rules::{Rule, RuleError};
use crate::ports::RuleRepository;

#[derive(Debug, Clone, Default)]
pub struct ListRulesQuery {
    /// `None` lists every category.
    pub category: Option<Category>,
}

pub struct ListRulesHandler {
    repository: Arc<dyn RuleRepository>,
}

impl ListRulesHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    /// Rules in priority order; a category includes the shared rules.
    pub async fn handle(&self, query: ListRulesQuery) -> Result<Vec<Rule>, RuleError> {
        Ok(self.repository.list(query.category.as_ref()).await?)
    }
}

/// Lists the categories that have at least one rule.
pub struct ListCategoriesHandler {
    repository: Arc<dyn RuleRepository>,
}

impl ListCategoriesHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Category>, RuleError> {
        Ok(self.repository.categories().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRuleRepository;
    use crate::domain::foundation::RuleId;
    use crate::domain::rules::{ConditionLogic, RuleDraft, RuleKind};

    fn rule(name: &str, category: &str, priority: i64) -> Rule {
        Rule::new(
            RuleId::new(),
            RuleDraft {
                name: name.to_string(),
                category: Category::new(category).unwrap(),
                kind: RuleKind::Terminal,
                logic: ConditionLogic::All,
                conditions: vec!["a".to_string()],
                actions: vec!["ok".to_string()],
                priority,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn category_listing_includes_shared_rules() {
        let repo = Arc::new(InMemoryRuleRepository::new());
        repo.save(&rule("E1", "E", 1)).await.unwrap();
        repo.save(&rule("Common", "ALL", 0)).await.unwrap();
        repo.save(&rule("L1", "L", 0)).await.unwrap();

        let rules = ListRulesHandler::new(repo.clone())
            .handle(ListRulesQuery {
                category: Some(Category::new("E").unwrap()),
            })
            .await
            .unwrap();
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Common", "E1"]);

        let categories = ListCategoriesHandler::new(repo).handle().await.unwrap();
        assert_eq!(categories.len(), 3);
    }
}
