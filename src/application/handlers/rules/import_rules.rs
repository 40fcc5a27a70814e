//! ImportRulesHandler - Command handler for bulk rule import.
//!
//! Entries are processed one by one; a bad entry is reported in `errors`
//! and does not abort the rest of the import.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{CommandMetadata, RuleId};
use crate::domain::rules::{Rule, RuleDraft, RuleError};
use crate::ports::RuleRepository;

#[derive(Debug, Clone)]
pub struct ImportRulesCommand {
    /// Raw entries, parsed individually so one bad entry cannot fail the
    /// whole batch.
    pub rules: Vec<serde_json::Value>,
    /// Replace rules whose name already exists in the category.
    pub overwrite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

enum Imported {
    Created,
    Replaced,
    Skipped,
}

pub struct ImportRulesHandler {
    repository: Arc<dyn RuleRepository>,
}

impl ImportRulesHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ImportRulesCommand,
        metadata: CommandMetadata,
    ) -> Result<ImportSummary, RuleError> {
        let entries = cmd
            .rules
            .into_iter()
            .map(|entry| {
                let name = entry
                    .get("name")
                    .and_then(|name| name.as_str())
                    .unwrap_or("unknown")
                    .to_string();
                let draft = serde_json::from_value::<RuleDraft>(entry)
                    .map_err(|e| RuleError::malformed(&name, e.to_string()));
                (name, draft)
            })
            .collect();
        let summary = self.import_entries(entries, cmd.overwrite).await;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            imported = summary.imported,
            updated = summary.updated,
            skipped = summary.skipped,
            errors = summary.errors.len(),
            "rules imported"
        );
        Ok(summary)
    }

    /// Imports already-parsed drafts, as read from a seed file.
    pub async fn import_drafts(&self, drafts: Vec<RuleDraft>, overwrite: bool) -> ImportSummary {
        let entries = drafts
            .into_iter()
            .map(|draft| (draft.name.clone(), Ok(draft)))
            .collect();
        self.import_entries(entries, overwrite).await
    }

    async fn import_entries(
        &self,
        entries: Vec<(String, Result<RuleDraft, RuleError>)>,
        overwrite: bool,
    ) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for (name, draft) in entries {
            let result = match draft {
                Ok(draft) => self.import_one(draft, overwrite).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(Imported::Created) => summary.imported += 1,
                Ok(Imported::Replaced) => summary.updated += 1,
                Ok(Imported::Skipped) => summary.skipped += 1,
                Err(RuleError::Malformed { reason, .. }) => {
                    summary.errors.push(format!("Rule {}: {}", name, reason))
                }
                Err(err) => summary.errors.push(format!("Rule {}: {}", name, err)),
            }
        }

        summary
    }

    async fn import_one(&self, draft: RuleDraft, overwrite: bool) -> Result<Imported, RuleError> {
        let existing = self
            .repository
            .find_by_name(&draft.category, &draft.name)
            .await?;

        match existing {
            Some(_) if !overwrite => Ok(Imported::Skipped),
            Some(mut rule) => {
                rule.replace_with(draft)?;
                self.repository.update(&rule).await?;
                Ok(Imported::Replaced)
            }
            None => {
                let rule = Rule::new(RuleId::new(), draft)?;
                self.repository.save(&rule).await?;
                Ok(Imported::Created)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRuleRepository;
    use crate::domain::foundation::Category;
    use serde_json::json;

    fn entry(name: &str, priority: i64) -> serde_json::Value {
        json!({
            "name": name,
            "visa_type": "E",
            "rule_type": "#n!",
            "condition_logic": "AND",
            "conditions": ["a"],
            "actions": ["ok"],
            "priority": priority,
        })
    }

    #[tokio::test]
    async fn import_counts_each_outcome() {
        let repo = Arc::new(InMemoryRuleRepository::new());
        let handler = ImportRulesHandler::new(repo.clone());

        let first = handler
            .handle(
                ImportRulesCommand {
                    rules: vec![entry("R1", 0), json!({"name": "Broken"})],
                    overwrite: false,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap();
        assert_eq!(first.imported, 1);
        assert_eq!(first.errors.len(), 1);
        assert!(first.errors[0].contains("Broken"));

        let second = handler
            .handle(
                ImportRulesCommand {
                    rules: vec![entry("R1", 5)],
                    overwrite: false,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap();
        assert_eq!(second.skipped, 1);

        let third = handler
            .handle(
                ImportRulesCommand {
                    rules: vec![entry("R1", 5)],
                    overwrite: true,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap();
        assert_eq!(third.updated, 1);

        let stored = repo
            .find_by_name(&Category::new("E").unwrap(), "R1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.priority(), 5);
    }
}
