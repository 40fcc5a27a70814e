//! ExportRulesHandler - Query handler for the rule export document.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{Category, Timestamp};
use crate::domain::rules::{RuleDraft, RuleError};
use crate::ports::RuleRepository;

/// Version tag of the export document layout.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default)]
pub struct ExportRulesQuery {
    pub category: Option<Category>,
}

/// Export document. `rules` is accepted back by the import command and by
/// seed rule files.
#[derive(Debug, Clone, Serialize)]
pub struct RuleExport {
    pub version: String,
    pub exported_at: Timestamp,
    pub category: Category,
    pub rules: Vec<RuleDraft>,
}

pub struct ExportRulesHandler {
    repository: Arc<dyn RuleRepository>,
}

impl ExportRulesHandler {
    pub fn new(repository: Arc<dyn RuleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ExportRulesQuery) -> Result<RuleExport, RuleError> {
        let rules = self.repository.list(query.category.as_ref()).await?;
        Ok(RuleExport {
            version: EXPORT_FORMAT_VERSION.to_string(),
            exported_at: Timestamp::now(),
            category: query.category.unwrap_or_else(Category::shared),
            rules: rules.iter().map(|rule| rule.to_draft()).collect(),
        })
    }
}
