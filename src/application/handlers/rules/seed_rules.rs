//! SeedRulesHandler - Loads a rule file into the rule store at startup.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::foundation::CommandMetadata;
use crate::domain::rules::RuleError;
use crate::ports::{RuleRepository, RuleSource};

use super::import_rules::{ImportRulesHandler, ImportSummary};

#[derive(Debug, Clone)]
pub struct SeedRulesCommand {
    pub path: PathBuf,
}

pub struct SeedRulesHandler {
    source: Arc<dyn RuleSource>,
    importer: ImportRulesHandler,
}

impl SeedRulesHandler {
    pub fn new(source: Arc<dyn RuleSource>, repository: Arc<dyn RuleRepository>) -> Self {
        Self {
            source,
            importer: ImportRulesHandler::new(repository),
        }
    }

    /// Rules already present by name are left alone, so seeding twice is
    /// harmless.
    pub async fn handle(
        &self,
        cmd: SeedRulesCommand,
        metadata: CommandMetadata,
    ) -> Result<ImportSummary, RuleError> {
        let drafts = self
            .source
            .load(&cmd.path)
            .await
            .map_err(|e| RuleError::infrastructure(e.to_string()))?;

        let summary = self.importer.import_drafts(drafts, false).await;
        for error in &summary.errors {
            tracing::warn!(path = %cmd.path.display(), %error, "seed rule rejected");
        }
        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            path = %cmd.path.display(),
            imported = summary.imported,
            skipped = summary.skipped,
            "rules seeded"
        );
        Ok(summary)
    }
}
