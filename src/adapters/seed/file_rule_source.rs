//! File-based Rule Source Adapter
//!
//! Reads rule drafts from YAML (`.yaml`/`.yml`) or JSON (`.json`) files.
//! A file holds either a bare list of rules or a document with a `rules`
//! key, which is the shape of the export endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::domain::rules::RuleDraft;
use crate::ports::{RuleSource, RuleSourceError};

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleFile {
    List(Vec<RuleDraft>),
    Document { rules: Vec<RuleDraft> },
}

impl RuleFile {
    fn into_drafts(self) -> Vec<RuleDraft> {
        match self {
            RuleFile::List(rules) | RuleFile::Document { rules } => rules,
        }
    }
}

/// Loads seed rules from disk
#[derive(Debug, Clone, Default)]
pub struct FileRuleSource;

impl FileRuleSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse file content according to the file extension
    pub fn parse(path: &Path, content: &str) -> Result<Vec<RuleDraft>, RuleSourceError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let file: RuleFile = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(content)
                .map_err(|e| RuleSourceError::ParseFailed(e.to_string()))?,
            "json" => serde_json::from_str(content)
                .map_err(|e| RuleSourceError::ParseFailed(e.to_string()))?,
            other => return Err(RuleSourceError::UnsupportedFormat(other.to_string())),
        };
        Ok(file.into_drafts())
    }
}

#[async_trait]
impl RuleSource for FileRuleSource {
    async fn load(&self, path: &Path) -> Result<Vec<RuleDraft>, RuleSourceError> {
        if !path.exists() {
            return Err(RuleSourceError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RuleSourceError::IoError(e.to_string()))?;

        let drafts = Self::parse(path, &content)?;
        tracing::info!(path = %path.display(), count = drafts.len(), "loaded seed rules");
        Ok(drafts)
    }
}
