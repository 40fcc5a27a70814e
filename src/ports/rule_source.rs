//! Rule Source Port - Interface for loading seed rule files.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::rules::RuleDraft;

/// Errors that can occur while reading a rule file
#[derive(Debug, thiserror::Error)]
pub enum RuleSourceError {
    #[error("Rule file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to parse rule file: {0}")]
    ParseFailed(String),

    #[error("Unsupported rule file format: {0}")]
    UnsupportedFormat(String),
}

/// Port for reading rule drafts from an external file
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Read every rule draft in the file at `path`
    ///
    /// # Errors
    /// Returns `RuleSourceError` if the file is missing or malformed
    async fn load(&self, path: &Path) -> Result<Vec<RuleDraft>, RuleSourceError>;
}
