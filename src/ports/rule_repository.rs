//! Rule repository port.
//!
//! Defines the contract for storing the production rules of every
//! category. Implementations must serialize writes per category so that a
//! snapshot taken for compilation never observes a half-applied change.

use crate::domain::foundation::{Category, DomainError, RuleId};
use crate::domain::rules::Rule;
use async_trait::async_trait;

/// Repository port for rule persistence.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// List rules ordered by priority (ties keep insertion order).
    ///
    /// With a category, returns that category's rules plus the shared
    /// (`ALL`) rules. Without one, returns every rule.
    async fn list(&self, category: Option<&Category>) -> Result<Vec<Rule>, DomainError>;

    /// Find a rule by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &RuleId) -> Result<Option<Rule>, DomainError>;

    /// Find a rule by name within exactly `category` (shared rules are not
    /// consulted).
    async fn find_by_name(
        &self,
        category: &Category,
        name: &str,
    ) -> Result<Option<Rule>, DomainError>;

    /// Save a new rule.
    ///
    /// # Errors
    ///
    /// - `DuplicateRuleName` if the category already has a rule with that name
    async fn save(&self, rule: &Rule) -> Result<(), DomainError>;

    /// Update an existing rule, moving it between categories if needed.
    ///
    /// # Errors
    ///
    /// - `RuleNotFound` if the rule doesn't exist
    /// - `DuplicateRuleName` if the new name clashes in the target category
    async fn update(&self, rule: &Rule) -> Result<(), DomainError>;

    /// Delete a rule.
    ///
    /// # Errors
    ///
    /// - `RuleNotFound` if the rule doesn't exist
    async fn delete(&self, id: &RuleId) -> Result<(), DomainError>;

    /// Categories that currently hold at least one rule.
    async fn categories(&self) -> Result<Vec<Category>, DomainError>;
}
