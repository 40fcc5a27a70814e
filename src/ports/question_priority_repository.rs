//! Question catalog port.

use crate::domain::foundation::{Category, DomainError, QuestionId};
use crate::domain::rules::QuestionPriority;
use async_trait::async_trait;

/// Repository port for the per-category question catalog.
#[async_trait]
pub trait QuestionPriorityRepository: Send + Sync {
    /// Catalog entries of a category, ordered by priority.
    async fn list(&self, category: &Category) -> Result<Vec<QuestionPriority>, DomainError>;

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<QuestionPriority>, DomainError>;

    /// Save a new entry.
    async fn save(&self, entry: &QuestionPriority) -> Result<(), DomainError>;

    /// Update an existing entry.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the entry doesn't exist
    async fn update(&self, entry: &QuestionPriority) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_priority_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn QuestionPriorityRepository) {}
    }
}
