//! In-Memory Question Catalog Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{Category, DomainError, ErrorCode, QuestionId};
use crate::domain::rules::QuestionPriority;
use crate::ports::QuestionPriorityRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionPriorityRepository {
    entries: Arc<RwLock<HashMap<QuestionId, QuestionPriority>>>,
}

impl InMemoryQuestionPriorityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionPriorityRepository for InMemoryQuestionPriorityRepository {
    async fn list(&self, category: &Category) -> Result<Vec<QuestionPriority>, DomainError> {
        let entries = self.entries.read().await;
        let mut listed: Vec<QuestionPriority> = entries
            .values()
            .filter(|entry| entry.category() == category)
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| a.question().cmp(b.question()))
        });
        Ok(listed)
    }

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<QuestionPriority>, DomainError> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn save(&self, entry: &QuestionPriority) -> Result<(), DomainError> {
        self.entries.write().await.insert(*entry.id(), entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &QuestionPriority) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(entry.id()) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("Question priority not found: {}", entry.id()),
            )
            .with_detail("id", entry.id().to_string())),
        }
    }
}
