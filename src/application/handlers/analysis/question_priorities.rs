//! Question catalog query and command handlers.

use std::sync::Arc;

use crate::domain::foundation::{Category, CommandMetadata, QuestionId};
use crate::domain::rules::{QuestionPriority, RuleError};
use crate::ports::QuestionPriorityRepository;

#[derive(Debug, Clone)]
pub struct ListQuestionPrioritiesQuery {
    pub category: Category,
}

pub struct ListQuestionPrioritiesHandler {
    questions: Arc<dyn QuestionPriorityRepository>,
}

impl ListQuestionPrioritiesHandler {
    pub fn new(questions: Arc<dyn QuestionPriorityRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(
        &self,
        query: ListQuestionPrioritiesQuery,
    ) -> Result<Vec<QuestionPriority>, RuleError> {
        Ok(self.questions.list(&query.category).await?)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateQuestionPriorityCommand {
    pub question_id: QuestionId,
    pub priority: i64,
}

pub struct UpdateQuestionPriorityHandler {
    questions: Arc<dyn QuestionPriorityRepository>,
}

impl UpdateQuestionPriorityHandler {
    pub fn new(questions: Arc<dyn QuestionPriorityRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(
        &self,
        cmd: UpdateQuestionPriorityCommand,
        metadata: CommandMetadata,
    ) -> Result<QuestionPriority, RuleError> {
        let mut entry = self
            .questions
            .find_by_id(&cmd.question_id)
            .await?
            .ok_or_else(|| RuleError::question_not_found(cmd.question_id))?;

        entry.set_priority(cmd.priority);
        self.questions.update(&entry).await?;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            question_id = %cmd.question_id,
            priority = cmd.priority,
            "question priority updated"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryQuestionPriorityRepository;

    #[tokio::test]
    async fn update_changes_priority() {
        let repo = Arc::new(InMemoryQuestionPriorityRepository::new());
        let entry = QuestionPriority::new(Category::new("E").unwrap(), "a", 3).unwrap();
        repo.save(&entry).await.unwrap();

        let updated = UpdateQuestionPriorityHandler::new(repo.clone())
            .handle(
                UpdateQuestionPriorityCommand {
                    question_id: *entry.id(),
                    priority: 0,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap();
        assert_eq!(updated.priority(), 0);

        let listed = ListQuestionPrioritiesHandler::new(repo)
            .handle(ListQuestionPrioritiesQuery {
                category: Category::new("E").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(listed[0].priority(), 0);
    }

    #[tokio::test]
    async fn unknown_entry_is_not_found() {
        let id = QuestionId::new();
        let err = UpdateQuestionPriorityHandler::new(Arc::new(InMemoryQuestionPriorityRepository::new()))
            .handle(
                UpdateQuestionPriorityCommand {
                    question_id: id,
                    priority: 0,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, RuleError::question_not_found(id));
    }
}
