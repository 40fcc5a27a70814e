//! AnswerQuestionHandler - Command handler for answering a question.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, ConsultationOutcome};
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::ports::SessionStore;

use super::session_loader::find_session;

/// Command to answer one yes/no question.
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub session_id: SessionId,
    pub question: String,
    pub value: bool,
}

/// Handler for answering questions.
pub struct AnswerQuestionHandler {
    sessions: Arc<dyn SessionStore>,
}

impl AnswerQuestionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: AnswerQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<ConsultationOutcome, ConsultationError> {
        let handle = find_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let mut consultation = handle.lock().await;

        let outcome = consultation.answer(&cmd.question, cmd.value)?;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            session_id = %cmd.session_id,
            question = %cmd.question,
            value = cmd.value,
            status = ?outcome.status(),
            "question answered"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::consultation::{Consultation, QuestionOrder};
    use crate::domain::foundation::{Category, RuleId};
    use crate::domain::rules::{ConditionLogic, Rule, RuleDraft, RuleKind, RuleSet};

    async fn started_session(store: &InMemorySessionStore) -> SessionId {
        let rule = Rule::new(
            RuleId::new(),
            RuleDraft {
                name: "R1".to_string(),
                category: Category::new("E").unwrap(),
                kind: RuleKind::Terminal,
                logic: ConditionLogic::All,
                conditions: vec!["a".to_string()],
                actions: vec!["ok".to_string()],
                priority: 0,
            },
        )
        .unwrap();
        let set = Arc::new(RuleSet::compile(Category::new("E").unwrap(), &[rule]));
        let mut consultation = Consultation::new(SessionId::new(), set, QuestionOrder::default());
        consultation.start().unwrap();
        let id = *consultation.id();
        store.get_or_insert(consultation).await.unwrap();
        id
    }

    #[tokio::test]
    async fn answer_completes_single_rule_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session_id = started_session(&store).await;
        let handler = AnswerQuestionHandler::new(store);

        let outcome = handler
            .handle(
                AnswerQuestionCommand {
                    session_id,
                    question: "a".to_string(),
                    value: true,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, ConsultationOutcome::Completed { .. }));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = AnswerQuestionHandler::new(Arc::new(InMemorySessionStore::new()));
        let session_id = SessionId::new();

        let err = handler
            .handle(
                AnswerQuestionCommand {
                    session_id,
                    question: "a".to_string(),
                    value: true,
                },
                CommandMetadata::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ConsultationError::session_not_found(session_id));
    }
}
