//! SkipQuestionHandler - Command handler for skipping a question.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, ConsultationOutcome};
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::ports::SessionStore;

use super::session_loader::find_session;

/// Command to skip a question without answering it.
#[derive(Debug, Clone)]
pub struct SkipQuestionCommand {
    pub session_id: SessionId,
    pub question: String,
}

pub struct SkipQuestionHandler {
    sessions: Arc<dyn SessionStore>,
}

impl SkipQuestionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: SkipQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<ConsultationOutcome, ConsultationError> {
        let handle = find_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let mut consultation = handle.lock().await;

        let outcome = consultation.skip(&cmd.question)?;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            session_id = %cmd.session_id,
            question = %cmd.question,
            status = ?outcome.status(),
            "question skipped"
        );
        Ok(outcome)
    }
}
