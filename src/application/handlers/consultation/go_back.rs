//! GoBackHandler - Command handler for undoing the last answer or skip.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, ConsultationOutcome};
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::ports::SessionStore;

use super::session_loader::find_session;

#[derive(Debug, Clone)]
pub struct GoBackCommand {
    pub session_id: SessionId,
}

pub struct GoBackHandler {
    sessions: Arc<dyn SessionStore>,
}

impl GoBackHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: GoBackCommand,
        metadata: CommandMetadata,
    ) -> Result<ConsultationOutcome, ConsultationError> {
        let handle = find_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let mut consultation = handle.lock().await;

        let outcome = consultation.go_back()?;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            session_id = %cmd.session_id,
            history_depth = consultation.history_depth(),
            "consultation stepped back"
        );
        Ok(outcome)
    }
}
