//! ResetConsultationHandler - Command handler for clearing a consultation.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, StatusView};
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::ports::SessionStore;

use super::session_loader::find_session;

#[derive(Debug, Clone)]
pub struct ResetConsultationCommand {
    pub session_id: SessionId,
}

pub struct ResetConsultationHandler {
    sessions: Arc<dyn SessionStore>,
}

impl ResetConsultationHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Returns the cleared session state.
    pub async fn handle(
        &self,
        cmd: ResetConsultationCommand,
        metadata: CommandMetadata,
    ) -> Result<StatusView, ConsultationError> {
        let handle = find_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let mut consultation = handle.lock().await;

        consultation.reset();

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            session_id = %cmd.session_id,
            "consultation reset"
        );
        Ok(consultation.status_view())
    }
}
