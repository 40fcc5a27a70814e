//! GetCurrentQuestionHandler - Query handler for the pending question.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, ConsultationOutcome};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::session_loader::find_session;

#[derive(Debug, Clone)]
pub struct GetCurrentQuestionQuery {
    pub session_id: SessionId,
}

pub struct GetCurrentQuestionHandler {
    sessions: Arc<dyn SessionStore>,
}

impl GetCurrentQuestionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// # Errors
    ///
    /// - `StuckSession` when only skipped questions could lead to a conclusion
    pub async fn handle(
        &self,
        query: GetCurrentQuestionQuery,
    ) -> Result<ConsultationOutcome, ConsultationError> {
        let handle = find_session(self.sessions.as_ref(), &query.session_id).await?;
        let consultation = handle.lock().await;
        consultation.current_question()
    }
}
