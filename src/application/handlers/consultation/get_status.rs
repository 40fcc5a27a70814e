//! GetConsultationStatusHandler - Query handler for session state.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, StatusView};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::session_loader::find_session;

#[derive(Debug, Clone)]
pub struct GetConsultationStatusQuery {
    pub session_id: SessionId,
}

pub struct GetConsultationStatusHandler {
    sessions: Arc<dyn SessionStore>,
}

impl GetConsultationStatusHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        query: GetConsultationStatusQuery,
    ) -> Result<StatusView, ConsultationError> {
        let handle = find_session(self.sessions.as_ref(), &query.session_id).await?;
        let consultation = handle.lock().await;
        Ok(consultation.status_view())
    }
}
