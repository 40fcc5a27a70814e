//! EndConsultationHandler - Command handler for discarding a consultation.

use std::sync::Arc;

use crate::domain::consultation::ConsultationError;
use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::ports::SessionStore;

use super::session_loader::find_session;

#[derive(Debug, Clone)]
pub struct EndConsultationCommand {
    pub session_id: SessionId,
}

pub struct EndConsultationHandler {
    sessions: Arc<dyn SessionStore>,
}

impl EndConsultationHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Removes the session once any command running on it has finished.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no session has that ID
    pub async fn handle(
        &self,
        cmd: EndConsultationCommand,
        metadata: CommandMetadata,
    ) -> Result<(), ConsultationError> {
        let handle = find_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let _guard = handle.lock().await;

        if !self.sessions.remove(&cmd.session_id).await? {
            return Err(ConsultationError::session_not_found(cmd.session_id));
        }

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            session_id = %cmd.session_id,
            "consultation ended"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::consultation::{Consultation, QuestionOrder};
    use crate::domain::foundation::Category;
    use crate::domain::rules::RuleSet;

    async fn stored_session(store: &InMemorySessionStore) -> SessionId {
        let set = Arc::new(RuleSet::compile(Category::new("E").unwrap(), &[]));
        let consultation = Consultation::new(SessionId::new(), set, QuestionOrder::default());
        let id = *consultation.id();
        store.get_or_insert(consultation).await.unwrap();
        id
    }

    #[tokio::test]
    async fn ending_removes_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session_id = stored_session(&store).await;
        let handler = EndConsultationHandler::new(store.clone());

        handler
            .handle(EndConsultationCommand { session_id }, CommandMetadata::new())
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ending_twice_reports_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let session_id = stored_session(&store).await;
        let handler = EndConsultationHandler::new(store);
        let cmd = EndConsultationCommand { session_id };

        handler.handle(cmd.clone(), CommandMetadata::new()).await.unwrap();
        let err = handler.handle(cmd, CommandMetadata::new()).await.unwrap_err();

        assert_eq!(err, ConsultationError::session_not_found(session_id));
    }
}
