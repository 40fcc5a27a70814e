//! StartConsultationHandler - Command handler for starting a consultation.

use std::sync::Arc;

use crate::domain::consultation::{Consultation, ConsultationError, ConsultationOutcome};
use crate::domain::foundation::{Category, CommandMetadata, SessionId};
use crate::ports::{QuestionPriorityRepository, RuleRepository, SessionStore};

use super::session_loader::compile_snapshot;

/// Command to start (or restart) a consultation for a category.
#[derive(Debug, Clone)]
pub struct StartConsultationCommand {
    pub category: Category,
    /// Restart this session instead of creating a new one.
    pub session_id: Option<SessionId>,
}

#[derive(Debug, Clone)]
pub struct StartConsultationResult {
    pub session_id: SessionId,
    pub outcome: ConsultationOutcome,
}

/// Handler for starting consultations.
///
/// Restarting an existing session waits for any command already running on
/// it. Each start compiles a fresh snapshot of the category's rules; rule
/// edits made afterwards do not affect the running session.
pub struct StartConsultationHandler {
    rules: Arc<dyn RuleRepository>,
    questions: Arc<dyn QuestionPriorityRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl StartConsultationHandler {
    pub fn new(
        rules: Arc<dyn RuleRepository>,
        questions: Arc<dyn QuestionPriorityRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            rules,
            questions,
            sessions,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartConsultationCommand,
        metadata: CommandMetadata,
    ) -> Result<StartConsultationResult, ConsultationError> {
        // 1. Snapshot rules and question order
        let (rule_set, order) =
            compile_snapshot(self.rules.as_ref(), self.questions.as_ref(), &cmd.category).await?;

        // 2. Find or create the session; an existing one is restarted in
        //    place under its own lock
        let session_id = cmd.session_id.unwrap_or_default();
        let handle = self
            .sessions
            .get_or_insert(Consultation::new(session_id, rule_set.clone(), order.clone()))
            .await?;

        // 3. Run the engine until it needs input or concludes. A failed start
        //    stays stored so its ERROR status remains visible
        let started = handle.lock().await.restart(rule_set, order);

        let outcome = started.map_err(|err| {
            tracing::warn!(
                correlation_id = %metadata.correlation_id(),
                session_id = %session_id,
                category = %cmd.category,
                error = %err,
                "consultation failed to start"
            );
            err
        })?;

        tracing::info!(
            correlation_id = %metadata.correlation_id(),
            session_id = %session_id,
            category = %cmd.category,
            status = ?outcome.status(),
            "consultation started"
        );

        Ok(StartConsultationResult {
            session_id,
            outcome,
        })
    }
}
