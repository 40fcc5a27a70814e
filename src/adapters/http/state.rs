//! Shared state for the HTTP adapter.

use std::sync::Arc;

use crate::adapters::memory::{
    InMemoryQuestionPriorityRepository, InMemoryRuleRepository, InMemorySessionStore,
};
use crate::application::handlers::analysis::{
    AutoFixPrioritiesHandler, InitializeQuestionPrioritiesHandler, ListQuestionPrioritiesHandler,
    UpdateQuestionPriorityHandler, ValidateRulesHandler,
};
use crate::application::handlers::consultation::{
    AnswerQuestionHandler, EndConsultationHandler, GetConsultationStatusHandler,
    GetCurrentQuestionHandler, GoBackHandler, PurgeIdleSessionsHandler, ResetConsultationHandler,
    SkipQuestionHandler, StartConsultationHandler,
};
use crate::application::handlers::rules::{
    CreateRuleHandler, DeleteRuleHandler, ExportRulesHandler, GetRuleHandler, ImportRulesHandler,
    ListCategoriesHandler, ListQuestionsHandler, ListRulesHandler, ReorderRulesHandler,
    UpdateRuleHandler,
};
use crate::ports::{QuestionPriorityRepository, RuleRepository, SessionStore};

/// Ports shared by every request. Handlers are built per request.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<dyn RuleRepository>,
    pub questions: Arc<dyn QuestionPriorityRepository>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
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

    /// State backed entirely by the in-memory adapters.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryRuleRepository::new()),
            Arc::new(InMemoryQuestionPriorityRepository::new()),
            Arc::new(InMemorySessionStore::new()),
        )
    }

    // ── Consultation ──────────────────────────────────────────────────────

    pub fn start_consultation_handler(&self) -> StartConsultationHandler {
        StartConsultationHandler::new(
            self.rules.clone(),
            self.questions.clone(),
            self.sessions.clone(),
        )
    }

    pub fn answer_question_handler(&self) -> AnswerQuestionHandler {
        AnswerQuestionHandler::new(self.sessions.clone())
    }

    pub fn skip_question_handler(&self) -> SkipQuestionHandler {
        SkipQuestionHandler::new(self.sessions.clone())
    }

    pub fn go_back_handler(&self) -> GoBackHandler {
        GoBackHandler::new(self.sessions.clone())
    }

    pub fn reset_handler(&self) -> ResetConsultationHandler {
        ResetConsultationHandler::new(self.sessions.clone())
    }

    pub fn end_consultation_handler(&self) -> EndConsultationHandler {
        EndConsultationHandler::new(self.sessions.clone())
    }

    pub fn purge_idle_sessions_handler(&self) -> PurgeIdleSessionsHandler {
        PurgeIdleSessionsHandler::new(self.sessions.clone())
    }

    pub fn status_handler(&self) -> GetConsultationStatusHandler {
        GetConsultationStatusHandler::new(self.sessions.clone())
    }

    pub fn current_question_handler(&self) -> GetCurrentQuestionHandler {
        GetCurrentQuestionHandler::new(self.sessions.clone())
    }

    // ── Rules ─────────────────────────────────────────────────────────────

    pub fn list_rules_handler(&self) -> ListRulesHandler {
        ListRulesHandler::new(self.rules.clone())
    }

    pub fn list_categories_handler(&self) -> ListCategoriesHandler {
        ListCategoriesHandler::new(self.rules.clone())
    }

    pub fn get_rule_handler(&self) -> GetRuleHandler {
        GetRuleHandler::new(self.rules.clone())
    }

    pub fn create_rule_handler(&self) -> CreateRuleHandler {
        CreateRuleHandler::new(self.rules.clone())
    }

    pub fn update_rule_handler(&self) -> UpdateRuleHandler {
        UpdateRuleHandler::new(self.rules.clone())
    }

    pub fn delete_rule_handler(&self) -> DeleteRuleHandler {
        DeleteRuleHandler::new(self.rules.clone())
    }

    pub fn reorder_rules_handler(&self) -> ReorderRulesHandler {
        ReorderRulesHandler::new(self.rules.clone())
    }

    pub fn export_rules_handler(&self) -> ExportRulesHandler {
        ExportRulesHandler::new(self.rules.clone())
    }

    pub fn import_rules_handler(&self) -> ImportRulesHandler {
        ImportRulesHandler::new(self.rules.clone())
    }

    pub fn list_questions_handler(&self) -> ListQuestionsHandler {
        ListQuestionsHandler::new(self.rules.clone())
    }

    // ── Analysis ──────────────────────────────────────────────────────────

    pub fn validate_handler(&self) -> ValidateRulesHandler {
        ValidateRulesHandler::new(self.rules.clone(), self.questions.clone())
    }

    pub fn auto_fix_handler(&self) -> AutoFixPrioritiesHandler {
        AutoFixPrioritiesHandler::new(self.rules.clone(), self.validate_handler())
    }

    pub fn initialize_priorities_handler(&self) -> InitializeQuestionPrioritiesHandler {
        InitializeQuestionPrioritiesHandler::new(self.rules.clone(), self.questions.clone())
    }

    pub fn list_question_priorities_handler(&self) -> ListQuestionPrioritiesHandler {
        ListQuestionPrioritiesHandler::new(self.questions.clone())
    }

    pub fn update_question_priority_handler(&self) -> UpdateQuestionPriorityHandler {
        UpdateQuestionPriorityHandler::new(self.questions.clone())
    }
}
