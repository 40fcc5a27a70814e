//! Consultation command and query handlers.

mod answer_question;
mod end_consultation;
mod get_current_question;
mod get_status;
mod go_back;
mod purge_idle_sessions;
mod reset_consultation;
mod session_loader;
mod skip_question;
mod start_consultation;

pub use answer_question::{AnswerQuestionCommand, AnswerQuestionHandler};
pub use end_consultation::{EndConsultationCommand, EndConsultationHandler};
pub use get_current_question::{GetCurrentQuestionHandler, GetCurrentQuestionQuery};
pub use get_status::{GetConsultationStatusHandler, GetConsultationStatusQuery};
pub use go_back::{GoBackCommand, GoBackHandler};
pub use purge_idle_sessions::{PurgeIdleSessionsCommand, PurgeIdleSessionsHandler};
pub use reset_consultation::{ResetConsultationCommand, ResetConsultationHandler};
pub use skip_question::{SkipQuestionCommand, SkipQuestionHandler};
pub use start_consultation::{
    StartConsultationCommand, StartConsultationHandler, StartConsultationResult,
};
