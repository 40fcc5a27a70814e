//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the consultation domain.

mod command;
mod consultation_status;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use consultation_status::ConsultationStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{Category, QuestionId, RuleId, SessionId, SHARED_CATEGORY};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
