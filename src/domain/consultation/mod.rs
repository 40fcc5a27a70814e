//! Consultation domain module.
//!
//! The inference engine: a forward-chaining executor over a compiled rule
//! set, backward-chaining question selection from live conclusions, and a
//! snapshot-based undo stack, all owned by the `Consultation` aggregate.

mod aggregate;
mod errors;
mod executor;
mod history;
mod outcome;
mod question_selector;
mod reachability;
mod working_memory;

pub use aggregate::Consultation;
pub use errors::ConsultationError;
pub use executor::ForwardChainer;
pub use history::HistoryManager;
pub use outcome::{
    AnswerView, AppliedRuleView, ConditionView, ConsultationOutcome, ObservedCondition,
    ReasoningStep, StatusView,
};
pub use question_selector::{ChainLink, ConditionStatus, QuestionOrder, QuestionSelector, Selection};
pub use reachability::{Reachability, SkippedLabels};
pub use working_memory::{AnswerRecord, AppliedRule, SessionState, WorkingMemory};
