//! Analysis Module - Pure domain services over a rule base.
//!
//! # Components
//!
//! - `RuleBaseValidator` - Consistency, cycles, unreachable rules, dependency order
//! - `QuestionPriorityInitializer` - Ranks askable questions by how many conclusions need them
//! - `PriorityAutoFixer` - Plans priority changes that clear order violations
//!
//! All functions are pure and stateless. Persisting their results is the
//! application layer's job.

mod auto_fix;
mod priority_initializer;
mod report;
mod validator;

pub use auto_fix::{PriorityAutoFixer, PriorityChange};
pub use priority_initializer::{InitializationReport, QuestionPriorityInitializer, RankedQuestion};
pub use report::{
    CircularDependency, ConsistencyError, ConsistencyErrorKind, OrderViolation, UnreachableRule,
    ValidationReport, ValidationStatus,
};
pub use validator::RuleBaseValidator;
