//! Rule-base analysis command and query handlers.

mod auto_fix_priorities;
mod initialize_priorities;
mod question_priorities;
mod validate_rules;

pub use auto_fix_priorities::{AutoFixPrioritiesCommand, AutoFixPrioritiesHandler, AutoFixResult};
pub use initialize_priorities::{
    InitializeQuestionPrioritiesCommand, InitializeQuestionPrioritiesHandler,
};
pub use question_priorities::{
    ListQuestionPrioritiesHandler, ListQuestionPrioritiesQuery, UpdateQuestionPriorityCommand,
    UpdateQuestionPriorityHandler,
};
pub use validate_rules::{ValidateRulesHandler, ValidateRulesQuery};
