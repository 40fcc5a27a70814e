//! In-memory adapters for the storage ports.

mod question_priority_repository;
mod rule_repository;
mod session_store;

pub use question_priority_repository::InMemoryQuestionPriorityRepository;
pub use rule_repository::InMemoryRuleRepository;
pub use session_store::InMemorySessionStore;
