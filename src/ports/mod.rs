//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `RuleRepository` - Production rules per category
//! - `QuestionPriorityRepository` - Question catalog per category
//! - `SessionStore` - Live consultation sessions, one mutex each
//!
//! ## Loading Ports
//!
//! - `RuleSource` - Seed rule files read at startup

mod question_priority_repository;
mod rule_repository;
mod rule_source;
mod session_store;

pub use question_priority_repository::QuestionPriorityRepository;
pub use rule_repository::RuleRepository;
pub use rule_source::{RuleSource, RuleSourceError};
pub use session_store::{SessionHandle, SessionStore};
