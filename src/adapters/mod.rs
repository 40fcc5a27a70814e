//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory rule store, question catalog and session store
//! - `seed` - Seed rule files read at startup
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod seed;

pub use memory::{InMemoryQuestionPriorityRepository, InMemoryRuleRepository, InMemorySessionStore};
pub use seed::FileRuleSource;
