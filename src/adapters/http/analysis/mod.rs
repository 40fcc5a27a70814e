//! HTTP adapter for rule-base analysis.
//!
//! - `GET /api/validation/check` - Validation report
//! - `POST /api/validation/auto-fix` - Priority auto-fix
//! - `GET /api/question-priorities` - Question catalog
//! - `POST /api/question-priorities/initialize` - Rank questions
//! - `PUT /api/question-priorities/:id` - Update one priority

mod dto;
mod handlers;
mod routes;

pub use dto::{AutoFixRequest, CategoryQuery, UpdateQuestionPriorityRequest};
pub use routes::{question_priority_routes, validation_routes};
