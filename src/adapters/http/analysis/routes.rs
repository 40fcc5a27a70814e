//! HTTP routes for validation and question priority endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    auto_fix, initialize_priorities, list_question_priorities, update_question_priority,
    validate_rules,
};

/// Creates the validation router, mounted at `/api/validation`.
pub fn validation_routes() -> Router<AppState> {
    Router::new()
        .route("/check", get(validate_rules))
        .route("/auto-fix", post(auto_fix))
}

/// Creates the question priority router, mounted at `/api/question-priorities`.
pub fn question_priority_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_question_priorities))
        .route("/initialize", post(initialize_priorities))
        .route("/:id", put(update_question_priority))
}
