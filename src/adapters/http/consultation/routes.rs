//! HTTP routes for consultation endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    answer_question, end_consultation, get_current_question, get_status, go_back,
    reset_consultation, skip_question, start_consultation,
};

/// Creates the consultation router, mounted at `/api/consultation`.
pub fn consultation_routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_consultation))
        .route("/:id/answer", post(answer_question))
        .route("/:id/skip", post(skip_question))
        .route("/:id/back", post(go_back))
        .route("/:id/reset", post(reset_consultation))
        .route("/:id/status", get(get_status))
        .route("/:id/question", get(get_current_question))
        .route("/:id", delete(end_consultation))
}
