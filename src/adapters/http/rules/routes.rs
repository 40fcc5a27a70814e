//! HTTP routes for rule management endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    create_rule, delete_rule, export_rules, get_rule, import_rules, list_categories,
    list_questions, list_rules, reorder_rules, update_rule,
};

/// Creates the rule router, mounted at `/api/rules`.
pub fn rule_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rules).post(create_rule))
        .route("/categories", get(list_categories))
        .route("/questions", get(list_questions))
        .route("/reorder", put(reorder_rules))
        .route("/export", get(export_rules))
        .route("/import", post(import_rules))
        .route("/:id", get(get_rule).put(update_rule).delete(delete_rule))
}
