//! HTTP handlers for validation and question priority endpoints.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};

use crate::application::handlers::analysis::{
    AutoFixPrioritiesCommand, InitializeQuestionPrioritiesCommand, ListQuestionPrioritiesQuery,
    UpdateQuestionPriorityCommand, ValidateRulesQuery,
};
use crate::domain::foundation::{Category, CommandMetadata, QuestionId};

use super::super::error::{parse_id, ApiError};
use super::super::state::AppState;
use super::dto::{AutoFixRequest, CategoryQuery, UpdateQuestionPriorityRequest};

fn metadata() -> CommandMetadata {
    CommandMetadata::new().with_source("http")
}

/// GET /api/validation/check?category= - Validate a category's rule base
pub async fn validate_rules(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .validate_handler()
        .handle(ValidateRulesQuery {
            category: Category::new(query.category)?,
        })
        .await?;
    Ok(Json(report))
}

/// POST /api/validation/auto-fix - Plan or apply priority fixes
pub async fn auto_fix(
    State(state): State<AppState>,
    Json(req): Json<AutoFixRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .auto_fix_handler()
        .handle(
            AutoFixPrioritiesCommand {
                category: Category::new(req.category)?,
                violations: req.violations,
                apply: req.apply,
            },
            metadata(),
        )
        .await?;
    Ok(Json(result))
}

/// GET /api/question-priorities?category= - Question catalog in priority order
pub async fn list_question_priorities(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state
        .list_question_priorities_handler()
        .handle(ListQuestionPrioritiesQuery {
            category: Category::new(query.category)?,
        })
        .await?;
    Ok(Json(entries))
}

/// PUT /api/question-priorities/:id - Change one question's priority
pub async fn update_question_priority(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    Json(req): Json<UpdateQuestionPriorityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let question_id: QuestionId = parse_id(&question_id, "question")?;
    let entry = state
        .update_question_priority_handler()
        .handle(
            UpdateQuestionPriorityCommand {
                question_id,
                priority: req.priority,
            },
            metadata(),
        )
        .await?;
    Ok(Json(entry))
}

/// POST /api/question-priorities/initialize?category= - Rank askable questions
pub async fn initialize_priorities(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .initialize_priorities_handler()
        .handle(
            InitializeQuestionPrioritiesCommand {
                category: Category::new(query.category)?,
            },
            metadata(),
        )
        .await?;
    Ok(Json(report))
}
