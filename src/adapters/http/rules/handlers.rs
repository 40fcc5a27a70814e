//! HTTP handlers for rule management endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::application::handlers::rules::{
    CreateRuleCommand, DeleteRuleCommand, ExportRulesQuery, GetRuleQuery, ImportRulesCommand,
    ListQuestionsQuery, ListRulesQuery, ReorderRulesCommand, UpdateRuleCommand,
};
use crate::domain::foundation::{Category, CommandMetadata, RuleId};
use crate::domain::rules::{RuleDraft, RulePatch};

use super::super::error::{parse_id, ApiError};
use super::super::state::AppState;
use super::dto::{
    CategoryFilter, ImportRulesRequest, ReorderRulesRequest, RuleCommandResponse, RuleResponse,
    ReorderRulesResponse,
};

fn metadata() -> CommandMetadata {
    CommandMetadata::new().with_source("http")
}

fn category_filter(filter: CategoryFilter) -> Result<Option<Category>, ApiError> {
    Ok(filter.category.map(Category::new).transpose()?)
}

/// GET /api/rules - List rules, optionally for one category
pub async fn list_rules(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let rules = state
        .list_rules_handler()
        .handle(ListRulesQuery {
            category: category_filter(filter)?,
        })
        .await?;
    let response: Vec<RuleResponse> = rules.iter().map(RuleResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/rules/categories - Categories that have rules
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.list_categories_handler().handle().await?;
    Ok(Json(categories))
}

/// GET /api/rules/:id - Get one rule
pub async fn get_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rule_id: RuleId = parse_id(&rule_id, "rule")?;
    let rule = state.get_rule_handler().handle(GetRuleQuery { rule_id }).await?;
    Ok(Json(RuleResponse::from(&rule)))
}

/// POST /api/rules - Create a rule
pub async fn create_rule(
    State(state): State<AppState>,
    Json(draft): Json<RuleDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let rule = state
        .create_rule_handler()
        .handle(CreateRuleCommand { draft }, metadata())
        .await?;
    Ok((StatusCode::CREATED, Json(RuleResponse::from(&rule))))
}

/// PUT /api/rules/:id - Update the given fields of a rule
pub async fn update_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
    Json(patch): Json<RulePatch>,
) -> Result<impl IntoResponse, ApiError> {
    let rule_id: RuleId = parse_id(&rule_id, "rule")?;
    let rule = state
        .update_rule_handler()
        .handle(UpdateRuleCommand { rule_id, patch }, metadata())
        .await?;
    Ok(Json(RuleResponse::from(&rule)))
}

/// DELETE /api/rules/:id - Delete a rule
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(rule_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rule_id: RuleId = parse_id(&rule_id, "rule")?;
    state
        .delete_rule_handler()
        .handle(DeleteRuleCommand { rule_id }, metadata())
        .await?;
    Ok(Json(RuleCommandResponse {
        rule_id: rule_id.to_string(),
        message: "Rule deleted successfully".to_string(),
    }))
}

/// PUT /api/rules/reorder - Assign priorities by list position
pub async fn reorder_rules(
    State(state): State<AppState>,
    Json(req): Json<ReorderRulesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let rule_ids = req
        .rule_ids
        .iter()
        .map(|raw| parse_id::<RuleId>(raw, "rule"))
        .collect::<Result<Vec<_>, _>>()?;
    let result = state
        .reorder_rules_handler()
        .handle(ReorderRulesCommand { rule_ids }, metadata())
        .await?;
    Ok(Json(ReorderRulesResponse {
        updated: result.updated,
        missing: result.missing.iter().map(ToString::to_string).collect(),
    }))
}

/// GET /api/rules/export - Export rules as an import-ready document
pub async fn export_rules(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let export = state
        .export_rules_handler()
        .handle(ExportRulesQuery {
            category: category_filter(filter)?,
        })
        .await?;
    Ok(Json(export))
}

/// POST /api/rules/import - Import rules, optionally replacing by name
pub async fn import_rules(
    State(state): State<AppState>,
    Json(req): Json<ImportRulesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .import_rules_handler()
        .handle(
            ImportRulesCommand {
                rules: req.rules,
                overwrite: req.overwrite,
            },
            metadata(),
        )
        .await?;
    Ok(Json(summary))
}

/// GET /api/rules/questions?category= - Rules plus every condition label
pub async fn list_questions(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let category = category_filter(filter)?
        .ok_or_else(|| ApiError::bad_request("category is required"))?;
    let view = state
        .list_questions_handler()
        .handle(ListQuestionsQuery { category })
        .await?;
    Ok(Json(view))
}
