//! HTTP handlers for consultation endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::application::handlers::consultation::{
    AnswerQuestionCommand, EndConsultationCommand, GetConsultationStatusQuery,
    GetCurrentQuestionQuery, GoBackCommand, ResetConsultationCommand, SkipQuestionCommand,
    StartConsultationCommand,
};
use crate::domain::foundation::{Category, CommandMetadata, SessionId};

use super::super::error::{parse_id, ApiError};
use super::super::state::AppState;
use super::dto::{AnswerRequest, ConsultationResponse, SkipRequest, StartConsultationRequest};

fn metadata() -> CommandMetadata {
    CommandMetadata::new().with_source("http")
}

/// POST /api/consultation/start - Start a consultation
pub async fn start_consultation(
    State(state): State<AppState>,
    Json(req): Json<StartConsultationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = Category::new(req.category)?;
    let session_id = req
        .session_id
        .as_deref()
        .map(|raw| parse_id::<SessionId>(raw, "session"))
        .transpose()?;

    let result = state
        .start_consultation_handler()
        .handle(
            StartConsultationCommand {
                category,
                session_id,
            },
            metadata(),
        )
        .await?;

    let response = ConsultationResponse {
        session_id: result.session_id.to_string(),
        outcome: result.outcome,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/consultation/:id/answer - Record an answer and continue
pub async fn answer_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = parse_id(&session_id, "session")?;
    let outcome = state
        .answer_question_handler()
        .handle(
            AnswerQuestionCommand {
                session_id,
                question: req.question,
                value: req.value,
            },
            metadata(),
        )
        .await?;

    Ok(Json(ConsultationResponse {
        session_id: session_id.to_string(),
        outcome,
    }))
}

/// POST /api/consultation/:id/skip - Skip a question
pub async fn skip_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SkipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = parse_id(&session_id, "session")?;
    let outcome = state
        .skip_question_handler()
        .handle(
            SkipQuestionCommand {
                session_id,
                question: req.question,
            },
            metadata(),
        )
        .await?;

    Ok(Json(ConsultationResponse {
        session_id: session_id.to_string(),
        outcome,
    }))
}

/// POST /api/consultation/:id/back - Undo the last answer or skip
pub async fn go_back(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = parse_id(&session_id, "session")?;
    let outcome = state
        .go_back_handler()
        .handle(GoBackCommand { session_id }, metadata())
        .await?;

    Ok(Json(ConsultationResponse {
        session_id: session_id.to_string(),
        outcome,
    }))
}

/// POST /api/consultation/:id/reset - Clear all session state
pub async fn reset_consultation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = parse_id(&session_id, "session")?;
    let view = state
        .reset_handler()
        .handle(ResetConsultationCommand { session_id }, metadata())
        .await?;
    Ok(Json(view))
}

/// DELETE /api/consultation/:id - Discard a consultation
pub async fn end_consultation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = parse_id(&session_id, "session")?;
    state
        .end_consultation_handler()
        .handle(EndConsultationCommand { session_id }, metadata())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/consultation/:id/status - Findings, conflict set and history
pub async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = parse_id(&session_id, "session")?;
    let view = state
        .status_handler()
        .handle(GetConsultationStatusQuery { session_id })
        .await?;
    Ok(Json(view))
}

/// GET /api/consultation/:id/question - The question being asked
pub async fn get_current_question(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id: SessionId = parse_id(&session_id, "session")?;
    let outcome = state
        .current_question_handler()
        .handle(GetCurrentQuestionQuery { session_id })
        .await?;

    Ok(Json(ConsultationResponse {
        session_id: session_id.to_string(),
        outcome,
    }))
}
