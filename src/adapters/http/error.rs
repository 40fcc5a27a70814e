//! HTTP error mapping shared by every endpoint module.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::consultation::ConsultationError;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::rules::RuleError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Consultation(ConsultationError),
    Rules(RuleError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<ConsultationError> for ApiError {
    fn from(err: ConsultationError) -> Self {
        ApiError::Consultation(err)
    }
}

impl From<RuleError> for ApiError {
    fn from(err: RuleError) -> Self {
        ApiError::Rules(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::InvalidFormat
        | ErrorCode::MalformedRule
        | ErrorCode::UnknownQuestion => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCategory
        | ErrorCode::SessionNotFound
        | ErrorCode::RuleNotFound
        | ErrorCode::QuestionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::NoActiveSession
        | ErrorCode::NoHistory
        | ErrorCode::SessionFinished
        | ErrorCode::StuckSession
        | ErrorCode::FactAlreadyKnown
        | ErrorCode::InvalidStateTransition
        | ErrorCode::DuplicateRuleName => StatusCode::CONFLICT,
        ErrorCode::NoTerminalRules => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::StorageError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Consultation(err) => (
                status_for(err.code()),
                ErrorResponse::new(err.code().to_string(), err.message()),
            ),
            ApiError::Rules(err) => (
                status_for(err.code()),
                ErrorResponse::new(err.code().to_string(), err.message()),
            ),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(message.clone()))
            }
        };

        if status.is_server_error() {
            tracing::error!(code = %body.code, message = %body.message, "request failed");
        }
        (status, Json(body)).into_response()
    }
}

/// Parses an id taken from the request path.
pub fn parse_id<T: std::str::FromStr>(raw: &str, kind: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{RuleId, SessionId};

    #[test]
    fn session_not_found_maps_to_404() {
        let response =
            ApiError::from(ConsultationError::session_not_found(SessionId::new())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn empty_history_maps_to_409() {
        let response = ApiError::from(ConsultationError::NoHistory).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn duplicate_rule_maps_to_409() {
        let err = RuleError::duplicate_name("R1", crate::domain::foundation::Category::shared());
        assert_eq!(ApiError::from(err).into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn malformed_rule_maps_to_400() {
        let response = ApiError::from(RuleError::malformed("R1", "no actions")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unparseable_id_is_bad_request() {
        let result: Result<RuleId, ApiError> = parse_id("nope", "rule");
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
