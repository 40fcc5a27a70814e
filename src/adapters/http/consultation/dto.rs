//! HTTP DTOs for consultation endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::consultation::ConsultationOutcome;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start (or restart) a consultation.
#[derive(Debug, Clone, Deserialize)]
pub struct StartConsultationRequest {
    #[serde(alias = "visa_type")]
    pub category: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Request to answer the current (or any askable) question.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    #[serde(alias = "key")]
    pub question: String,
    pub value: bool,
}

/// Request to skip a question.
#[derive(Debug, Clone, Deserialize)]
pub struct SkipRequest {
    #[serde(alias = "key")]
    pub question: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Outcome of a consultation command, tagged with the session it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub outcome: ConsultationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_request_accepts_visa_type_alias() {
        let req: StartConsultationRequest =
            serde_json::from_str(r#"{"visa_type": "E"}"#).unwrap();
        assert_eq!(req.category, "E");
        assert!(req.session_id.is_none());
    }

    #[test]
    fn answer_request_accepts_key_alias() {
        let req: AnswerRequest =
            serde_json::from_str(r#"{"key": "is national", "value": true}"#).unwrap();
        assert_eq!(req.question, "is national");
        assert!(req.value);
    }

    #[test]
    fn response_flattens_outcome() {
        let response = ConsultationResponse {
            session_id: "abc".to_string(),
            outcome: ConsultationOutcome::Impossible {
                applied_rules: vec![],
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["session_id"], "abc");
        assert_eq!(json["status"], "impossible");
    }
}
