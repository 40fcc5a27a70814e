//! Serializable results of consultation commands and queries.
//!
//! Labels are resolved back to their text here; inside the engine they are
//! interned ids.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Category, ConsultationStatus, SessionId};
use crate::domain::rules::{ConditionLogic, RuleKind};

use super::question_selector::ConditionStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionView {
    pub label: String,
    pub status: ConditionStatus,
}

/// One rule of the reasoning chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningStep {
    pub rule: String,
    pub kind: RuleKind,
    pub logic: ConditionLogic,
    pub fired: bool,
    pub conditions: Vec<ConditionView>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedCondition {
    pub label: String,
    /// `None` when the condition was unknown at firing time (ANY rules).
    pub value: Option<bool>,
}

/// One applied-log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRuleView {
    pub rule: String,
    pub conditions: Vec<ObservedCondition>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerView {
    pub question: String,
    pub value: Option<bool>,
    pub skipped: bool,
}

/// What a consultation command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConsultationOutcome {
    /// The engine needs another answer.
    NeedInput {
        question: String,
        available_questions: Vec<String>,
        reasoning_chain: Vec<ReasoningStep>,
    },
    /// A terminal rule fired.
    Completed {
        results: BTreeMap<String, bool>,
        applied_rules: Vec<AppliedRuleView>,
    },
    /// No terminal rule can fire any more.
    Impossible { applied_rules: Vec<AppliedRuleView> },
    /// A terminal rule is still reachable, but only through skipped
    /// questions.
    Inconclusive {
        skipped_questions: Vec<String>,
        reasoning_chain: Vec<ReasoningStep>,
    },
}

impl ConsultationOutcome {
    pub fn status(&self) -> ConsultationStatus {
        match self {
            ConsultationOutcome::NeedInput { .. } => ConsultationStatus::AwaitingAnswer,
            ConsultationOutcome::Completed { .. } => ConsultationStatus::Completed,
            ConsultationOutcome::Impossible { .. } => ConsultationStatus::Impossible,
            ConsultationOutcome::Inconclusive { .. } => ConsultationStatus::Inconclusive,
        }
    }

    /// The question being asked, if any.
    pub fn question(&self) -> Option<&str> {
        match self {
            ConsultationOutcome::NeedInput { question, .. } => Some(question),
            _ => None,
        }
    }
}

/// Full session state as shown by the status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub session_id: SessionId,
    pub category: Category,
    pub status: ConsultationStatus,
    pub findings: BTreeMap<String, bool>,
    /// Rules whose conditions currently hold but have not fired.
    pub conflict_set: Vec<String>,
    pub applied_rules: Vec<AppliedRuleView>,
    pub answers: Vec<AnswerView>,
    pub skipped_questions: Vec<String>,
    pub history_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = ConsultationOutcome::Completed {
            results: BTreeMap::from([("ok".to_string(), true)]),
            applied_rules: vec![],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["results"]["ok"], true);
    }

    #[test]
    fn need_input_exposes_question() {
        let outcome = ConsultationOutcome::NeedInput {
            question: "a".to_string(),
            available_questions: vec![],
            reasoning_chain: vec![],
        };
        assert_eq!(outcome.question(), Some("a"));
        assert_eq!(outcome.status(), ConsultationStatus::AwaitingAnswer);
        assert_eq!(serde_json::to_value(&outcome).unwrap()["status"], "need_input");
    }
}
