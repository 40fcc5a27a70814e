//! ConsultationStatus enum for tracking the lifecycle of a consultation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a consultation session.
///
/// `Completed`, `Impossible` and `Error` are terminal: only `go_back`
/// (snapshot restore) or `reset` can leave them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    #[default]
    NotStarted,
    AwaitingAnswer,
    Completed,
    Impossible,
    /// A conclusion is still reachable, but every path to it is blocked by
    /// skipped questions.
    Inconclusive,
    Error,
}

impl ConsultationStatus {
    /// Returns true if answers and skips are accepted in this status.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            ConsultationStatus::AwaitingAnswer | ConsultationStatus::Inconclusive
        )
    }
}

impl StateMachine for ConsultationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConsultationStatus::*;
        matches!(
            (self, target),
            (NotStarted, AwaitingAnswer)
                | (NotStarted, Completed)
                | (NotStarted, Impossible)
                | (NotStarted, Inconclusive)
                | (NotStarted, Error)
                | (AwaitingAnswer, AwaitingAnswer)
                | (AwaitingAnswer, Completed)
                | (AwaitingAnswer, Impossible)
                | (AwaitingAnswer, Inconclusive)
                | (Inconclusive, AwaitingAnswer)
                | (Inconclusive, Completed)
                | (Inconclusive, Impossible)
                | (Inconclusive, Inconclusive)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConsultationStatus::*;
        match self {
            NotStarted => vec![AwaitingAnswer, Completed, Impossible, Inconclusive, Error],
            AwaitingAnswer | Inconclusive => {
                vec![AwaitingAnswer, Completed, Impossible, Inconclusive]
            }
            Completed | Impossible | Error => vec![],
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsultationStatus::NotStarted => "NotStarted",
            ConsultationStatus::AwaitingAnswer => "AwaitingAnswer",
            ConsultationStatus::Completed => "Completed",
            ConsultationStatus::Impossible => "Impossible",
            ConsultationStatus::Inconclusive => "Inconclusive",
            ConsultationStatus::Error => "Error",
        };
        write!(f, "{}", s)
    }
}
