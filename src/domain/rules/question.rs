//! Question catalog entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Category, QuestionId, ValidationError};

/// A declared askable question and its position in the asking order.
/// Lower priority is asked first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPriority {
    id: QuestionId,
    category: Category,
    question: String,
    priority: i64,
}

impl QuestionPriority {
    /// # Errors
    ///
    /// - `EmptyField` if the question text is blank
    pub fn new(
        category: Category,
        question: impl Into<String>,
        priority: i64,
    ) -> Result<Self, ValidationError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(ValidationError::empty_field("question"));
        }
        Ok(Self {
            id: QuestionId::new(),
            category,
            question,
            priority,
        })
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i64) {
        self.priority = priority;
    }
}
