//! Shared lookups for consultation handlers.

use std::sync::Arc;

use crate::domain::consultation::{ConsultationError, QuestionOrder};
use crate::domain::foundation::{Category, SessionId};
use crate::domain::rules::RuleSet;
use crate::ports::{QuestionPriorityRepository, RuleRepository, SessionHandle, SessionStore};

/// Compile the current rules of `category` (shared rules included) and
/// its question order into a snapshot a session can pin.
///
/// # Errors
///
/// - `InvalidCategory` if the category has no rules
pub(crate) async fn compile_snapshot(
    rules: &dyn RuleRepository,
    questions: &dyn QuestionPriorityRepository,
    category: &Category,
) -> Result<(Arc<RuleSet>, QuestionOrder), ConsultationError> {
    let stored = rules.list(Some(category)).await?;
    if stored.is_empty() {
        return Err(ConsultationError::invalid_category(category.as_str()));
    }
    let set = RuleSet::compile(category.clone(), &stored);
    let catalog = questions.list(category).await?;
    let order = QuestionOrder::from_catalog(&set, &catalog);
    Ok((Arc::new(set), order))
}

/// # Errors
///
/// - `SessionNotFound` if no session has that ID
pub(crate) async fn find_session(
    store: &dyn SessionStore,
    id: &SessionId,
) -> Result<SessionHandle, ConsultationError> {
    store
        .get(id)
        .await?
        .ok_or_else(|| ConsultationError::session_not_found(*id))
}
