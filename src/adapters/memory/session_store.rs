//! In-Memory Consultation Session Store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::consultation::Consultation;
use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use crate::ports::{SessionHandle, SessionStore};

/// Sessions keyed by ID, each behind its own mutex
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_insert(
        &self,
        consultation: Consultation,
    ) -> Result<SessionHandle, DomainError> {
        let id = *consultation.id();
        let mut sessions = self.sessions.write().await;
        let handle = sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(consultation)));
        Ok(handle.clone())
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn remove_idle(&self, cutoff: Timestamp) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        // A held lock means a command is running; that session is not idle.
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(consultation) => !consultation.updated_at().is_before(&cutoff),
            Err(_) => true,
        });
        Ok(before - sessions.len())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}
