//! Consultation session store port.
//!
//! Sessions live behind their own async mutex: commands on one session are
//! serialized while distinct sessions proceed in parallel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::consultation::Consultation;
use crate::domain::foundation::{DomainError, SessionId, Timestamp};

/// Shared handle to one live consultation.
pub type SessionHandle = Arc<Mutex<Consultation>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session unless one with the same ID already exists.
    ///
    /// Returns the handle stored under that ID afterwards; an existing
    /// handle is never replaced, so callers restart it under its own lock.
    async fn get_or_insert(&self, consultation: Consultation)
        -> Result<SessionHandle, DomainError>;

    /// Returns `None` if no session has that ID.
    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, DomainError>;

    /// Returns true if a session was removed.
    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Drop sessions whose last activity is before `cutoff`. Sessions whose
    /// lock is currently held are kept. Returns how many were removed.
    async fn remove_idle(&self, cutoff: Timestamp) -> Result<usize, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }
}
