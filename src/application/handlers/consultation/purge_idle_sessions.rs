//! PurgeIdleSessionsHandler - Evicts consultations nobody has touched lately.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::consultation::ConsultationError;
use crate::domain::foundation::{CommandMetadata, Timestamp};
use crate::ports::SessionStore;

#[derive(Debug, Clone, Copy)]
pub struct PurgeIdleSessionsCommand {
    /// Sessions idle for longer than this are removed.
    pub max_idle: Duration,
}

pub struct PurgeIdleSessionsHandler {
    sessions: Arc<dyn SessionStore>,
}

impl PurgeIdleSessionsHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Returns how many sessions were removed.
    pub async fn handle(
        &self,
        cmd: PurgeIdleSessionsCommand,
        metadata: CommandMetadata,
    ) -> Result<usize, ConsultationError> {
        let max_idle = chrono::Duration::from_std(cmd.max_idle)
            .map_err(|err| ConsultationError::infrastructure(err.to_string()))?;
        let cutoff = Timestamp::from_datetime(chrono::Utc::now() - max_idle);

        let removed = self.sessions.remove_idle(cutoff).await?;
        if removed > 0 {
            let remaining = self.sessions.count().await?;
            tracing::info!(
                correlation_id = %metadata.correlation_id(),
                removed,
                remaining,
                "idle consultations purged"
            );
        }
        Ok(removed)
    }
}
