//! Undo stack of full session snapshots.

use super::working_memory::SessionState;

#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    snapshots: Vec<SessionState>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: SessionState) {
        self.snapshots.push(snapshot);
    }

    pub fn pop(&mut self) -> Option<SessionState> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
