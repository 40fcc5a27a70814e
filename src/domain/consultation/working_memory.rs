//! Per-session fact table and the state that undo snapshots capture.

use std::collections::{BTreeSet, HashMap};

use crate::domain::foundation::ConsultationStatus;
use crate::domain::rules::LabelId;

/// Known facts of one consultation. A label absent from the table is
/// unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingMemory {
    facts: HashMap<LabelId, bool>,
}

impl WorkingMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: LabelId) -> Option<bool> {
        self.facts.get(&label).copied()
    }

    pub fn is_known(&self, label: LabelId) -> bool {
        self.facts.contains_key(&label)
    }

    pub fn is_true(&self, label: LabelId) -> bool {
        self.get(label) == Some(true)
    }

    /// Records a fact. Returns false, leaving memory untouched, when the
    /// label already has a value.
    pub fn assert(&mut self, label: LabelId, value: bool) -> bool {
        if self.facts.contains_key(&label) {
            return false;
        }
        self.facts.insert(label, value);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabelId, bool)> + '_ {
        self.facts.iter().map(|(label, value)| (*label, *value))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }
}

/// One entry of the applied-rule log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRule {
    /// Index of the rule in the session's rule set.
    pub rule: usize,
    /// Condition values observed at firing time.
    pub conditions: Vec<(LabelId, Option<bool>)>,
    pub actions: Vec<LabelId>,
}

/// One entry of the answer history. `value` is `None` for a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub label: LabelId,
    pub value: Option<bool>,
}

/// Everything a consultation mutates. Undo snapshots are clones of this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub memory: WorkingMemory,
    pub fired: BTreeSet<usize>,
    pub applied: Vec<AppliedRule>,
    pub answers: Vec<AnswerRecord>,
    pub skipped: BTreeSet<LabelId>,
    pub status: ConsultationStatus,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self, rule: usize) -> bool {
        self.fired.contains(&rule)
    }

    pub fn is_skipped(&self, label: LabelId) -> bool {
        self.skipped.contains(&label)
    }
}
