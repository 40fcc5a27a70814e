//! Backward-chaining question selection.
//!
//! Starting from every terminal rule that is still live with skipped
//! questions treated as unavailable, walk consumer → producer edges
//! through unknown conditions. Unknown askable labels that were not
//! skipped become candidates; the rules visited form the reasoning chain.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::domain::rules::{LabelId, QuestionPriority, RuleSet};

use super::reachability::Reachability;
use super::working_memory::SessionState;

/// Truth status of a condition as shown in the reasoning chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionStatus {
    Satisfied,
    Unsatisfied,
    Unknown,
}

impl From<Option<bool>> for ConditionStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => ConditionStatus::Satisfied,
            Some(false) => ConditionStatus::Unsatisfied,
            None => ConditionStatus::Unknown,
        }
    }
}

/// A rule on the path from a conclusion to the candidate questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    pub rule: usize,
    pub fired: bool,
    pub conditions: Vec<(LabelId, ConditionStatus)>,
}

/// Ordering of askable labels.
///
/// Catalog priorities come first (ascending); unconfigured labels follow,
/// ordered by the lowest priority of a rule that tests them, then by first
/// occurrence in the rule set.
#[derive(Debug, Clone, Default)]
pub struct QuestionOrder {
    configured: HashMap<LabelId, i64>,
}

impl QuestionOrder {
    pub fn from_catalog(rules: &RuleSet, catalog: &[QuestionPriority]) -> Self {
        let configured = catalog
            .iter()
            .filter_map(|entry| rules.lookup(entry.question()).map(|id| (id, entry.priority())))
            .collect();
        Self { configured }
    }

    pub fn sort_key(&self, rules: &RuleSet, label: LabelId) -> (u8, i64, usize) {
        match self.configured.get(&label) {
            Some(&priority) => (0, priority, rules.first_occurrence(label)),
            None => (
                1,
                rules.min_consumer_priority(label).unwrap_or(i64::MAX),
                rules.first_occurrence(label),
            ),
        }
    }

    pub fn sort(&self, rules: &RuleSet, labels: &mut [LabelId]) {
        labels.sort_by_key(|&label| self.sort_key(rules, label));
    }
}

/// Result of one selection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Candidate questions, best first.
    pub candidates: Vec<LabelId>,
    pub chain: Vec<ChainLink>,
}

impl Selection {
    pub fn next_question(&self) -> Option<LabelId> {
        self.candidates.first().copied()
    }

    /// Candidates after the next question.
    pub fn available(&self) -> &[LabelId] {
        self.candidates.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

pub struct QuestionSelector<'a> {
    rules: &'a RuleSet,
    order: &'a QuestionOrder,
}

impl<'a> QuestionSelector<'a> {
    pub fn new(rules: &'a RuleSet, order: &'a QuestionOrder) -> Self {
        Self { rules, order }
    }

    /// `reach` must be computed with skipped labels unavailable.
    pub fn select(&self, state: &SessionState, reach: &Reachability) -> Selection {
        let mut visited = HashSet::new();
        let mut candidates = BTreeSet::new();
        let mut chain = Vec::new();

        for terminal in reach.live_terminals(self.rules) {
            self.walk(terminal, state, reach, &mut visited, &mut candidates, &mut chain);
        }

        let mut candidates: Vec<LabelId> = candidates.into_iter().collect();
        self.order.sort(self.rules, &mut candidates);
        Selection { candidates, chain }
    }

    fn walk(
        &self,
        index: usize,
        state: &SessionState,
        reach: &Reachability,
        visited: &mut HashSet<usize>,
        candidates: &mut BTreeSet<LabelId>,
        chain: &mut Vec<ChainLink>,
    ) {
        if !visited.insert(index) {
            return;
        }
        let rule = self.rules.rule(index);
        chain.push(ChainLink {
            rule: index,
            fired: state.has_fired(index),
            conditions: rule
                .conditions
                .iter()
                .map(|&label| (label, state.memory.get(label).into()))
                .collect(),
        });

        for &condition in &rule.conditions {
            if state.memory.is_known(condition) {
                continue;
            }
            if self.rules.is_askable(condition) {
                if !state.is_skipped(condition) {
                    candidates.insert(condition);
                }
                continue;
            }
            for &producer in self.rules.producers_of(condition) {
                if reach.is_live(producer) {
                    self.walk(producer, state, reach, visited, candidates, chain);
                }
            }
        }
    }
}
