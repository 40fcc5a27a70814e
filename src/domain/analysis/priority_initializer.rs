//! Question priority ranking.
//!
//! Questions feeding more conclusions are asked first: each askable label
//! is ranked by the number of terminal rules that transitively depend on
//! it, descending, with ties broken by first occurrence in the rule set.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::rules::{LabelId, RuleSet};

/// An askable question with its computed rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedQuestion {
    pub question: String,
    pub terminal_count: usize,
    /// Zero-based rank; lower is asked first.
    pub priority: i64,
}

/// Outcome of writing ranks into the question catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InitializationReport {
    pub added: usize,
    pub updated: usize,
    pub total: usize,
}

pub struct QuestionPriorityInitializer;

impl QuestionPriorityInitializer {
    pub fn rank(set: &RuleSet) -> Vec<RankedQuestion> {
        let mut counts: HashMap<LabelId, usize> = HashMap::new();

        for terminal in set.terminal_rules() {
            let mut visited = HashSet::new();
            let mut required = HashSet::new();
            Self::collect_questions(set, terminal.index, &mut visited, &mut required);
            for label in required {
                *counts.entry(label).or_default() += 1;
            }
        }

        let mut askable: Vec<LabelId> = set.askable_labels().to_vec();
        askable.sort_by_key(|&label| {
            (
                std::cmp::Reverse(counts.get(&label).copied().unwrap_or(0)),
                set.first_occurrence(label),
            )
        });

        askable
            .into_iter()
            .enumerate()
            .map(|(rank, label)| RankedQuestion {
                question: set.label(label).to_string(),
                terminal_count: counts.get(&label).copied().unwrap_or(0),
                priority: rank as i64,
            })
            .collect()
    }

    /// Askable labels a rule transitively depends on.
    fn collect_questions(
        set: &RuleSet,
        index: usize,
        visited: &mut HashSet<usize>,
        required: &mut HashSet<LabelId>,
    ) {
        if !visited.insert(index) {
            return;
        }
        for &condition in &set.rule(index).conditions {
            if set.is_askable(condition) {
                required.insert(condition);
            } else {
                for &producer in set.producers_of(condition) {
                    Self::collect_questions(set, producer, visited, required);
                }
            }
        }
    }
}
