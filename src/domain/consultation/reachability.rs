//! "Can still become true" analysis over a session's state.
//!
//! Least fixpoint: a label can become true when it is true, when it is an
//! unknown askable label, or when an unfired rule whose conditions can all
//! (ALL) or partly (ANY) become true produces it.

use crate::domain::rules::{LabelId, RuleSet};

use super::working_memory::SessionState;

/// How skipped questions count toward reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedLabels {
    /// Skipped questions may still be answered later.
    Available,
    /// Skipped questions are treated as unanswerable.
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct Reachability {
    possible: Vec<bool>,
    live: Vec<bool>,
}

impl Reachability {
    pub fn analyze(rules: &RuleSet, state: &SessionState, skipped: SkippedLabels) -> Self {
        let mut possible: Vec<bool> = rules
            .labels()
            .ids()
            .map(|label| match state.memory.get(label) {
                Some(value) => value,
                None => {
                    rules.is_askable(label)
                        && (skipped == SkippedLabels::Available || !state.is_skipped(label))
                }
            })
            .collect();
        let mut live = vec![false; rules.len()];

        let mut changed = true;
        while changed {
            changed = false;
            for rule in rules.rules() {
                if live[rule.index] || state.has_fired(rule.index) {
                    continue;
                }
                let can_fire = rule
                    .logic
                    .evaluate(rule.conditions.iter().map(|c| Some(possible[c.index()])));
                if !can_fire {
                    continue;
                }
                live[rule.index] = true;
                changed = true;
                for action in &rule.actions {
                    possible[action.index()] = true;
                }
            }
        }

        Self { possible, live }
    }

    pub fn can_become_true(&self, label: LabelId) -> bool {
        self.possible[label.index()]
    }

    /// Unfired and still able to fire.
    pub fn is_live(&self, rule: usize) -> bool {
        self.live[rule]
    }

    pub fn live_terminals<'r>(&'r self, rules: &'r RuleSet) -> impl Iterator<Item = usize> + 'r {
        rules
            .terminal_rules()
            .map(|rule| rule.index)
            .filter(|&index| self.live[index])
    }

    pub fn any_live_terminal(&self, rules: &RuleSet) -> bool {
        self.live_terminals(rules).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Category, RuleId};
    use crate::domain::rules::{ConditionLogic, Rule, RuleDraft, RuleKind};

    fn compile(specs: &[(&str, RuleKind, ConditionLogic, &[&str], &[&str])]) -> RuleSet {
        let rules: Vec<Rule> = specs
            .iter()
            .enumerate()
            .map(|(i, (name, kind, logic, conditions, actions))| {
                Rule::new(
                    RuleId::new(),
                    RuleDraft {
                        name: name.to_string(),
                        category: Category::new("E").unwrap(),
                        kind: *kind,
                        logic: *logic,
                        conditions: conditions.iter().map(|s| s.to_string()).collect(),
                        actions: actions.iter().map(|s| s.to_string()).collect(),
                        priority: i as i64,
                    },
                )
                .unwrap()
            })
            .collect();
        RuleSet::compile(Category::new("E").unwrap(), &rules)
    }

    #[test]
    fn false_answer_kills_all_rule() {
        let set = compile(&[("R1", RuleKind::Terminal, ConditionLogic::All, &["a", "b"], &["ok"])]);
        let mut state = SessionState::new();
        assert!(Reachability::analyze(&set, &state, SkippedLabels::Available).any_live_terminal(&set));

        state.memory.assert(set.lookup("a").unwrap(), false);
        let reach = Reachability::analyze(&set, &state, SkippedLabels::Available);
        assert!(!reach.any_live_terminal(&set));
        assert!(!reach.can_become_true(set.lookup("ok").unwrap()));
    }

    #[test]
    fn any_rule_survives_one_false_condition() {
        let set = compile(&[("R1", RuleKind::Terminal, ConditionLogic::Any, &["a", "b"], &["ok"])]);
        let mut state = SessionState::new();
        state.memory.assert(set.lookup("a").unwrap(), false);
        assert!(Reachability::analyze(&set, &state, SkippedLabels::Available).is_live(0));
    }

    #[test]
    fn skipped_labels_only_block_in_unavailable_mode() {
        let set = compile(&[("R1", RuleKind::Terminal, ConditionLogic::All, &["a"], &["ok"])]);
        let mut state = SessionState::new();
        state.skipped.insert(set.lookup("a").unwrap());

        assert!(Reachability::analyze(&set, &state, SkippedLabels::Available).is_live(0));
        assert!(!Reachability::analyze(&set, &state, SkippedLabels::Unavailable).is_live(0));
    }

    #[test]
    fn derived_labels_follow_live_producers() {
        let set = compile(&[
            ("R1", RuleKind::Intermediate, ConditionLogic::All, &["a"], &["x"]),
            ("R2", RuleKind::Terminal, ConditionLogic::All, &["x"], &["ok"]),
        ]);
        let mut state = SessionState::new();
        assert!(Reachability::analyze(&set, &state, SkippedLabels::Available).is_live(1));

        state.memory.assert(set.lookup("a").unwrap(), false);
        let reach = Reachability::analyze(&set, &state, SkippedLabels::Available);
        assert!(!reach.can_become_true(set.lookup("x").unwrap()));
        assert!(!reach.is_live(1));
    }

    #[test]
    fn self_supporting_cycle_is_not_reachable() {
        let set = compile(&[
            ("R1", RuleKind::Intermediate, ConditionLogic::All, &["y"], &["x"]),
            ("R2", RuleKind::Intermediate, ConditionLogic::All, &["x"], &["y"]),
            ("R3", RuleKind::Terminal, ConditionLogic::All, &["x"], &["ok"]),
        ]);
        let reach = Reachability::analyze(&set, &SessionState::new(), SkippedLabels::Available);
        assert!(!reach.any_live_terminal(&set));
    }
}
