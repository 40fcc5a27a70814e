//! Forward-chaining rule executor.
//!
//! Repeatedly scans unfired rules in ascending priority order and fires the
//! first one whose conditions hold, restarting the scan after each firing.
//! Stops when a terminal rule fires or a full pass fires nothing.

use crate::domain::rules::{CompiledRule, RuleSet};

use super::working_memory::{AppliedRule, SessionState, WorkingMemory};

pub struct ForwardChainer<'a> {
    rules: &'a RuleSet,
}

impl<'a> ForwardChainer<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// ALL: every condition true. ANY: at least one condition true.
    pub fn is_satisfied(rule: &CompiledRule, memory: &WorkingMemory) -> bool {
        rule.logic
            .evaluate(rule.conditions.iter().map(|&label| memory.get(label)))
    }

    /// Unfired rules with at least one known condition, in priority order.
    pub fn conflict_set(&self, state: &SessionState) -> Vec<usize> {
        self.rules
            .rules()
            .iter()
            .filter(|rule| !state.has_fired(rule.index))
            .filter(|rule| {
                rule.conditions
                    .iter()
                    .any(|&label| state.memory.is_known(label))
            })
            .map(|rule| rule.index)
            .collect()
    }

    /// Runs to a fixpoint. Returns the index of the terminal rule that
    /// ended the run, if any.
    pub fn run(&self, state: &mut SessionState) -> Option<usize> {
        loop {
            let next = self
                .rules
                .rules()
                .iter()
                .find(|rule| !state.has_fired(rule.index) && Self::is_satisfied(rule, &state.memory));

            let rule = next?;
            Self::fire(rule, state);
            if rule.is_terminal() {
                return Some(rule.index);
            }
        }
    }

    fn fire(rule: &CompiledRule, state: &mut SessionState) {
        let conditions = rule
            .conditions
            .iter()
            .map(|&label| (label, state.memory.get(label)))
            .collect();

        state.fired.insert(rule.index);
        for &action in &rule.actions {
            // An already-true action is not re-asserted.
            state.memory.assert(action, true);
        }
        state.applied.push(AppliedRule {
            rule: rule.index,
            conditions,
            actions: rule.actions.clone(),
        });

        tracing::debug!(rule = %rule.name, terminal = rule.is_terminal(), "rule fired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Category, RuleId};
    use crate::domain::rules::{ConditionLogic, Rule, RuleDraft, RuleKind};

    fn rule(
        name: &str,
        kind: RuleKind,
        logic: ConditionLogic,
        conditions: &[&str],
        actions: &[&str],
        priority: i64,
    ) -> Rule {
        Rule::new(
            RuleId::new(),
            RuleDraft {
                name: name.to_string(),
                category: Category::new("E").unwrap(),
                kind,
                logic,
                conditions: conditions.iter().map(|s| s.to_string()).collect(),
                actions: actions.iter().map(|s| s.to_string()).collect(),
                priority,
            },
        )
        .unwrap()
    }

    fn compile(rules: &[Rule]) -> RuleSet {
        RuleSet::compile(Category::new("E").unwrap(), rules)
    }

    #[test]
    fn fires_chain_until_terminal() {
        let set = compile(&[
            rule("R1", RuleKind::Intermediate, ConditionLogic::All, &["a"], &["x"], 0),
            rule("R2", RuleKind::Terminal, ConditionLogic::All, &["x"], &["ok"], 1),
        ]);
        let mut state = SessionState::new();
        state.memory.assert(set.lookup("a").unwrap(), true);

        let terminal = ForwardChainer::new(&set).run(&mut state);

        assert_eq!(terminal, Some(1));
        assert!(state.memory.is_true(set.lookup("ok").unwrap()));
        assert_eq!(state.applied.len(), 2);
        assert_eq!(state.applied[0].conditions, vec![(set.lookup("a").unwrap(), Some(true))]);
    }

    #[test]
    fn unknown_conditions_never_satisfy() {
        let set = compile(&[rule("R1", RuleKind::Terminal, ConditionLogic::Any, &["a", "b"], &["ok"], 0)]);
        let mut state = SessionState::new();
        assert_eq!(ForwardChainer::new(&set).run(&mut state), None);
        assert!(state.fired.is_empty());

        state.memory.assert(set.lookup("a").unwrap(), false);
        state.memory.assert(set.lookup("b").unwrap(), true);
        assert_eq!(ForwardChainer::new(&set).run(&mut state), Some(0));
    }

    #[test]
    fn rules_fire_at_most_once() {
        let set = compile(&[
            rule("R1", RuleKind::Intermediate, ConditionLogic::All, &["a"], &["x"], 0),
            rule("R2", RuleKind::Intermediate, ConditionLogic::All, &["a"], &["x"], 1),
        ]);
        let mut state = SessionState::new();
        state.memory.assert(set.lookup("a").unwrap(), true);
        let chainer = ForwardChainer::new(&set);

        assert_eq!(chainer.run(&mut state), None);
        assert_eq!(chainer.run(&mut state), None);

        let fired: Vec<usize> = state.applied.iter().map(|entry| entry.rule).collect();
        assert_eq!(fired, vec![0, 1]);
    }

    #[test]
    fn conflict_set_lists_unfired_rules_under_consideration() {
        let set = compile(&[
            rule("R1", RuleKind::Terminal, ConditionLogic::All, &["a"], &["ok"], 0),
            rule("R2", RuleKind::Terminal, ConditionLogic::All, &["a"], &["other"], 1),
        ]);
        let mut state = SessionState::new();
        state.memory.assert(set.lookup("a").unwrap(), true);
        let chainer = ForwardChainer::new(&set);

        assert_eq!(chainer.run(&mut state), Some(0));
        assert_eq!(chainer.conflict_set(&state), vec![1]);
    }

    #[test]
    fn conflict_set_includes_rules_with_false_conditions() {
        let set = compile(&[
            rule("R1", RuleKind::Terminal, ConditionLogic::All, &["a", "b"], &["ok"], 0),
            rule("R2", RuleKind::Terminal, ConditionLogic::All, &["c"], &["other"], 1),
        ]);
        let mut state = SessionState::new();
        state.memory.assert(set.lookup("a").unwrap(), false);
        let chainer = ForwardChainer::new(&set);

        assert_eq!(chainer.run(&mut state), None);
        assert_eq!(chainer.conflict_set(&state), vec![0]);
    }
}
