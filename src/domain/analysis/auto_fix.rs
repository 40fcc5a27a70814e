//! Priority auto-fix for dependency-order violations.

use serde::Serialize;

use crate::domain::foundation::RuleId;
use crate::domain::rules::Rule;

use super::report::OrderViolation;

/// A proposed priority change for one producer rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityChange {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub old_priority: i64,
    pub new_priority: i64,
}

pub struct PriorityAutoFixer;

impl PriorityAutoFixer {
    /// Proposes `min(current, consumer_priority - 1)` for each producer of a
    /// submitted violation that still holds against `rules`. Several
    /// violations on one producer fold into a single change.
    pub fn plan(rules: &[Rule], violations: &[OrderViolation]) -> Vec<PriorityChange> {
        let mut changes: Vec<PriorityChange> = Vec::new();

        for violation in violations {
            let producer = rules.iter().find(|r| r.name() == violation.producer_rule);
            let consumer = rules.iter().find(|r| r.name() == violation.consumer_rule);
            let (Some(producer), Some(consumer)) = (producer, consumer) else {
                continue;
            };
            let still_holds = producer.actions().contains(&violation.action)
                && consumer.conditions().contains(&violation.action)
                && producer.priority() > consumer.priority();
            if !still_holds {
                continue;
            }

            let target = consumer.priority() - 1;
            match changes.iter_mut().find(|c| &c.rule_id == producer.id()) {
                Some(change) => change.new_priority = change.new_priority.min(target),
                None => changes.push(PriorityChange {
                    rule_id: *producer.id(),
                    rule_name: producer.name().to_string(),
                    old_priority: producer.priority(),
                    new_priority: producer.priority().min(target),
                }),
            }
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Category;
    use crate::domain::rules::{ConditionLogic, RuleDraft, RuleKind};

    fn rule(name: &str, conditions: &[&str], actions: &[&str], priority: i64) -> Rule {
        Rule::new(
            RuleId::new(),
            RuleDraft {
                name: name.to_string(),
                category: Category::new("E").unwrap(),
                kind: RuleKind::Intermediate,
                logic: ConditionLogic::All,
                conditions: conditions.iter().map(|s| s.to_string()).collect(),
                actions: actions.iter().map(|s| s.to_string()).collect(),
                priority,
            },
        )
        .unwrap()
    }

    #[test]
    fn plan_moves_producer_before_consumer() {
        let rules = vec![rule("R1", &["a"], &["x"], 5), rule("R2", &["x"], &["ok"], 1)];
        let violations = vec![OrderViolation::new("R1", 5, "R2", 1, "x")];

        let changes = PriorityAutoFixer::plan(&rules, &violations);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].rule_name, "R1");
        assert_eq!(changes[0].old_priority, 5);
        assert_eq!(changes[0].new_priority, 0);
    }

    #[test]
    fn stale_violations_are_ignored() {
        let rules = vec![rule("R1", &["a"], &["x"], 0), rule("R2", &["x"], &["ok"], 1)];
        let violations = vec![OrderViolation::new("R1", 5, "R2", 1, "x")];
        assert!(PriorityAutoFixer::plan(&rules, &violations).is_empty());
    }

    #[test]
    fn multiple_consumers_fold_to_lowest_target() {
        let rules = vec![
            rule("R1", &["a"], &["x"], 9),
            rule("R2", &["x"], &["y"], 4),
            rule("R3", &["x"], &["z"], 2),
        ];
        let violations = vec![
            OrderViolation::new("R1", 9, "R2", 4, "x"),
            OrderViolation::new("R1", 9, "R3", 2, "x"),
        ];
        let changes = PriorityAutoFixer::plan(&rules, &violations);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].new_priority, 1);
    }
}
