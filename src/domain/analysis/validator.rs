//! Static rule-base validation.
//!
//! Checks a category's rules for structural defects, dependency cycles,
//! rules that can never fire, and producers scheduled after their
//! consumers. Pure: takes rules in, returns a report.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::Category;
use crate::domain::rules::{Rule, RuleSet};

use super::report::{
    CircularDependency, ConsistencyError, ConsistencyErrorKind, OrderViolation, UnreachableRule,
    ValidationReport,
};

pub struct RuleBaseValidator;

impl RuleBaseValidator {
    /// Runs every check. `declared_questions` are the labels the user can
    /// be asked; any other unproduced condition is unreachable.
    pub fn validate(
        category: &Category,
        rules: &[Rule],
        declared_questions: &HashSet<String>,
    ) -> ValidationReport {
        let set = RuleSet::compile(category.clone(), rules);

        ValidationReport::new(
            category.clone(),
            rules.len(),
            Self::check_consistency(rules),
            Self::find_cycles(&set),
            Self::find_unreachable(&set, declared_questions),
            Self::check_dependency_order(&set),
        )
    }

    /// Duplicate names, empty conditions or actions, blank labels, and a
    /// missing terminal rule.
    pub fn check_consistency(rules: &[Rule]) -> Vec<ConsistencyError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for rule in rules {
            let name = rule.name();
            if !seen.insert(name) {
                errors.push(ConsistencyError::for_rule(
                    ConsistencyErrorKind::DuplicateName,
                    name,
                    format!("Rule name '{}' is used more than once", name),
                ));
            }
            if rule.conditions().is_empty() {
                errors.push(ConsistencyError::for_rule(
                    ConsistencyErrorKind::EmptyConditions,
                    name,
                    format!("Rule {} has no conditions", name),
                ));
            }
            if rule.actions().is_empty() {
                errors.push(ConsistencyError::for_rule(
                    ConsistencyErrorKind::EmptyActions,
                    name,
                    format!("Rule {} has no actions", name),
                ));
            }
            if rule
                .conditions()
                .iter()
                .chain(rule.actions())
                .any(|label| label.trim().is_empty())
            {
                errors.push(ConsistencyError::for_rule(
                    ConsistencyErrorKind::BlankLabel,
                    name,
                    format!("Rule {} has a blank label", name),
                ));
            }
        }

        if !rules.iter().any(Rule::is_terminal) {
            errors.push(ConsistencyError {
                kind: ConsistencyErrorKind::NoTerminalRules,
                rule_name: None,
                description: "No terminal rule is defined".to_string(),
            });
        }

        errors
    }

    /// Depth-first search over consumer → producer edges, tracking the
    /// active path. Each cycle is reported once, starting at its
    /// highest-priority rule.
    pub fn find_cycles(set: &RuleSet) -> Vec<CircularDependency> {
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        let mut found: Vec<Vec<usize>> = Vec::new();

        for rule in set.rules() {
            if !visited.contains(&rule.index) {
                Self::cycle_util(set, rule.index, &mut visited, &mut path, &mut found);
            }
        }

        found
            .into_iter()
            .map(|cycle| {
                CircularDependency::new(
                    cycle
                        .into_iter()
                        .map(|index| set.rule(index).name.clone())
                        .collect(),
                )
            })
            .collect()
    }

    fn cycle_util(
        set: &RuleSet,
        index: usize,
        visited: &mut HashSet<usize>,
        path: &mut Vec<usize>,
        found: &mut Vec<Vec<usize>>,
    ) {
        visited.insert(index);
        path.push(index);

        for producer in set.dependencies(index) {
            if let Some(start) = path.iter().position(|&on_path| on_path == producer) {
                let cycle = Self::normalize(&path[start..]);
                if !found.contains(&cycle) {
                    found.push(cycle);
                }
            } else if !visited.contains(&producer) {
                Self::cycle_util(set, producer, visited, path, found);
            }
        }

        path.pop();
    }

    /// Rotate so the smallest rule index comes first.
    fn normalize(cycle: &[usize]) -> Vec<usize> {
        let pivot = cycle
            .iter()
            .enumerate()
            .min_by_key(|&(_, index)| index)
            .map(|(position, _)| position)
            .unwrap_or(0);
        cycle[pivot..].iter().chain(&cycle[..pivot]).copied().collect()
    }

    /// A label is reachable when it is a declared question or an action of
    /// a reachable rule. Reports rules that can never fire, with the
    /// conditions responsible.
    pub fn find_unreachable(
        set: &RuleSet,
        declared_questions: &HashSet<String>,
    ) -> Vec<UnreachableRule> {
        let mut reachable: Vec<bool> = set
            .labels()
            .ids()
            .map(|label| declared_questions.contains(set.label(label)))
            .collect();
        let mut fires = vec![false; set.len()];

        let mut changed = true;
        while changed {
            changed = false;
            for rule in set.rules() {
                if fires[rule.index] || rule.conditions.is_empty() {
                    continue;
                }
                let can_fire = rule
                    .logic
                    .evaluate(rule.conditions.iter().map(|c| Some(reachable[c.index()])));
                if can_fire {
                    fires[rule.index] = true;
                    changed = true;
                    for action in &rule.actions {
                        reachable[action.index()] = true;
                    }
                }
            }
        }

        set.rules()
            .iter()
            .filter(|rule| !fires[rule.index] && !rule.conditions.is_empty())
            .map(|rule| {
                let mut unreachable_conditions: Vec<String> = Vec::new();
                for &condition in &rule.conditions {
                    let text = set.label(condition);
                    if !reachable[condition.index()]
                        && !unreachable_conditions.iter().any(|seen| seen == text)
                    {
                        unreachable_conditions.push(text.to_string());
                    }
                }
                UnreachableRule {
                    description: format!(
                        "Rule {}: condition '{}' can never be established",
                        rule.name,
                        unreachable_conditions.join(", ")
                    ),
                    rule_name: rule.name.clone(),
                    rule_type: rule.kind,
                    unreachable_conditions,
                }
            })
            .collect()
    }

    /// One violation per (producer, consumer, label) where the producer has
    /// a strictly higher priority number than its consumer.
    pub fn check_dependency_order(set: &RuleSet) -> Vec<OrderViolation> {
        let mut violations = Vec::new();
        let mut seen: HashMap<(usize, usize), HashSet<usize>> = HashMap::new();

        for consumer in set.rules() {
            for &condition in &consumer.conditions {
                for &producer_index in set.producers_of(condition) {
                    let producer = set.rule(producer_index);
                    if producer.index == consumer.index || producer.priority <= consumer.priority {
                        continue;
                    }
                    if !seen
                        .entry((producer.index, consumer.index))
                        .or_default()
                        .insert(condition.index())
                    {
                        continue;
                    }
                    violations.push(OrderViolation::new(
                        &producer.name,
                        producer.priority,
                        &consumer.name,
                        consumer.priority,
                        set.label(condition),
                    ));
                }
            }
        }

        violations
    }
}
