//! Compiled, read-only view of one category's rules.
//!
//! Compilation sorts rules by ascending priority (stable, so ties keep
//! store order), interns every label, and indexes the consumer → producer
//! graph: rule C depends on rule P when one of P's actions is textually
//! equal to one of C's conditions.

use std::collections::{BTreeSet, HashMap};

use crate::domain::foundation::{Category, RuleId};

use super::{ConditionLogic, LabelId, LabelInterner, Rule, RuleKind};

/// A rule with interned labels, addressed by its position in priority order.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub index: usize,
    pub id: RuleId,
    pub name: String,
    pub kind: RuleKind,
    pub logic: ConditionLogic,
    pub priority: i64,
    pub conditions: Vec<LabelId>,
    pub actions: Vec<LabelId>,
}

impl CompiledRule {
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }
}

/// Immutable snapshot of a category's rule base.
#[derive(Debug, Clone)]
pub struct RuleSet {
    category: Category,
    rules: Vec<CompiledRule>,
    labels: LabelInterner,
    producers: HashMap<LabelId, Vec<usize>>,
    consumers: HashMap<LabelId, Vec<usize>>,
    askable: Vec<LabelId>,
}

impl RuleSet {
    /// Compile `rules` (already filtered to the category) into a rule set.
    pub fn compile(category: Category, rules: &[Rule]) -> Self {
        let mut ordered: Vec<&Rule> = rules.iter().collect();
        ordered.sort_by_key(|rule| rule.priority());

        let mut labels = LabelInterner::new();
        let mut producers: HashMap<LabelId, Vec<usize>> = HashMap::new();
        let mut consumers: HashMap<LabelId, Vec<usize>> = HashMap::new();
        let mut compiled = Vec::with_capacity(ordered.len());

        for (index, rule) in ordered.into_iter().enumerate() {
            let conditions: Vec<LabelId> =
                rule.conditions().iter().map(|c| labels.intern(c)).collect();
            let actions: Vec<LabelId> = rule.actions().iter().map(|a| labels.intern(a)).collect();

            for &condition in &conditions {
                let entry = consumers.entry(condition).or_default();
                if !entry.contains(&index) {
                    entry.push(index);
                }
            }
            for &action in &actions {
                let entry = producers.entry(action).or_default();
                if !entry.contains(&index) {
                    entry.push(index);
                }
            }

            compiled.push(CompiledRule {
                index,
                id: *rule.id(),
                name: rule.name().to_string(),
                kind: rule.kind(),
                logic: rule.logic(),
                priority: rule.priority(),
                conditions,
                actions,
            });
        }

        // Interner order is first-occurrence order, so askable labels are too.
        let askable = labels
            .ids()
            .filter(|id| consumers.contains_key(id) && !producers.contains_key(id))
            .collect();

        Self {
            category,
            rules: compiled,
            labels,
            producers,
            consumers,
            askable,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Rules in ascending priority order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> &CompiledRule {
        &self.rules[index]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn labels(&self) -> &LabelInterner {
        &self.labels
    }

    /// Text of an interned label.
    pub fn label(&self, id: LabelId) -> &str {
        self.labels.resolve(id)
    }

    pub fn lookup(&self, label: &str) -> Option<LabelId> {
        self.labels.get(label)
    }

    pub fn index_of(&self, id: &RuleId) -> Option<usize> {
        self.rules.iter().position(|rule| &rule.id == id)
    }

    /// Rules that assert `label`.
    pub fn producers_of(&self, label: LabelId) -> &[usize] {
        self.producers.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules that test `label`.
    pub fn consumers_of(&self, label: LabelId) -> &[usize] {
        self.consumers.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A label is askable when some rule tests it and no rule produces it.
    pub fn is_askable(&self, label: LabelId) -> bool {
        self.consumers.contains_key(&label) && !self.producers.contains_key(&label)
    }

    /// Askable labels in first-occurrence order.
    pub fn askable_labels(&self) -> &[LabelId] {
        &self.askable
    }

    /// Position of the label's first appearance when scanning rules in
    /// priority order.
    pub fn first_occurrence(&self, label: LabelId) -> usize {
        label.index()
    }

    /// Lowest priority among rules testing `label`.
    pub fn min_consumer_priority(&self, label: LabelId) -> Option<i64> {
        self.consumers_of(label)
            .iter()
            .map(|&index| self.rules[index].priority)
            .min()
    }

    pub fn has_terminal(&self) -> bool {
        self.rules.iter().any(CompiledRule::is_terminal)
    }

    pub fn terminal_rules(&self) -> impl Iterator<Item = &CompiledRule> + '_ {
        self.rules.iter().filter(|rule| rule.is_terminal())
    }

    /// Producer rules of `index`'s conditions (consumer → producer edges),
    /// in ascending index order.
    pub fn dependencies(&self, index: usize) -> Vec<usize> {
        let deps: BTreeSet<usize> = self.rules[index]
            .conditions
            .iter()
            .flat_map(|&condition| self.producers_of(condition).iter().copied())
            .collect();
        deps.into_iter().collect()
    }

    /// Whether `label` is an action of some terminal rule.
    pub fn is_conclusion(&self, label: LabelId) -> bool {
        self.producers_of(label)
            .iter()
            .any(|&index| self.rules[index].is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::RuleDraft;

    fn rule(name: &str, kind: RuleKind, conditions: &[&str], actions: &[&str], priority: i64) -> Rule {
        Rule::new(
            RuleId::new(),
            RuleDraft {
                name: name.to_string(),
                category: Category::new("E").unwrap(),
                kind,
                logic: ConditionLogic::All,
                conditions: conditions.iter().map(|s| s.to_string()).collect(),
                actions: actions.iter().map(|s| s.to_string()).collect(),
                priority,
            },
        )
        .unwrap()
    }

    fn sample() -> RuleSet {
        RuleSet::compile(
            Category::new("E").unwrap(),
            &[
                rule("R2", RuleKind::Terminal, &["x", "b"], &["ok"], 1),
                rule("R1", RuleKind::Intermediate, &["a"], &["x"], 0),
            ],
        )
    }

    #[test]
    fn rules_are_sorted_by_priority() {
        let set = sample();
        let names: Vec<&str> = set.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["R1", "R2"]);
        assert_eq!(set.rule(1).index, 1);
    }

    #[test]
    fn equal_priorities_keep_store_order() {
        let set = RuleSet::compile(
            Category::new("E").unwrap(),
            &[
                rule("B", RuleKind::Terminal, &["q"], &["y"], 0),
                rule("A", RuleKind::Terminal, &["q"], &["z"], 0),
            ],
        );
        assert_eq!(set.rule(0).name, "B");
        assert_eq!(set.rule(1).name, "A");
    }

    #[test]
    fn askable_labels_are_unproduced_conditions() {
        let set = sample();
        let askable: Vec<&str> = set.askable_labels().iter().map(|&id| set.label(id)).collect();
        assert_eq!(askable, vec!["a", "b"]);

        let x = set.lookup("x").unwrap();
        assert!(!set.is_askable(x));
        let ok = set.lookup("ok").unwrap();
        assert!(!set.is_askable(ok));
        assert!(set.is_conclusion(ok));
    }

    #[test]
    fn dependencies_point_from_consumer_to_producer() {
        let set = sample();
        assert_eq!(set.dependencies(1), vec![0]);
        assert!(set.dependencies(0).is_empty());
    }

    #[test]
    fn min_consumer_priority_uses_lowest_consumer() {
        let set = sample();
        assert_eq!(set.min_consumer_priority(set.lookup("a").unwrap()), Some(0));
        assert_eq!(set.min_consumer_priority(set.lookup("b").unwrap()), Some(1));
        assert_eq!(set.min_consumer_priority(set.lookup("ok").unwrap()), None);
    }

    #[test]
    fn has_terminal_detects_terminal_rules() {
        assert!(sample().has_terminal());
        let set = RuleSet::compile(
            Category::new("E").unwrap(),
            &[rule("R1", RuleKind::Intermediate, &["a"], &["x"], 0)],
        );
        assert!(!set.has_terminal());
    }
}
