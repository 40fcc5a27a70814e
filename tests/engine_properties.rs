//! Property tests for the inference engine over generated rule bases.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use visa_expert::domain::consultation::{Consultation, ConsultationOutcome, QuestionOrder};
use visa_expert::domain::foundation::{Category, ConsultationStatus, RuleId, SessionId};
use visa_expert::domain::rules::{ConditionLogic, Rule, RuleDraft, RuleKind, RuleSet};

const LABELS: usize = 6;

/// (conditions, action, terminal, any-logic)
type RuleShape = (Vec<usize>, usize, bool, bool);

fn rule_shape() -> impl Strategy<Value = RuleShape> {
    (
        prop::sample::subsequence((0..LABELS).collect::<Vec<_>>(), 1..=3),
        0..LABELS + 2,
        any::<bool>(),
        any::<bool>(),
    )
}

fn build(shapes: &[RuleShape]) -> Consultation {
    let category = Category::new("P").unwrap();
    let last = shapes.len() - 1;
    let rules: Vec<Rule> = shapes
        .iter()
        .enumerate()
        .map(|(i, (conditions, action, terminal, any))| {
            Rule::new(
                RuleId::new(),
                RuleDraft {
                    name: format!("R{}", i),
                    category: category.clone(),
                    kind: if *terminal || i == last {
                        RuleKind::Terminal
                    } else {
                        RuleKind::Intermediate
                    },
                    logic: if *any {
                        ConditionLogic::Any
                    } else {
                        ConditionLogic::All
                    },
                    conditions: conditions.iter().map(|c| format!("l{}", c)).collect(),
                    actions: vec![format!("l{}", action)],
                    priority: i as i64,
                },
            )
            .unwrap()
        })
        .collect();

    let set = RuleSet::compile(category, &rules);
    let order = QuestionOrder::from_catalog(&set, &[]);
    Consultation::new(SessionId::new(), Arc::new(set), order)
}

fn assert_fired_once(consultation: &Consultation) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for entry in &consultation.state().applied {
        prop_assert!(seen.insert(entry.rule), "rule {} fired twice", entry.rule);
    }
    prop_assert_eq!(seen.len(), consultation.state().fired.len());
    Ok(())
}

proptest! {
    #[test]
    fn rules_fire_at_most_once_and_undo_is_exact(
        shapes in prop::collection::vec(rule_shape(), 1..8),
        answers in prop::collection::vec(any::<bool>(), 0..10),
    ) {
        let mut consultation = build(&shapes);
        let mut outcome = consultation.start().unwrap();
        assert_fired_once(&consultation)?;

        for value in answers {
            let question = match &outcome {
                ConsultationOutcome::NeedInput { question, .. } => question.clone(),
                _ => break,
            };

            let before = consultation.state().clone();
            let depth = consultation.history_depth();

            consultation.answer(&question, value).unwrap();
            assert_fired_once(&consultation)?;

            consultation.go_back().unwrap();
            prop_assert_eq!(consultation.state(), &before);
            prop_assert_eq!(consultation.history_depth(), depth);

            outcome = consultation.answer(&question, value).unwrap();
        }
    }

    #[test]
    fn reset_always_returns_to_not_started(
        shapes in prop::collection::vec(rule_shape(), 1..8),
        answers in prop::collection::vec(any::<bool>(), 0..6),
    ) {
        let mut consultation = build(&shapes);
        let mut outcome = consultation.start().unwrap();
        for value in answers {
            match &outcome {
                ConsultationOutcome::NeedInput { question, .. } => {
                    let question = question.clone();
                    outcome = consultation.answer(&question, value).unwrap();
                }
                _ => break,
            }
        }

        consultation.reset();

        let view = consultation.status_view();
        prop_assert_eq!(view.status, ConsultationStatus::NotStarted);
        prop_assert!(view.findings.is_empty());
        prop_assert!(view.applied_rules.is_empty());
        prop_assert_eq!(view.history_depth, 0);
    }

    #[test]
    fn condition_logic_matches_definition(
        values in prop::collection::vec(prop::option::of(any::<bool>()), 1..6),
    ) {
        let all = values.iter().all(|v| *v == Some(true));
        let any = values.iter().any(|v| *v == Some(true));
        prop_assert_eq!(ConditionLogic::All.evaluate(values.iter().copied()), all);
        prop_assert_eq!(ConditionLogic::Any.evaluate(values.iter().copied()), any);
    }
}
