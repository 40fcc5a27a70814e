//! Consultation aggregate.
//!
//! One interactive inference session over a pinned rule-set snapshot.
//! Every answer or skip pushes a snapshot first, so `go_back` can restore
//! the exact prior state.
//!
//! # Lifecycle
//!
//! `NotStarted` → `start` → `AwaitingAnswer` / `Inconclusive` → answers and
//! skips → `Completed` or `Impossible`. `reset` returns to `NotStarted`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::{
    Category, ConsultationStatus, SessionId, StateMachine, Timestamp,
};
use crate::domain::rules::{LabelId, RuleSet};

use super::errors::ConsultationError;
use super::executor::ForwardChainer;
use super::history::HistoryManager;
use super::outcome::{
    AnswerView, AppliedRuleView, ConditionView, ConsultationOutcome, ObservedCondition,
    ReasoningStep, StatusView,
};
use super::question_selector::{QuestionOrder, QuestionSelector, Selection};
use super::reachability::{Reachability, SkippedLabels};
use super::working_memory::{AnswerRecord, SessionState};

#[derive(Debug, Clone)]
pub struct Consultation {
    id: SessionId,
    rules: Arc<RuleSet>,
    order: QuestionOrder,
    state: SessionState,
    history: HistoryManager,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Consultation {
    /// Create a session that has not been started yet.
    pub fn new(id: SessionId, rules: Arc<RuleSet>, order: QuestionOrder) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            rules,
            order,
            state: SessionState::new(),
            history: HistoryManager::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn category(&self) -> &Category {
        self.rules.category()
    }

    pub fn status(&self) -> ConsultationStatus {
        self.state.status
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Start (or restart) the consultation from an empty fact table.
    ///
    /// # Errors
    ///
    /// - `NoTerminalRules` if the rule set cannot conclude anything; the
    ///   session is left in `Error`
    pub fn start(&mut self) -> Result<ConsultationOutcome, ConsultationError> {
        self.reset();
        if !self.rules.has_terminal() {
            self.state.status = ConsultationStatus::Error;
            return Err(ConsultationError::no_terminal_rules(self.category().as_str()));
        }
        self.advance()?;
        self.outcome()
    }

    /// Swap in a fresh rule snapshot and question order, then `start`.
    ///
    /// The session keeps its id and creation time; facts and history from
    /// the previous run are dropped.
    pub fn restart(
        &mut self,
        rules: Arc<RuleSet>,
        order: QuestionOrder,
    ) -> Result<ConsultationOutcome, ConsultationError> {
        self.rules = rules;
        self.order = order;
        self.start()
    }

    /// Record an answer and run the engine.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` before `start`
    /// - `SessionFinished` once a conclusion (or failure) was reached
    /// - `UnknownQuestion` if the label is not askable in this rule set
    /// - `FactAlreadyKnown` if the label already has a value
    pub fn answer(
        &mut self,
        question: &str,
        value: bool,
    ) -> Result<ConsultationOutcome, ConsultationError> {
        let label = self.askable_label(question)?;
        if self.state.memory.is_known(label) {
            return Err(ConsultationError::fact_already_known(question));
        }

        self.history.push(self.state.clone());
        self.state.skipped.remove(&label);
        self.state.memory.assert(label, value);
        self.state.answers.push(AnswerRecord {
            label,
            value: Some(value),
        });
        self.advance()?;
        self.outcome()
    }

    /// Mark a question as skipped. Nothing is asserted; the question stays
    /// unknown and may still be answered later.
    ///
    /// # Errors
    ///
    /// Same as [`Consultation::answer`].
    pub fn skip(&mut self, question: &str) -> Result<ConsultationOutcome, ConsultationError> {
        let label = self.askable_label(question)?;
        if self.state.memory.is_known(label) {
            return Err(ConsultationError::fact_already_known(question));
        }
        if self.state.is_skipped(label) {
            return self.outcome();
        }

        self.history.push(self.state.clone());
        self.state.skipped.insert(label);
        self.state.answers.push(AnswerRecord { label, value: None });
        self.advance()?;
        self.outcome()
    }

    /// Undo the most recent answer or skip.
    ///
    /// # Errors
    ///
    /// - `NoHistory` if there is nothing to undo
    pub fn go_back(&mut self) -> Result<ConsultationOutcome, ConsultationError> {
        let snapshot = self.history.pop().ok_or(ConsultationError::NoHistory)?;
        self.state = snapshot;
        self.updated_at = Timestamp::now();
        self.outcome()
    }

    /// Clear facts, log and history; back to `NotStarted`.
    pub fn reset(&mut self) {
        self.state = SessionState::new();
        self.history.clear();
        self.updated_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The outcome for the current state.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` before `start`
    /// - `NoTerminalRules` if `start` failed
    pub fn outcome(&self) -> Result<ConsultationOutcome, ConsultationError> {
        match self.state.status {
            ConsultationStatus::NotStarted => Err(ConsultationError::NoActiveSession),
            ConsultationStatus::Error => {
                Err(ConsultationError::no_terminal_rules(self.category().as_str()))
            }
            ConsultationStatus::Completed => Ok(ConsultationOutcome::Completed {
                results: self.results(),
                applied_rules: self.applied_views(),
            }),
            ConsultationStatus::Impossible => Ok(ConsultationOutcome::Impossible {
                applied_rules: self.applied_views(),
            }),
            ConsultationStatus::AwaitingAnswer | ConsultationStatus::Inconclusive => {
                let selection = self.selection();
                let reasoning_chain = self.chain_views(&selection);
                match selection.next_question() {
                    Some(question) => Ok(ConsultationOutcome::NeedInput {
                        question: self.rules.label(question).to_string(),
                        available_questions: self.label_texts(selection.available()),
                        reasoning_chain,
                    }),
                    None => Ok(ConsultationOutcome::Inconclusive {
                        skipped_questions: self.skipped_texts(),
                        reasoning_chain,
                    }),
                }
            }
        }
    }

    /// The next question to ask.
    ///
    /// # Errors
    ///
    /// - `StuckSession` when every remaining path needs a skipped question
    /// - `SessionFinished` once a conclusion was reached
    /// - `NoActiveSession` before `start`
    pub fn current_question(&self) -> Result<ConsultationOutcome, ConsultationError> {
        match self.state.status {
            ConsultationStatus::Inconclusive => Err(ConsultationError::StuckSession),
            ConsultationStatus::Completed | ConsultationStatus::Impossible => {
                Err(ConsultationError::SessionFinished)
            }
            _ => self.outcome(),
        }
    }

    pub fn status_view(&self) -> StatusView {
        let conflict_set = ForwardChainer::new(&self.rules)
            .conflict_set(&self.state)
            .into_iter()
            .map(|index| self.rules.rule(index).name.clone())
            .collect();

        StatusView {
            session_id: self.id,
            category: self.category().clone(),
            status: self.state.status,
            findings: self
                .state
                .memory
                .iter()
                .map(|(label, value)| (self.rules.label(label).to_string(), value))
                .collect(),
            conflict_set,
            applied_rules: self.applied_views(),
            answers: self
                .state
                .answers
                .iter()
                .map(|record| AnswerView {
                    question: self.rules.label(record.label).to_string(),
                    value: record.value,
                    skipped: record.value.is_none(),
                })
                .collect(),
            skipped_questions: self.skipped_texts(),
            history_depth: self.history.depth(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Engine
    // ─────────────────────────────────────────────────────────────────────────

    fn askable_label(&self, question: &str) -> Result<LabelId, ConsultationError> {
        match self.state.status {
            ConsultationStatus::NotStarted => return Err(ConsultationError::NoActiveSession),
            status if !status.accepts_input() => return Err(ConsultationError::SessionFinished),
            _ => {}
        }
        self.rules
            .lookup(question)
            .filter(|&label| self.rules.is_askable(label))
            .ok_or_else(|| ConsultationError::unknown_question(question))
    }

    /// Fire rules to a fixpoint and derive the new status.
    fn advance(&mut self) -> Result<(), ConsultationError> {
        let next = if ForwardChainer::new(&self.rules).run(&mut self.state).is_some() {
            ConsultationStatus::Completed
        } else if !Reachability::analyze(&self.rules, &self.state, SkippedLabels::Available)
            .any_live_terminal(&self.rules)
        {
            ConsultationStatus::Impossible
        } else if self.selection().is_empty() {
            ConsultationStatus::Inconclusive
        } else {
            ConsultationStatus::AwaitingAnswer
        };

        self.state.status = self
            .state
            .status
            .transition_to(next)
            .map_err(|e| ConsultationError::invalid_state(e.to_string()))?;
        self.updated_at = Timestamp::now();

        tracing::debug!(session_id = %self.id, status = ?next, "consultation advanced");
        Ok(())
    }

    fn selection(&self) -> Selection {
        let reach = Reachability::analyze(&self.rules, &self.state, SkippedLabels::Unavailable);
        QuestionSelector::new(&self.rules, &self.order).select(&self.state, &reach)
    }

    fn results(&self) -> BTreeMap<String, bool> {
        self.state
            .memory
            .iter()
            .filter(|&(label, value)| value && self.rules.is_conclusion(label))
            .map(|(label, value)| (self.rules.label(label).to_string(), value))
            .collect()
    }

    fn applied_views(&self) -> Vec<AppliedRuleView> {
        self.state
            .applied
            .iter()
            .map(|entry| AppliedRuleView {
                rule: self.rules.rule(entry.rule).name.clone(),
                conditions: entry
                    .conditions
                    .iter()
                    .map(|&(label, value)| ObservedCondition {
                        label: self.rules.label(label).to_string(),
                        value,
                    })
                    .collect(),
                actions: self.label_texts(&entry.actions),
            })
            .collect()
    }

    fn chain_views(&self, selection: &Selection) -> Vec<ReasoningStep> {
        selection
            .chain
            .iter()
            .map(|link| {
                let rule = self.rules.rule(link.rule);
                ReasoningStep {
                    rule: rule.name.clone(),
                    kind: rule.kind,
                    logic: rule.logic,
                    fired: link.fired,
                    conditions: link
                        .conditions
                        .iter()
                        .map(|&(label, status)| ConditionView {
                            label: self.rules.label(label).to_string(),
                            status,
                        })
                        .collect(),
                    actions: self.label_texts(&rule.actions),
                }
            })
            .collect()
    }

    fn label_texts(&self, labels: &[LabelId]) -> Vec<String> {
        labels
            .iter()
            .map(|&label| self.rules.label(label).to_string())
            .collect()
    }

    fn skipped_texts(&self) -> Vec<String> {
        let mut skipped: Vec<LabelId> = self.state.skipped.iter().copied().collect();
        self.order.sort(&self.rules, &mut skipped);
        self.label_texts(&skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RuleId;
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

    fn consultation(rules: &[Rule]) -> Consultation {
        let set = Arc::new(RuleSet::compile(Category::new("E").unwrap(), rules));
        Consultation::new(SessionId::new(), set, QuestionOrder::default())
    }

    fn two_step() -> Consultation {
        consultation(&[
            rule("R1", RuleKind::Intermediate, ConditionLogic::All, &["a"], &["x"], 0),
            rule("R2", RuleKind::Terminal, ConditionLogic::All, &["x", "b"], &["ok"], 1),
        ])
    }

    #[test]
    fn end_to_end_two_step_chain() {
        let mut c = two_step();

        let outcome = c.start().unwrap();
        assert_eq!(outcome.question(), Some("a"));

        let outcome = c.answer("a", true).unwrap();
        assert_eq!(outcome.question(), Some("b"));
        assert!(c.state().memory.is_true(c.rules().lookup("x").unwrap()));

        match c.answer("b", true).unwrap() {
            ConsultationOutcome::Completed { results, applied_rules } => {
                assert_eq!(results, BTreeMap::from([("ok".to_string(), true)]));
                let names: Vec<&str> = applied_rules.iter().map(|r| r.rule.as_str()).collect();
                assert_eq!(names, vec!["R1", "R2"]);
            }
            other => panic!("expected completed, got {:?}", other),
        }
        assert_eq!(c.status(), ConsultationStatus::Completed);
    }

    #[test]
    fn false_answer_makes_conclusion_impossible() {
        let mut c = two_step();
        c.start().unwrap();
        let outcome = c.answer("a", false).unwrap();
        assert!(matches!(outcome, ConsultationOutcome::Impossible { .. }));
    }

    #[test]
    fn answer_before_start_fails() {
        let mut c = two_step();
        assert_eq!(c.answer("a", true), Err(ConsultationError::NoActiveSession));
    }

    #[test]
    fn answer_after_completion_fails() {
        let mut c = consultation(&[rule(
            "R1",
            RuleKind::Terminal,
            ConditionLogic::All,
            &["a"],
            &["ok"],
            0,
        )]);
        c.start().unwrap();
        c.answer("a", true).unwrap();
        assert_eq!(c.answer("a", true), Err(ConsultationError::SessionFinished));
    }

    #[test]
    fn answering_known_label_fails() {
        let mut c = consultation(&[rule(
            "R1",
            RuleKind::Terminal,
            ConditionLogic::All,
            &["a", "b"],
            &["ok"],
            0,
        )]);
        c.start().unwrap();
        c.answer("a", true).unwrap();
        assert_eq!(
            c.answer("a", false),
            Err(ConsultationError::fact_already_known("a"))
        );
    }

    #[test]
    fn derived_and_unknown_labels_are_not_answerable() {
        let mut c = two_step();
        c.start().unwrap();
        assert_eq!(c.answer("x", true), Err(ConsultationError::unknown_question("x")));
        assert_eq!(c.answer("zzz", true), Err(ConsultationError::unknown_question("zzz")));
    }

    #[test]
    fn go_back_restores_state_before_answer() {
        let mut c = two_step();
        c.start().unwrap();
        let before = c.state().clone();

        c.answer("a", true).unwrap();
        let outcome = c.go_back().unwrap();

        assert_eq!(c.state(), &before);
        assert_eq!(outcome.question(), Some("a"));
        assert_eq!(c.go_back(), Err(ConsultationError::NoHistory));
    }

    #[test]
    fn skipping_only_path_is_inconclusive_not_impossible() {
        let mut c = consultation(&[rule(
            "R1",
            RuleKind::Terminal,
            ConditionLogic::All,
            &["a"],
            &["ok"],
            0,
        )]);
        c.start().unwrap();

        let outcome = c.skip("a").unwrap();
        assert!(matches!(outcome, ConsultationOutcome::Inconclusive { .. }));
        assert_eq!(c.current_question(), Err(ConsultationError::StuckSession));

        // A skipped question may still be answered.
        let outcome = c.answer("a", true).unwrap();
        assert!(matches!(outcome, ConsultationOutcome::Completed { .. }));
    }

    #[test]
    fn skip_moves_to_next_candidate() {
        let mut c = consultation(&[rule(
            "R1",
            RuleKind::Terminal,
            ConditionLogic::Any,
            &["a", "b"],
            &["ok"],
            0,
        )]);
        c.start().unwrap();
        let outcome = c.skip("a").unwrap();
        assert_eq!(outcome.question(), Some("b"));
        assert_eq!(c.status_view().skipped_questions, vec!["a".to_string()]);
    }

    #[test]
    fn restart_replaces_snapshot_and_keeps_identity() {
        let mut c = two_step();
        let id = *c.id();
        c.start().unwrap();
        c.answer("a", true).unwrap();

        let replacement = Arc::new(RuleSet::compile(
            Category::new("E").unwrap(),
            &[rule("R9", RuleKind::Terminal, ConditionLogic::All, &["c"], &["fine"], 0)],
        ));
        let outcome = c.restart(replacement, QuestionOrder::default()).unwrap();

        assert_eq!(c.id(), &id);
        assert_eq!(outcome.question(), Some("c"));
        assert_eq!(c.history_depth(), 0);
        assert!(c.status_view().findings.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut c = two_step();
        c.start().unwrap();
        c.answer("a", true).unwrap();

        c.reset();

        let view = c.status_view();
        assert_eq!(view.status, ConsultationStatus::NotStarted);
        assert!(view.findings.is_empty());
        assert!(view.applied_rules.is_empty());
        assert_eq!(view.history_depth, 0);
    }

    #[test]
    fn start_without_terminal_rules_errors() {
        let mut c = consultation(&[rule(
            "R1",
            RuleKind::Intermediate,
            ConditionLogic::All,
            &["a"],
            &["x"],
            0,
        )]);
        assert_eq!(c.start(), Err(ConsultationError::no_terminal_rules("E")));
        assert_eq!(c.status(), ConsultationStatus::Error);
    }

    #[test]
    fn any_rule_fires_on_single_true_condition() {
        let mut c = consultation(&[rule(
            "R1",
            RuleKind::Terminal,
            ConditionLogic::Any,
            &["a", "b"],
            &["ok"],
            0,
        )]);
        c.start().unwrap();
        let outcome = c.answer("b", true).unwrap();
        match outcome {
            ConsultationOutcome::Completed { applied_rules, .. } => {
                assert_eq!(applied_rules[0].conditions[0].value, None);
                assert_eq!(applied_rules[0].conditions[1].value, Some(true));
            }
            other => panic!("expected completed, got {:?}", other),
        }
    }
}
