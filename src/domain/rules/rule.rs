//! Rule entity.
//!
//! A rule says: when its conditions hold (ALL of them, or ANY of them),
//! assert each of its actions as a true fact. Conditions and actions are
//! plain text labels; a condition label either names a question the user
//! answers or is the exact text of another rule's action.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Category, RuleId, Timestamp};

use super::RuleError;

/// Whether firing a rule ends the consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleKind {
    /// Yields a final eligibility conclusion.
    #[serde(alias = "terminal", alias = "#n!")]
    Terminal,
    /// Feeds other rules' conditions.
    #[serde(alias = "intermediate", alias = "#i", alias = "#m")]
    Intermediate,
}

impl RuleKind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RuleKind::Terminal)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Terminal => write!(f, "TERMINAL"),
            RuleKind::Intermediate => write!(f, "INTERMEDIATE"),
        }
    }
}

/// How a rule combines its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConditionLogic {
    /// Every condition must be true.
    #[default]
    #[serde(alias = "all", alias = "AND", alias = "and")]
    All,
    /// At least one condition must be true.
    #[serde(alias = "any", alias = "OR", alias = "or")]
    Any,
}

impl ConditionLogic {
    /// Combines per-condition values. Unknown (`None`) never satisfies.
    pub fn evaluate<I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        let mut values = values.into_iter();
        match self {
            ConditionLogic::All => values.all(|v| v == Some(true)),
            ConditionLogic::Any => values.any(|v| v == Some(true)),
        }
    }
}

impl fmt::Display for ConditionLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionLogic::All => write!(f, "ALL"),
            ConditionLogic::Any => write!(f, "ANY"),
        }
    }
}

/// Everything needed to create a rule; also the export/import format.
///
/// Field aliases accept the legacy export format (`visa_type`,
/// `rule_type`, `condition_logic`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub name: String,
    #[serde(alias = "visa_type")]
    pub category: Category,
    #[serde(alias = "rule_type")]
    pub kind: RuleKind,
    #[serde(alias = "condition_logic", default)]
    pub logic: ConditionLogic,
    pub conditions: Vec<String>,
    pub actions: Vec<String>,
    #[serde(default)]
    pub priority: i64,
}

/// Partial update of a rule. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RulePatch {
    pub name: Option<String>,
    #[serde(alias = "visa_type")]
    pub category: Option<Category>,
    #[serde(alias = "rule_type")]
    pub kind: Option<RuleKind>,
    #[serde(alias = "condition_logic")]
    pub logic: Option<ConditionLogic>,
    pub conditions: Option<Vec<String>>,
    pub actions: Option<Vec<String>>,
    pub priority: Option<i64>,
}

/// A production rule scoped to one category.
///
/// # Invariants
///
/// - `name` is non-blank
/// - `conditions` and `actions` are non-empty and contain no blank labels
///
/// Rules loaded through [`Rule::reconstitute`] skip these checks so that
/// the validator can report on stored data as it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    id: RuleId,
    name: String,
    category: Category,
    kind: RuleKind,
    logic: ConditionLogic,
    conditions: Vec<String>,
    actions: Vec<String>,
    priority: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Rule {
    /// Create a new rule from a draft.
    ///
    /// # Errors
    ///
    /// - `Malformed` if the name is blank, conditions or actions are empty,
    ///   or any label is blank
    pub fn new(id: RuleId, draft: RuleDraft) -> Result<Self, RuleError> {
        Self::check_well_formed(&draft.name, &draft.conditions, &draft.actions)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            name: draft.name,
            category: draft.category,
            kind: draft.kind,
            logic: draft.logic,
            conditions: draft.conditions,
            actions: draft.actions,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a rule from storage (no validation).
    pub fn reconstitute(id: RuleId, draft: RuleDraft) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name: draft.name,
            category: draft.category,
            kind: draft.kind,
            logic: draft.logic,
            conditions: draft.conditions,
            actions: draft.actions,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &RuleId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn logic(&self) -> ConditionLogic {
        self.logic
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// Returns the rule as an export/import draft.
    pub fn to_draft(&self) -> RuleDraft {
        RuleDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            kind: self.kind,
            logic: self.logic,
            conditions: self.conditions.clone(),
            actions: self.actions.clone(),
            priority: self.priority,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// - `Malformed` if the result would violate the rule invariants; the
    ///   rule is left unchanged in that case
    pub fn apply(&mut self, patch: RulePatch) -> Result<(), RuleError> {
        let name = patch.name.unwrap_or_else(|| self.name.clone());
        let conditions = patch.conditions.unwrap_or_else(|| self.conditions.clone());
        let actions = patch.actions.unwrap_or_else(|| self.actions.clone());
        Self::check_well_formed(&name, &conditions, &actions)?;

        self.name = name;
        self.conditions = conditions;
        self.actions = actions;
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(logic) = patch.logic {
            self.logic = logic;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Overwrite every field from a draft (import with overwrite).
    pub fn replace_with(&mut self, draft: RuleDraft) -> Result<(), RuleError> {
        Self::check_well_formed(&draft.name, &draft.conditions, &draft.actions)?;
        self.name = draft.name;
        self.category = draft.category;
        self.kind = draft.kind;
        self.logic = draft.logic;
        self.conditions = draft.conditions;
        self.actions = draft.actions;
        self.priority = draft.priority;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn set_priority(&mut self, priority: i64) {
        if self.priority != priority {
            self.priority = priority;
            self.updated_at = Timestamp::now();
        }
    }

    fn check_well_formed(
        name: &str,
        conditions: &[String],
        actions: &[String],
    ) -> Result<(), RuleError> {
        if name.trim().is_empty() {
            return Err(RuleError::malformed(name, "name cannot be empty"));
        }
        if conditions.is_empty() {
            return Err(RuleError::malformed(name, "conditions cannot be empty"));
        }
        if actions.is_empty() {
            return Err(RuleError::malformed(name, "actions cannot be empty"));
        }
        if conditions.iter().chain(actions).any(|label| label.trim().is_empty()) {
            return Err(RuleError::malformed(name, "labels cannot be blank"));
        }
        Ok(())
    }
}
