//! Rules domain module.
//!
//! Holds the production rules of each category (visa type), the question
//! catalog, and the compiled read-only `RuleSet` consumed by the inference
//! engine and by static analysis.

mod errors;
mod label;
mod question;
mod rule;
mod rule_set;

pub use errors::RuleError;
pub use label::{LabelId, LabelInterner};
pub use question::QuestionPriority;
pub use rule::{ConditionLogic, Rule, RuleDraft, RuleKind, RulePatch};
pub use rule_set::{CompiledRule, RuleSet};
