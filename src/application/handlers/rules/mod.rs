//! Rule management command and query handlers.

mod create_rule;
mod delete_rule;
mod export_rules;
mod get_rule;
mod import_rules;
mod list_questions;
mod list_rules;
mod reorder_rules;
mod seed_rules;
mod update_rule;

pub use create_rule::{CreateRuleCommand, CreateRuleHandler};
pub use delete_rule::{DeleteRuleCommand, DeleteRuleHandler};
pub use export_rules::{ExportRulesHandler, ExportRulesQuery, RuleExport, EXPORT_FORMAT_VERSION};
pub use get_rule::{GetRuleHandler, GetRuleQuery};
pub use import_rules::{ImportRulesCommand, ImportRulesHandler, ImportSummary};
pub use list_questions::{
    ListQuestionsHandler, ListQuestionsQuery, QuestionCatalogView, QuestionEntry,
};
pub use list_rules::{ListCategoriesHandler, ListRulesHandler, ListRulesQuery};
pub use reorder_rules::{ReorderRulesCommand, ReorderRulesHandler, ReorderRulesResult};
pub use seed_rules::{SeedRulesCommand, SeedRulesHandler};
pub use update_rule::{UpdateRuleCommand, UpdateRuleHandler};
