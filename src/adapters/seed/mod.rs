//! Seed rule loading.

mod file_rule_source;

pub use file_rule_source::FileRuleSource;
