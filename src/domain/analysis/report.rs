//! Validation report types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Category;
use crate::domain::rules::RuleKind;

/// Overall verdict of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyErrorKind {
    DuplicateName,
    EmptyConditions,
    EmptyActions,
    BlankLabel,
    NoTerminalRules,
}

/// A structural defect of the rule base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyError {
    #[serde(rename = "type")]
    pub kind: ConsistencyErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    pub description: String,
}

impl ConsistencyError {
    pub fn for_rule(
        kind: ConsistencyErrorKind,
        rule_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            rule_name: Some(rule_name.into()),
            description: description.into(),
        }
    }
}

/// Rules whose dependencies form a loop, in dependency order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircularDependency {
    pub cycle: Vec<String>,
    pub description: String,
}

impl CircularDependency {
    pub fn new(cycle: Vec<String>) -> Self {
        let mut path = cycle.clone();
        if let Some(first) = cycle.first() {
            path.push(first.clone());
        }
        Self {
            description: path.join(" → "),
            cycle,
        }
    }

    pub fn contains(&self, rule_name: &str) -> bool {
        self.cycle.iter().any(|name| name == rule_name)
    }
}

/// A rule that can never fire because some condition can never hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreachableRule {
    pub rule_name: String,
    pub rule_type: RuleKind,
    pub unreachable_conditions: Vec<String>,
    pub description: String,
}

/// A producer ordered after one of its consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderViolation {
    pub producer_rule: String,
    pub producer_priority: i64,
    pub consumer_rule: String,
    pub consumer_priority: i64,
    pub action: String,
    pub suggested_priority: i64,
    #[serde(default)]
    pub description: String,
}

impl OrderViolation {
    pub fn new(
        producer_rule: impl Into<String>,
        producer_priority: i64,
        consumer_rule: impl Into<String>,
        consumer_priority: i64,
        action: impl Into<String>,
    ) -> Self {
        let producer_rule = producer_rule.into();
        let consumer_rule = consumer_rule.into();
        let action = action.into();
        let description = format!(
            "Rule {} (priority={}) produces '{}' but runs after its consumer {} (priority={})",
            producer_rule, producer_priority, action, consumer_rule, consumer_priority
        );
        Self {
            producer_rule,
            producer_priority,
            consumer_rule,
            consumer_priority,
            action,
            suggested_priority: consumer_priority - 1,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub category: Category,
    pub total_rules: usize,
    pub status: ValidationStatus,
    pub error_count: usize,
    pub warning_count: usize,
    pub consistency_errors: Vec<ConsistencyError>,
    pub circular_dependencies: Vec<CircularDependency>,
    pub unreachable_rules: Vec<UnreachableRule>,
    pub dependency_order_violations: Vec<OrderViolation>,
}

impl ValidationReport {
    /// Consistency errors and order violations are errors; cycles and
    /// unreachable rules are warnings.
    pub fn new(
        category: Category,
        total_rules: usize,
        consistency_errors: Vec<ConsistencyError>,
        circular_dependencies: Vec<CircularDependency>,
        unreachable_rules: Vec<UnreachableRule>,
        dependency_order_violations: Vec<OrderViolation>,
    ) -> Self {
        let error_count = consistency_errors.len() + dependency_order_violations.len();
        let warning_count = circular_dependencies.len() + unreachable_rules.len();
        let status = if error_count > 0 {
            ValidationStatus::Error
        } else if warning_count > 0 {
            ValidationStatus::Warning
        } else {
            ValidationStatus::Ok
        };
        Self {
            category,
            total_rules,
            status,
            error_count,
            warning_count,
            consistency_errors,
            circular_dependencies,
            unreachable_rules,
            dependency_order_violations,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ValidationStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        Category::new("E").unwrap()
    }

    #[test]
    fn cycle_description_closes_the_loop() {
        let cycle = CircularDependency::new(vec!["R1".to_string(), "R2".to_string()]);
        assert_eq!(cycle.description, "R1 → R2 → R1");
        assert!(cycle.contains("R2"));
    }

    #[test]
    fn order_violation_suggests_one_below_consumer() {
        let violation = OrderViolation::new("R1", 5, "R2", 1, "x");
        assert_eq!(violation.suggested_priority, 0);
    }

    #[test]
    fn warnings_only_yield_warning_status() {
        let report = ValidationReport::new(
            category(),
            2,
            vec![],
            vec![CircularDependency::new(vec!["R1".to_string()])],
            vec![],
            vec![],
        );
        assert_eq!(report.status, ValidationStatus::Warning);
        assert_eq!(report.warning_count, 1);
        assert_eq!(report.error_count, 0);
    }

    #[test]
    fn order_violation_is_an_error() {
        let report = ValidationReport::new(
            category(),
            2,
            vec![],
            vec![],
            vec![],
            vec![OrderViolation::new("R1", 5, "R2", 1, "x")],
        );
        assert_eq!(report.status, ValidationStatus::Error);
    }

    #[test]
    fn empty_report_is_ok() {
        let report = ValidationReport::new(category(), 0, vec![], vec![], vec![], vec![]);
        assert!(report.is_ok());
        assert_eq!(serde_json::to_value(&report).unwrap()["status"], "ok");
    }
}
