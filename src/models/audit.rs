//! Audit trail models.
//!
//! Every rule applied while composing a settlement records an [`AuditStep`]
//! with its inputs, outputs and a human-readable explanation, so that each
//! line of the settlement can be traced back to the rule that produced it.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute backing this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag unusual inputs that do not prevent the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use settlement_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the step recorded for a rule, if any.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }

    /// Returns the step number to use for the next recorded step.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_step(step_number: u32, rule_id: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: "Sample".to_string(),
            legal_ref: "CLT art. 477".to_string(),
            input: serde_json::json!({ "value": "1" }),
            output: serde_json::json!({ "value": "2" }),
            reasoning: "sample".to_string(),
        }
    }

    #[test]
    fn test_step_lookup_by_rule_id() {
        let trace = AuditTrace {
            steps: vec![sample_step(1, "salary_balance"), sample_step(2, "notice")],
            warnings: vec![],
        };

        assert_eq!(trace.step("notice").unwrap().step_number, 2);
        assert!(trace.step("missing").is_none());
        assert_eq!(trace.next_step_number(), 3);
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = sample_step(1, "salary_balance");
        let json = serde_json::to_value(&step).unwrap();

        assert_eq!(json["rule_id"], "salary_balance");
        assert_eq!(json["legal_ref"], "CLT art. 477");
        assert_eq!(json["input"]["value"], "1");

        let back: AuditStep = serde_json::from_value(json).unwrap();
        assert_eq!(back, step);
    }
}
