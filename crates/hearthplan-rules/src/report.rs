//! Violations, per-rule results, and the compliance report.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ComplianceContext;

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One evaluated finding: what failed, where, and how to fix it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub code_section: String,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub required_value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    /// Ordered remediation suggestions, user-visible.
    #[serde(default)]
    pub remediation: Vec<String>,
}

impl Violation {
    pub fn new(id: &str, description: impl Into<String>, severity: Severity, section: &str) -> Self {
        Violation {
            id: id.to_string(),
            description: description.into(),
            severity,
            code_section: section.to_string(),
            room_id: None,
            current_value: None,
            required_value: None,
            unit: None,
            remediation: Vec::new(),
        }
    }

    pub fn room(mut self, room_id: &str) -> Self {
        self.room_id = Some(room_id.to_string());
        self
    }

    pub fn values(mut self, current: f64, required: f64, unit: &str) -> Self {
        self.current_value = Some(current);
        self.required_value = Some(required);
        self.unit = Some(unit.to_string());
        self
    }

    pub fn remedy(mut self, suggestion: impl Into<String>) -> Self {
        self.remediation.push(suggestion.into());
        self
    }
}

/// Outcome of evaluating one rule against one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub passed: bool,
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Wall-clock cost of the check, metadata only.
    pub execution_time_ms: f64,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl RuleResult {
    /// Empty passing result; the engine fills in id, pass flag, and timing.
    pub fn new() -> Self {
        RuleResult {
            rule_id: String::new(),
            passed: true,
            violations: Vec::new(),
            recommendations: Vec::new(),
            execution_time_ms: 0.0,
            metadata: HashMap::new(),
        }
    }

    pub fn with_violations(violations: Vec<Violation>) -> Self {
        RuleResult {
            violations,
            ..Self::new()
        }
    }

    pub fn violation(mut self, v: Violation) -> Self {
        self.violations.push(v);
        self
    }

    pub fn recommend(mut self, text: impl Into<String>) -> Self {
        self.recommendations.push(text.into());
        self
    }

    pub fn note(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations.iter().filter(|v| v.severity == severity).count()
    }
}

impl Default for RuleResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary counters over a report's rule results.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_rules: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub info: usize,
    pub critical: usize,
    pub skipped: usize,
    /// passed / total × 100.
    pub compliance_percent: f64,
}

impl ComplianceSummary {
    pub fn from_results(results: &[RuleResult], skipped: usize) -> Self {
        let total_rules = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total_rules - passed;
        let warnings = results.iter().map(|r| r.count(Severity::Warning)).sum();
        let info = results.iter().map(|r| r.count(Severity::Info)).sum();
        let critical = results.iter().map(|r| r.count(Severity::Error)).sum();
        let compliance_percent = if total_rules == 0 {
            100.0
        } else {
            (passed as f64 / total_rules as f64 * 10000.0).round() / 100.0
        };
        ComplianceSummary {
            total_rules,
            passed,
            failed,
            warnings,
            info,
            critical,
            skipped,
            compliance_percent,
        }
    }
}

/// The full output of one compliance run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub id: String,
    pub plan_id: String,
    pub jurisdiction: String,
    /// Unix milliseconds, metadata only.
    pub timestamp_ms: u64,
    pub overall_compliant: bool,
    pub results: Vec<RuleResult>,
    pub summary: ComplianceSummary,
    pub context: ComplianceContext,
    pub engine_version: String,
    pub ruleset_version: String,
    pub total_time_ms: f64,
}

impl ComplianceReport {
    pub fn result(&self, rule_id: &str) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.rule_id == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
        assert_eq!(serde_json::to_string(&Severity::Info).unwrap(), "\"info\"");
    }

    #[test]
    fn test_violation_builder() {
        let v = Violation::new("test-v", "too small", Severity::Error, "R304.1")
            .room("bedroom-1")
            .values(50.0, 70.0, "sq ft")
            .remedy("Enlarge the bedroom to at least 70 sq ft");
        assert_eq!(v.room_id.as_deref(), Some("bedroom-1"));
        assert_eq!(v.current_value, Some(50.0));
        assert_eq!(v.required_value, Some(70.0));
        assert_eq!(v.unit.as_deref(), Some("sq ft"));
        assert_eq!(v.remediation.len(), 1);
    }

    #[test]
    fn test_summary_counters() {
        let mut pass = RuleResult::new();
        pass.rule_id = "a".into();
        let mut warn = RuleResult::with_violations(vec![Violation::new(
            "w",
            "minor",
            Severity::Warning,
            "X",
        )]);
        warn.rule_id = "b".into();
        let mut fail = RuleResult::with_violations(vec![Violation::new(
            "e",
            "major",
            Severity::Error,
            "Y",
        )]);
        fail.rule_id = "c".into();
        fail.passed = false;

        let summary = ComplianceSummary::from_results(&[pass, warn, fail], 2);
        assert_eq!(summary.total_rules, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.skipped, 2);
        assert!((summary.compliance_percent - 66.67).abs() < 0.01);
    }
}
