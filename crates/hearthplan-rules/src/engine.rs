//! The compliance engine — seeds the registry with the base library,
//! applies jurisdiction amendments per run (clone-before-write), and
//! evaluates rules in stable order.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::jurisdictions::profile_for;
use crate::library::base_rules;
use crate::registry::RuleRegistry;
use crate::report::{ComplianceReport, ComplianceSummary, RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory};

pub const ENGINE_VERSION: &str = "0.3.0";
pub const RULESET_VERSION: &str = "irc-2021.hp1";

/// The only hard failure the engine produces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid plan: {0}")]
    InvalidPlan(&'static str),
}

/// Run filters and evaluation knobs.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub include_rules: Vec<String>,
    pub exclude_rules: Vec<String>,
    pub include_categories: Vec<RuleCategory>,
    pub exclude_categories: Vec<RuleCategory>,
    /// Stop after the first rule producing an error-severity violation.
    pub stop_on_critical: bool,
    /// Soft per-rule budget in milliseconds; overruns are logged, never cut.
    pub max_execution_time_ms: Option<f64>,
    pub include_metadata: bool,
}

/// Engine instance: a registry plus evaluation logic. Reusable across
/// sequential runs under different jurisdictions.
pub struct ComplianceEngine {
    registry: RuleRegistry,
}

impl ComplianceEngine {
    /// Build an engine seeded with the base rule library.
    pub fn new() -> Self {
        let mut registry = RuleRegistry::new();
        for rule in base_rules() {
            // Base ids are unique by construction.
            let _ = registry.register(rule);
        }
        ComplianceEngine { registry }
    }

    pub fn rule_registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn rule_registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Evaluate the plan under the context's jurisdiction.
    pub fn check(
        &self,
        plan: &PlacedPlan,
        context: &ComplianceContext,
        options: &CheckOptions,
    ) -> Result<ComplianceReport, EngineError> {
        if plan.rooms.is_empty() {
            return Err(EngineError::InvalidPlan("plan has no rooms"));
        }
        if plan.doors.is_empty() {
            return Err(EngineError::InvalidPlan("plan has no doors"));
        }

        let run_start = Instant::now();
        let rules = self.effective_rules(&context.jurisdiction, options);
        let total_candidates = rules.len();

        let mut results: Vec<RuleResult> = Vec::with_capacity(rules.len());
        let mut skipped = 0usize;
        for (index, rule) in rules.iter().enumerate() {
            let result = evaluate_rule(rule, plan, context, options);
            let stop = options.stop_on_critical && result.has_errors();
            results.push(result);
            if stop {
                skipped = total_candidates - index - 1;
                log::warn!(
                    "compliance: stopping on critical violation in '{}', {} rule(s) skipped",
                    rule.id,
                    skipped
                );
                break;
            }
        }

        let summary = ComplianceSummary::from_results(&results, skipped);
        let overall_compliant = summary.failed == 0;
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let plan_id = if plan.metadata.strategy.is_empty() {
            "plan".to_string()
        } else {
            plan.metadata.strategy.clone()
        };

        log::info!(
            "compliance: {}/{} rules passed under '{}'",
            summary.passed,
            summary.total_rules,
            context.jurisdiction
        );

        Ok(ComplianceReport {
            id: format!("report-{}-{}", context.jurisdiction, timestamp_ms),
            plan_id,
            jurisdiction: context.jurisdiction.clone(),
            timestamp_ms,
            overall_compliant,
            results,
            summary,
            context: context.clone(),
            engine_version: ENGINE_VERSION.to_string(),
            ruleset_version: RULESET_VERSION.to_string(),
            total_time_ms: run_start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// The per-run rule list: enabled registry clones with the
    /// jurisdiction's amendments applied, plus its own rules, filtered by
    /// the run options. The registry itself is untouched.
    fn effective_rules(&self, jurisdiction: &str, options: &CheckOptions) -> Vec<ComplianceRule> {
        let profile = profile_for(jurisdiction);
        let mut rules: Vec<ComplianceRule> = Vec::with_capacity(self.registry.len());

        for rule in self.registry.iter() {
            let amendment = profile.amendments.iter().find(|a| a.rule_id == rule.id);
            match amendment {
                Some(a) => rules.push(rule.amended(a.check, a.version)),
                None => rules.push(rule.clone()),
            }
        }
        rules.extend(profile.additional_rules);

        rules.retain(|rule| {
            rule.enabled
                && rule.applies_in(jurisdiction)
                && (options.include_rules.is_empty() || options.include_rules.contains(&rule.id))
                && !options.exclude_rules.contains(&rule.id)
                && (options.include_categories.is_empty()
                    || options.include_categories.contains(&rule.category))
                && !options.exclude_categories.contains(&rule.category)
        });
        rules
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate_rule(
    rule: &ComplianceRule,
    plan: &PlacedPlan,
    context: &ComplianceContext,
    options: &CheckOptions,
) -> RuleResult {
    let start = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| (rule.check)(plan, context, &rule.config)));
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let mut result = match outcome {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "rule check panicked".to_string());
            log::warn!("compliance: rule '{}' panicked: {}", rule.id, detail);
            RuleResult::with_violations(vec![Violation::new(
                &format!("{}-execution-error", rule.id),
                format!("Rule '{}' failed to execute: {}", rule.id, detail),
                Severity::Error,
                &rule.code_section,
            )])
        }
    };

    result.rule_id = rule.id.clone();
    result.passed = !result.has_errors();
    result.execution_time_ms = elapsed_ms;
    if !options.include_metadata {
        result.metadata.clear();
    }

    if let Some(budget) = options.max_execution_time_ms {
        if elapsed_ms > budget {
            log::warn!(
                "compliance: rule '{}' took {:.2} ms, over the {:.2} ms budget",
                rule.id,
                elapsed_ms,
                budget
            );
        }
    }
    result
}

/// Construct a fresh engine with the base library registered.
pub fn create_engine() -> ComplianceEngine {
    ComplianceEngine::new()
}

/// Convenience wrapper: one-shot check under a jurisdiction with defaults.
pub fn run_compliance_check(
    plan: &PlacedPlan,
    jurisdiction: &str,
    options: Option<CheckOptions>,
) -> Result<ComplianceReport, EngineError> {
    let engine = create_engine();
    let context = ComplianceContext::for_jurisdiction(jurisdiction);
    engine.check(plan, &context, &options.unwrap_or_default())
}
