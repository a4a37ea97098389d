//! The rule contract: a value carrying metadata plus a check function
//! pointer. Cloning a rule clones everything; a jurisdiction amendment is a
//! clone with the pointer and version swapped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::report::RuleResult;

/// Per-rule configuration bag, adjustable at runtime via the registry.
pub type RuleConfig = HashMap<String, Value>;

/// A pure check: plan + context + config in, result out. Never panics by
/// contract; the engine catches a panicking rule and synthesizes an
/// execution-error violation.
pub type CheckFn = fn(&PlacedPlan, &ComplianceContext, &RuleConfig) -> RuleResult;

/// Categories the library is organized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    RoomMinimums,
    Egress,
    Bathrooms,
    Kitchens,
    Hallways,
    Accessibility,
    Structural,
    Energy,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 8] = [
        RuleCategory::RoomMinimums,
        RuleCategory::Egress,
        RuleCategory::Bathrooms,
        RuleCategory::Kitchens,
        RuleCategory::Hallways,
        RuleCategory::Accessibility,
        RuleCategory::Structural,
        RuleCategory::Energy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::RoomMinimums => "room-minimums",
            RuleCategory::Egress => "egress",
            RuleCategory::Bathrooms => "bathrooms",
            RuleCategory::Kitchens => "kitchens",
            RuleCategory::Hallways => "hallways",
            RuleCategory::Accessibility => "accessibility",
            RuleCategory::Structural => "structural",
            RuleCategory::Energy => "energy",
        }
    }

    pub fn parse(s: &str) -> Option<RuleCategory> {
        RuleCategory::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// A registered compliance rule.
#[derive(Clone)]
pub struct ComplianceRule {
    pub id: String,
    pub code_section: String,
    pub category: RuleCategory,
    pub description: String,
    pub enabled: bool,
    /// Jurisdiction ids this rule applies under; empty means all.
    pub jurisdictions: Vec<String>,
    pub version: String,
    pub check: CheckFn,
    pub config: RuleConfig,
    /// Rule ids this rule's findings build on (informational).
    pub depends_on: Vec<String>,
}

impl ComplianceRule {
    pub fn new(
        id: &str,
        code_section: &str,
        category: RuleCategory,
        description: &str,
        check: CheckFn,
    ) -> Self {
        ComplianceRule {
            id: id.to_string(),
            code_section: code_section.to_string(),
            category,
            description: description.to_string(),
            enabled: true,
            jurisdictions: Vec::new(),
            version: "irc-2021".to_string(),
            check,
            config: RuleConfig::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn jurisdiction(mut self, id: &str) -> Self {
        self.jurisdictions.push(id.to_string());
        self
    }

    pub fn version_tag(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// True when the rule applies under the given jurisdiction.
    pub fn applies_in(&self, jurisdiction: &str) -> bool {
        self.jurisdictions.is_empty() || self.jurisdictions.iter().any(|j| j == jurisdiction)
    }

    /// Clone with a replacement check and version — the amendment operation.
    pub fn amended(&self, check: CheckFn, version: &str) -> Self {
        let mut amended = self.clone();
        amended.check = check;
        amended.version = version.to_string();
        amended
    }
}

impl std::fmt::Debug for ComplianceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceRule")
            .field("id", &self.id)
            .field("code_section", &self.code_section)
            .field("category", &self.category)
            .field("enabled", &self.enabled)
            .field("version", &self.version)
            .finish()
    }
}
