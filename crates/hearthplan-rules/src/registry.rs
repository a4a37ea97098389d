//! The rule registry — id-keyed, insertion-ordered. Evaluation walks rules
//! in registration order, so reports are stable across runs.

use indexmap::IndexMap;
use serde_json::Value;

use crate::rule::{ComplianceRule, RuleCategory};

/// In-process rule table. Mutated only at engine construction and through
/// the explicit operations below; evaluation works on clones.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, ComplianceRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new rule. Refuses duplicates — use `replace` to override.
    pub fn register(&mut self, rule: ComplianceRule) -> Result<(), String> {
        if self.rules.contains_key(&rule.id) {
            return Err(format!("rule '{}' is already registered", rule.id));
        }
        self.rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    /// Insert or overwrite a rule, keeping its original position when it
    /// already exists.
    pub fn replace(&mut self, rule: ComplianceRule) {
        self.rules.insert(rule.id.clone(), rule);
    }

    pub fn get_rule(&self, id: &str) -> Option<&ComplianceRule> {
        self.rules.get(id)
    }

    pub fn get_rules_by_category(&self, category: RuleCategory) -> Vec<&ComplianceRule> {
        self.rules
            .values()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn get_enabled_rules(&self) -> Vec<&ComplianceRule> {
        self.rules.values().filter(|r| r.enabled).collect()
    }

    /// Toggle a rule; returns false when the id is unknown.
    pub fn set_rule_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.get_mut(id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Merge configuration keys into a rule's config bag.
    pub fn update_rule_config(
        &mut self,
        id: &str,
        config: impl IntoIterator<Item = (String, Value)>,
    ) -> bool {
        match self.rules.get_mut(id) {
            Some(rule) => {
                rule.config.extend(config);
                true
            }
            None => false,
        }
    }

    /// All rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComplianceRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
