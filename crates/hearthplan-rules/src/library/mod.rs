//! The base rule library, organized by category. `base_rules` returns every
//! rule in registration order; the engine seeds its registry from it.

pub mod accessibility;
pub mod bathrooms;
pub mod egress;
pub mod energy;
pub mod hallways;
pub mod kitchens;
pub mod room_minimums;
pub mod structural;

use hearthplan_core::plan::{PlacedPlan, PlacedRoom};
use hearthplan_core::types::RoomType;

use crate::rule::ComplianceRule;

/// Every base rule, in evaluation order.
pub fn base_rules() -> Vec<ComplianceRule> {
    let mut rules = Vec::new();
    rules.extend(room_minimums::rules());
    rules.extend(egress::rules());
    rules.extend(bathrooms::rules());
    rules.extend(kitchens::rules());
    rules.extend(hallways::rules());
    rules.extend(accessibility::rules());
    rules.extend(structural::rules());
    rules.extend(energy::rules());
    rules
}

// ── Shared plan queries ─────────────────────────────────────────────────

pub(crate) fn sleeping_rooms(plan: &PlacedPlan) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms.iter().filter(|r| r.room_type.is_sleeping())
}

pub(crate) fn habitable_rooms(plan: &PlacedPlan) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms.iter().filter(|r| r.room_type.is_habitable())
}

pub(crate) fn full_baths(plan: &PlacedPlan) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms.iter().filter(|r| r.room_type.is_full_bath())
}

pub(crate) fn rooms_of_type(
    plan: &PlacedPlan,
    rt: RoomType,
) -> impl Iterator<Item = &PlacedRoom> {
    plan.rooms.iter().filter(move |r| r.room_type == rt)
}

/// Feet to inches.
pub(crate) fn inches(ft: f32) -> f64 {
    ft as f64 * 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleCategory;
    use std::collections::HashSet;

    #[test]
    fn test_library_counts_per_category() {
        let rules = base_rules();
        let count = |c: RuleCategory| rules.iter().filter(|r| r.category == c).count();
        assert_eq!(count(RuleCategory::RoomMinimums), 8);
        assert_eq!(count(RuleCategory::Egress), 9);
        assert_eq!(count(RuleCategory::Bathrooms), 6);
        assert_eq!(count(RuleCategory::Kitchens), 4);
        assert_eq!(count(RuleCategory::Hallways), 4);
        assert_eq!(count(RuleCategory::Accessibility), 10);
        assert_eq!(count(RuleCategory::Structural), 7);
        assert_eq!(count(RuleCategory::Energy), 7);
        assert_eq!(rules.len(), 55);
    }

    #[test]
    fn test_rule_ids_unique() {
        let rules = base_rules();
        let ids: HashSet<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn test_all_rules_enabled_and_universal() {
        for rule in base_rules() {
            assert!(rule.enabled, "{} disabled", rule.id);
            assert!(
                rule.jurisdictions.is_empty(),
                "{} is jurisdiction-scoped in the base library",
                rule.id
            );
        }
    }
}
