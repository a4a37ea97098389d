//! Kitchen rules — presence, working clearances, ventilation, plumbing.

use hearthplan_core::plan::PlacedPlan;
use hearthplan_core::types::RoomType;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::rooms_of_type;

const MIN_KITCHEN_DIM_FT: f64 = 6.0;

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "kitchen-required",
            "R306.2",
            RuleCategory::Kitchens,
            "Every dwelling needs a kitchen area",
            check_kitchen_required,
        ),
        ComplianceRule::new(
            "kitchen-work-space",
            "R306.2",
            RuleCategory::Kitchens,
            "Kitchens narrower than 6 ft leave no working aisle",
            check_work_space,
        ),
        ComplianceRule::new(
            "irc-m1503-kitchen-ventilation",
            "M1503.3",
            RuleCategory::Kitchens,
            "Kitchens need a window or mechanical exhaust to outdoors",
            check_ventilation,
        ),
        ComplianceRule::new(
            "kitchen-sink-plumbing",
            "P2701.1",
            RuleCategory::Kitchens,
            "The kitchen must be on the plumbing system for its sink",
            check_sink_plumbing,
        ),
    ]
}

fn check_kitchen_required(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if rooms_of_type(plan, RoomType::Kitchen).next().is_some() {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "kitchen-missing",
            "The plan has no kitchen",
            Severity::Error,
            "R306.2",
        )
        .values(0.0, 1.0, "kitchens")
        .remedy("Add a kitchen area with sink and cooking appliance space"),
    )
}

fn check_work_space(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Kitchen) {
        let min_dim = room.min_dimension() as f64;
        if min_dim < MIN_KITCHEN_DIM_FT {
            result = result.violation(
                Violation::new(
                    "kitchen-work-space",
                    format!("{} is only {:.1} ft across", room.id, min_dim),
                    Severity::Warning,
                    "R306.2",
                )
                .room(&room.id)
                .values(min_dim, MIN_KITCHEN_DIM_FT, "ft")
                .remedy("Widen the kitchen so counters face a 40 in aisle"),
            );
        }
    }
    result
}

fn check_ventilation(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Kitchen) {
        let has_window = plan.windows.iter().any(|w| w.room_id == room.id);
        if !has_window && room.exterior_walls.is_empty() {
            result = result.violation(
                Violation::new(
                    "kitchen-ventilation",
                    format!("{} has no window and no exterior wall", room.id),
                    Severity::Warning,
                    "M1503.3",
                )
                .room(&room.id)
                .remedy("Provide a range hood ducted to the outdoors"),
            );
        }
    }
    result
}

fn check_sink_plumbing(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Kitchen) {
        if !room.needs_plumbing {
            result = result.violation(
                Violation::new(
                    "kitchen-unplumbed",
                    format!("{} is not flagged for plumbing", room.id),
                    Severity::Error,
                    "P2701.1",
                )
                .room(&room.id)
                .remedy("Mark the kitchen as a plumbing room so the sink gets supply and drain"),
            );
        }
    }
    result
}
