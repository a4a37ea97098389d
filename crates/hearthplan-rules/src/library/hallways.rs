//! Hallway rules — width minimums and circulation efficiency.

use hearthplan_core::plan::PlacedPlan;
use hearthplan_core::types::RoomType;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{inches, rooms_of_type};

const MIN_HALLWAY_IN: f64 = 36.0;
const ADA_HALLWAY_IN: f64 = 42.0;
const DEAD_END_MAX_FT: f64 = 20.0;
const HALLWAY_PERCENT_MAX: f64 = 18.0;

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "irc-r311-6-hallway-width",
            "R311.6.1",
            RuleCategory::Hallways,
            "Hallways must be at least 36 in wide",
            check_hallway_width,
        ),
        ComplianceRule::new(
            "ada-hallway-width",
            "ADA 403.5.1",
            RuleCategory::Hallways,
            "Accessible routes prefer 42 in hallways",
            check_ada_hallway_width,
        ),
        ComplianceRule::new(
            "hallway-dead-end-length",
            "IBC 1020.4",
            RuleCategory::Hallways,
            "Dead-end hallways over 20 ft waste circulation",
            check_dead_end_length,
        ),
        ComplianceRule::new(
            "hallway-area-ratio",
            "HP-CIRC-1",
            RuleCategory::Hallways,
            "Hallway area above 18 percent of the plan is inefficient",
            check_area_ratio,
        ),
    ]
}

fn check_hallway_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Hallway) {
        let width_in = inches(room.min_dimension());
        if width_in < MIN_HALLWAY_IN {
            result = result.violation(
                Violation::new(
                    "hallway-narrow",
                    format!("{} is {:.0} in wide", room.id, width_in),
                    Severity::Error,
                    "R311.6.1",
                )
                .room(&room.id)
                .values(width_in, MIN_HALLWAY_IN, "in")
                .remedy(format!("Widen {} to at least 36 in", room.id)),
            );
        }
    }
    result
}

fn check_ada_hallway_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Hallway) {
        let width_in = inches(room.min_dimension());
        if width_in < ADA_HALLWAY_IN {
            result = result.violation(
                Violation::new(
                    "hallway-not-accessible",
                    format!("{} is {:.0} in wide, under the 42 in accessible width", room.id, width_in),
                    Severity::Warning,
                    "ADA 403.5.1",
                )
                .room(&room.id)
                .values(width_in, ADA_HALLWAY_IN, "in")
                .remedy(format!("Widen {} to 42 in for wheelchair passing", room.id)),
            );
        }
    }
    result
}

fn check_dead_end_length(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let Some(circ) = &plan.circulation else {
        return RuleResult::new();
    };
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Hallway) {
        let length = room.width.max(room.depth) as f64;
        if circ.dead_ends.contains(&room.id) && length > DEAD_END_MAX_FT {
            result = result.violation(
                Violation::new(
                    "hallway-dead-end",
                    format!("{} dead-ends after {:.0} ft", room.id, length),
                    Severity::Info,
                    "IBC 1020.4",
                )
                .room(&room.id)
                .values(length, DEAD_END_MAX_FT, "ft")
                .remedy("Connect the far end of the hallway to another room"),
            );
        }
    }
    result
}

fn check_area_ratio(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let Some(circ) = &plan.circulation else {
        return RuleResult::new();
    };
    if circ.hallway_percent <= HALLWAY_PERCENT_MAX {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "hallway-ratio",
            format!("Hallways take {:.1}% of the floor area", circ.hallway_percent),
            Severity::Info,
            "HP-CIRC-1",
        )
        .values(circ.hallway_percent, HALLWAY_PERCENT_MAX, "%")
        .remedy("Shorten hallway runs or open rooms onto each other"),
    )
}
