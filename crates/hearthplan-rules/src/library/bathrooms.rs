//! Bathroom rules — IRC R307/P2708 fixture clearances, derived from room
//! geometry under an assumed fixtures-on-the-short-wall layout.

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{full_baths, inches, sleeping_rooms};

const TOILET_SIDE_IN: f64 = 15.0;
const TOILET_FRONT_IN: f64 = 21.0;
const TOILET_DEPTH_IN: f64 = 28.0;
const SHOWER_SIDE_IN: f64 = 30.0;
const MIN_BATH_DOOR_IN: f64 = 24.0;

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "irc-r307-1-toilet-clearance",
            "R307.1",
            RuleCategory::Bathrooms,
            "Water closets need 15 in side-center and 21 in front clearance",
            check_toilet_clearance,
        ),
        ComplianceRule::new(
            "irc-p2708-shower-size",
            "P2708.1",
            RuleCategory::Bathrooms,
            "Showers need a 30 in by 30 in interior",
            check_shower_size,
        ),
        ComplianceRule::new(
            "irc-r303-3-bath-ventilation",
            "R303.3",
            RuleCategory::Bathrooms,
            "Bathrooms need an openable window or mechanical ventilation",
            check_ventilation,
        ),
        ComplianceRule::new(
            "bath-door-width",
            "R311.2.2",
            RuleCategory::Bathrooms,
            "Bathroom doors under 24 in are impractical",
            check_door_width,
        ),
        ComplianceRule::new(
            "bath-required",
            "R306.1",
            RuleCategory::Bathrooms,
            "Every dwelling needs at least one full bathroom",
            check_bath_required,
        ),
        ComplianceRule::new(
            "bath-per-bedroom-ratio",
            "R306.1",
            RuleCategory::Bathrooms,
            "More than four sleeping rooms per full bath strains the plan",
            check_bath_ratio,
        ),
    ]
}

fn check_toilet_clearance(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in plan.rooms.iter().filter(|r| r.room_type.is_bath()) {
        // Fixture on the short wall, centered: side clearance is half the
        // narrow dimension, front clearance is the long dimension minus the
        // fixture depth.
        let side_in = inches(room.min_dimension()) / 2.0;
        let front_in = inches(room.width.max(room.depth)) - TOILET_DEPTH_IN;
        if side_in < TOILET_SIDE_IN {
            result = result.violation(
                Violation::new(
                    "toilet-side-clearance",
                    format!("{}: {:.0} in from toilet center to side wall", room.id, side_in),
                    Severity::Error,
                    "R307.1",
                )
                .room(&room.id)
                .values(side_in, TOILET_SIDE_IN, "in")
                .remedy(format!("Widen {} so the toilet gets 15 in of side clearance", room.id)),
            );
        }
        if front_in < TOILET_FRONT_IN {
            result = result.violation(
                Violation::new(
                    "toilet-front-clearance",
                    format!("{}: {:.0} in in front of the toilet", room.id, front_in),
                    Severity::Error,
                    "R307.1",
                )
                .room(&room.id)
                .values(front_in, TOILET_FRONT_IN, "in")
                .remedy(format!("Deepen {} to give 21 in in front of the toilet", room.id)),
            );
        }
    }
    result
}

fn check_shower_size(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in full_baths(plan) {
        let min_in = inches(room.min_dimension());
        if min_in < SHOWER_SIDE_IN {
            result = result.violation(
                Violation::new(
                    "shower-size",
                    format!("{} cannot fit a 30 in by 30 in shower", room.id),
                    Severity::Error,
                    "P2708.1",
                )
                .room(&room.id)
                .values(min_in, SHOWER_SIDE_IN, "in")
                .remedy(format!("Widen {} to at least 30 in clear", room.id)),
            );
        }
    }
    result
}

fn check_ventilation(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in full_baths(plan) {
        let has_window = plan.windows.iter().any(|w| w.room_id == room.id);
        if !has_window && room.exterior_walls.is_empty() {
            result = result.violation(
                Violation::new(
                    "bath-ventilation",
                    format!("{} has no window and no exterior wall", room.id),
                    Severity::Warning,
                    "R303.3",
                )
                .room(&room.id)
                .remedy("Provide a mechanical exhaust fan vented outdoors"),
            );
        }
    }
    result
}

fn check_door_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for door in &plan.doors {
        let to_bath = door.connects.iter().any(|id| {
            plan.room(id)
                .map(|r| r.room_type.is_bath())
                .unwrap_or(false)
        });
        let width_in = inches(door.width);
        if to_bath && width_in < MIN_BATH_DOOR_IN {
            result = result.violation(
                Violation::new(
                    "bath-door-narrow",
                    format!("Door {} is {:.0} in wide", door.id, width_in),
                    Severity::Warning,
                    "R311.2.2",
                )
                .values(width_in, MIN_BATH_DOOR_IN, "in")
                .remedy("Use at least a 24 in door to the bathroom"),
            );
        }
    }
    result
}

fn check_bath_required(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if full_baths(plan).next().is_some() {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "bath-missing",
            "The plan has no full bathroom",
            Severity::Error,
            "R306.1",
        )
        .values(0.0, 1.0, "bathrooms")
        .remedy("Add a bathroom with water closet, lavatory and tub or shower"),
    )
}

fn check_bath_ratio(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let beds = sleeping_rooms(plan).count();
    let baths = full_baths(plan).count();
    if baths == 0 || beds == 0 {
        return RuleResult::new(); // bath-required covers the zero case
    }
    let ratio = beds as f64 / baths as f64;
    if ratio <= 4.0 {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "bath-ratio",
            format!("{} sleeping rooms share {} full bath(s)", beds, baths),
            Severity::Warning,
            "R306.1",
        )
        .values(ratio, 4.0, "bedrooms per bath")
        .remedy("Add a full bathroom for the additional bedrooms"),
    )
}
