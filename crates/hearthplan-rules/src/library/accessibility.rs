//! Accessibility and aging-in-place rules. All advisory — warnings and
//! info only, since ADA is not mandatory for single-family dwellings.

use hearthplan_core::plan::PlacedPlan;
use hearthplan_core::types::RoomType;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{inches, rooms_of_type};

const MIN_DOOR_CLEAR_IN: f64 = 32.0;
const TURNING_CIRCLE_FT: f64 = 5.0;
const KITCHEN_AISLE_IN: f64 = 40.0;
const SILL_REACH_IN: f64 = 44.0;

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "ada-door-width",
            "ADA 404.2.3",
            RuleCategory::Accessibility,
            "Interior doors under 32 in block wheelchair passage",
            check_door_width,
        ),
        ComplianceRule::new(
            "ada-accessible-route",
            "ADA 206.2.4",
            RuleCategory::Accessibility,
            "A bathroom should be reachable on the entry floor",
            check_accessible_route,
        ),
        ComplianceRule::new(
            "ada-bathroom-turning",
            "ADA 603.2.1",
            RuleCategory::Accessibility,
            "At least one bathroom should allow a 60 in turning circle",
            check_bathroom_turning,
        ),
        ComplianceRule::new(
            "aip-ground-floor-bedroom",
            "AIP-1",
            RuleCategory::Accessibility,
            "A ground-floor bedroom supports aging in place",
            check_ground_floor_bedroom,
        ),
        ComplianceRule::new(
            "ada-kitchen-aisle",
            "ADA 804.2",
            RuleCategory::Accessibility,
            "Kitchen aisles need 40 in of clearance",
            check_kitchen_aisle,
        ),
        ComplianceRule::new(
            "ada-zero-step-entry",
            "ICC A117.1",
            RuleCategory::Accessibility,
            "A covered, zero-step entry improves visitability",
            check_zero_step_entry,
        ),
        ComplianceRule::new(
            "ada-foyer-turning",
            "ADA 304.3",
            RuleCategory::Accessibility,
            "The foyer should allow a full wheelchair turn",
            check_foyer_turning,
        ),
        ComplianceRule::new(
            "aip-laundry-level",
            "AIP-2",
            RuleCategory::Accessibility,
            "Laundry on the entry floor avoids stair trips",
            check_laundry_level,
        ),
        ComplianceRule::new(
            "visitability-half-bath",
            "ICC A117.1",
            RuleCategory::Accessibility,
            "Two-story plans should keep a bath on the entry floor",
            check_visitability_bath,
        ),
        ComplianceRule::new(
            "ada-window-sill-reach",
            "ADA 308",
            RuleCategory::Accessibility,
            "Rooms where every sill exceeds 44 in are hard to operate seated",
            check_window_reach,
        ),
    ]
}

fn check_door_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for door in &plan.doors {
        let width_in = inches(door.width);
        if width_in < MIN_DOOR_CLEAR_IN {
            result = result.violation(
                Violation::new(
                    "door-narrow",
                    format!("Door {} is {:.0} in wide", door.id, width_in),
                    Severity::Warning,
                    "ADA 404.2.3",
                )
                .values(width_in, MIN_DOOR_CLEAR_IN, "in")
                .remedy("Use 36 in doors on primary routes"),
            );
        }
    }
    result
}

fn entry_floor(plan: &PlacedPlan) -> u8 {
    plan.circulation
        .as_ref()
        .and_then(|c| plan.room(&c.entry_room_id))
        .map(|r| r.floor)
        .unwrap_or(1)
}

fn check_accessible_route(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let floor = entry_floor(plan);
    let has_bath = plan
        .rooms
        .iter()
        .any(|r| r.room_type.is_bath() && r.floor == floor);
    if has_bath {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "no-entry-floor-bath",
            "No bathroom on the entry floor",
            Severity::Warning,
            "ADA 206.2.4",
        )
        .remedy("Add at least a half bath on the entry floor"),
    )
}

fn check_bathroom_turning(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let baths: Vec<_> = plan.rooms.iter().filter(|r| r.room_type.is_bath()).collect();
    if baths.is_empty() {
        return RuleResult::new();
    }
    let best = baths
        .iter()
        .map(|r| r.min_dimension() as f64)
        .fold(0.0f64, f64::max);
    if best >= TURNING_CIRCLE_FT {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "no-accessible-bath",
            "No bathroom allows a 60 in wheelchair turning circle",
            Severity::Warning,
            "ADA 603.2.1",
        )
        .values(best * 12.0, TURNING_CIRCLE_FT * 12.0, "in")
        .remedy("Enlarge one bathroom to at least 5 ft in both directions"),
    )
}

fn check_ground_floor_bedroom(
    plan: &PlacedPlan,
    _: &ComplianceContext,
    _: &RuleConfig,
) -> RuleResult {
    if plan.envelope.stories < 2 {
        return RuleResult::new();
    }
    let has_ground_bed = plan
        .rooms
        .iter()
        .any(|r| r.room_type.is_sleeping() && r.floor == 1);
    if has_ground_bed {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "no-ground-floor-bedroom",
            "Every sleeping room is upstairs",
            Severity::Info,
            "AIP-1",
        )
        .remedy("Consider a ground-floor bedroom or a convertible den"),
    )
}

fn check_kitchen_aisle(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Kitchen) {
        // Counters on both long walls eat 2 ft each.
        let aisle_in = inches(room.min_dimension()) - 48.0;
        if aisle_in < KITCHEN_AISLE_IN {
            result = result.violation(
                Violation::new(
                    "kitchen-aisle-narrow",
                    format!("{} leaves a {:.0} in aisle between counters", room.id, aisle_in),
                    Severity::Warning,
                    "ADA 804.2",
                )
                .room(&room.id)
                .values(aisle_in.max(0.0), KITCHEN_AISLE_IN, "in")
                .remedy("Widen the kitchen or run counters along one wall"),
            );
        }
    }
    result
}

fn check_zero_step_entry(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if rooms_of_type(plan, RoomType::Porch).next().is_some() {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "no-covered-entry",
            "The plan has no porch for a covered, zero-step entry",
            Severity::Info,
            "ICC A117.1",
        )
        .remedy("Add a front porch with a zero-step threshold"),
    )
}

fn check_foyer_turning(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Foyer) {
        let min_dim = room.min_dimension() as f64;
        if min_dim < TURNING_CIRCLE_FT {
            result = result.violation(
                Violation::new(
                    "foyer-tight",
                    format!("{} is {:.1} ft at its narrowest", room.id, min_dim),
                    Severity::Info,
                    "ADA 304.3",
                )
                .room(&room.id)
                .values(min_dim * 12.0, TURNING_CIRCLE_FT * 12.0, "in")
                .remedy("Open the foyer to a 5 ft square"),
            );
        }
    }
    result
}

fn check_laundry_level(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let laundries: Vec<_> = rooms_of_type(plan, RoomType::Laundry).collect();
    if laundries.is_empty() {
        return RuleResult::new();
    }
    let floor = entry_floor(plan);
    if laundries.iter().any(|r| r.floor == floor) {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "laundry-upstairs",
            "Laundry is not on the entry floor",
            Severity::Info,
            "AIP-2",
        )
        .remedy("Move the laundry to the entry floor"),
    )
}

fn check_visitability_bath(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if plan.envelope.stories < 2 {
        return RuleResult::new();
    }
    let has_floor1_bath = plan
        .rooms
        .iter()
        .any(|r| r.room_type.is_bath() && r.floor == 1);
    if has_floor1_bath {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "no-visitable-bath",
            "Two-story plan with no bath on floor 1",
            Severity::Info,
            "ICC A117.1",
        )
        .remedy("Add a half bath near the entry"),
    )
}

fn check_window_reach(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in &plan.rooms {
        let sills: Vec<f64> = plan
            .windows
            .iter()
            .filter(|w| w.room_id == room.id)
            .map(|w| inches(w.sill_height))
            .collect();
        if sills.is_empty() {
            continue;
        }
        let lowest = sills.iter().cloned().fold(f64::INFINITY, f64::min);
        if lowest > SILL_REACH_IN {
            result = result.violation(
                Violation::new(
                    "window-sills-high",
                    format!("{}: lowest sill is {:.0} in", room.id, lowest),
                    Severity::Info,
                    "ADA 308",
                )
                .room(&room.id)
                .values(lowest, SILL_REACH_IN, "in")
                .remedy("Lower one sill for seated operation"),
            );
        }
    }
    result
}
