//! Egress rules — IRC R310/R311/R312 escape and exit requirements.
//!
//! The R310.2 clear-opening checks are registered but pass unconditionally:
//! the window model carries rough opening sizes, not clear openings. They
//! note that status in metadata so reports stay honest.

use hearthplan_core::plan::PlacedPlan;
use hearthplan_core::types::{DoorKind, RoomType};

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{inches, rooms_of_type, sleeping_rooms};

const MAX_SILL_IN: f64 = 44.0;
const MIN_EXTERIOR_DOOR_IN: f64 = 32.0;
const MIN_STAIR_WIDTH_IN: f64 = 36.0;
const FALL_PROTECTION_SILL_IN: f64 = 24.0;

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "irc-r310-1-egress-window",
            "R310.1",
            RuleCategory::Egress,
            "Sleeping rooms need an emergency escape window with a sill no higher than 44 in",
            check_egress_window,
        ),
        ComplianceRule::new(
            "irc-r310-2-1-clear-area",
            "R310.2.1",
            RuleCategory::Egress,
            "Egress windows need 5.7 sq ft of clear opening (5.0 at grade)",
            stub_clear_opening,
        ),
        ComplianceRule::new(
            "irc-r310-2-2-clear-width",
            "R310.2.2",
            RuleCategory::Egress,
            "Egress windows need a 20 in clear opening width",
            stub_clear_opening,
        ),
        ComplianceRule::new(
            "irc-r310-2-3-clear-height",
            "R310.2.3",
            RuleCategory::Egress,
            "Egress windows need a 24 in clear opening height",
            stub_clear_opening,
        ),
        ComplianceRule::new(
            "irc-r311-2-exterior-door",
            "R311.2",
            RuleCategory::Egress,
            "The dwelling needs one side-hinged exterior egress door",
            check_exterior_door,
        ),
        ComplianceRule::new(
            "irc-r311-3-egress-door-width",
            "R311.3",
            RuleCategory::Egress,
            "The egress door needs a 32 in clear width",
            check_egress_door_width,
        ),
        ComplianceRule::new(
            "irc-r311-7-stairway-width",
            "R311.7.1",
            RuleCategory::Egress,
            "Stairways must be at least 36 in wide",
            check_stairway_width,
        ),
        ComplianceRule::new(
            "irc-r312-2-window-fall-protection",
            "R312.2",
            RuleCategory::Egress,
            "Upper-floor windows with sills under 24 in need fall protection",
            check_fall_protection,
        ),
        ComplianceRule::new(
            "irc-r302-5-garage-opening",
            "R302.5.1",
            RuleCategory::Egress,
            "Garages must not open directly into sleeping rooms",
            check_garage_opening,
        ),
    ]
}

fn check_egress_window(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in sleeping_rooms(plan) {
        let windows: Vec<_> = plan
            .windows
            .iter()
            .filter(|w| w.room_id == room.id)
            .collect();
        if windows.is_empty() {
            result = result.violation(
                Violation::new(
                    "egress-window-missing",
                    format!("{} has no window for emergency escape", room.id),
                    Severity::Error,
                    "R310.1",
                )
                .room(&room.id)
                .remedy(format!("Add an egress window to {}", room.id)),
            );
            continue;
        }
        let lowest_sill = windows
            .iter()
            .map(|w| inches(w.sill_height))
            .fold(f64::INFINITY, f64::min);
        if lowest_sill > MAX_SILL_IN {
            result = result.violation(
                Violation::new(
                    "egress-sill-too-high",
                    format!("{}: every window sill exceeds 44 in above the floor", room.id),
                    Severity::Error,
                    "R310.1",
                )
                .room(&room.id)
                .values(lowest_sill, MAX_SILL_IN, "in")
                .remedy(format!("Lower one window sill in {} to 44 in or less", room.id)),
            );
        }
    }
    result
}

fn stub_clear_opening(_: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    // TODO: check clear openings once WindowPlacement carries them.
    RuleResult::new().note("status", "window clear-opening data not modeled yet")
}

fn check_exterior_door(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let exterior = plan
        .doors
        .iter()
        .filter(|d| d.kind == DoorKind::Exterior)
        .count();
    match exterior {
        0 => RuleResult::new().violation(
            Violation::new(
                "exterior-door-missing",
                "The plan has no exterior egress door",
                Severity::Error,
                "R311.2",
            )
            .values(0.0, 1.0, "doors")
            .remedy("Add an exterior door at the entry"),
        ),
        1 => RuleResult::new(),
        n => RuleResult::new().violation(
            Violation::new(
                "exterior-door-count",
                format!("The plan has {} exterior doors; one egress door is expected", n),
                Severity::Info,
                "R311.2",
            )
            .values(n as f64, 1.0, "doors"),
        ),
    }
}

fn check_egress_door_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for door in plan.doors.iter().filter(|d| d.kind == DoorKind::Exterior) {
        let width_in = inches(door.width);
        if width_in < MIN_EXTERIOR_DOOR_IN {
            result = result.violation(
                Violation::new(
                    "egress-door-narrow",
                    format!("Exterior door {} is {:.0} in wide", door.id, width_in),
                    Severity::Error,
                    "R311.3",
                )
                .values(width_in, MIN_EXTERIOR_DOOR_IN, "in")
                .remedy("Use at least a 36 in exterior door leaf"),
            );
        }
    }
    result
}

fn check_stairway_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Stairs) {
        let width_in = inches(room.min_dimension());
        if width_in < MIN_STAIR_WIDTH_IN {
            result = result.violation(
                Violation::new(
                    "stairway-narrow",
                    format!("{} is {:.0} in wide", room.id, width_in),
                    Severity::Error,
                    "R311.7.1",
                )
                .room(&room.id)
                .values(width_in, MIN_STAIR_WIDTH_IN, "in")
                .remedy("Widen the stairway to at least 36 in"),
            );
        }
    }
    result
}

fn check_fall_protection(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for window in plan.windows.iter().filter(|w| w.floor >= 2) {
        let sill_in = inches(window.sill_height);
        if sill_in < FALL_PROTECTION_SILL_IN {
            result = result.violation(
                Violation::new(
                    "window-fall-protection",
                    format!("{} sill is {:.0} in above an upper floor", window.id, sill_in),
                    Severity::Warning,
                    "R312.2",
                )
                .room(&window.room_id)
                .values(sill_in, FALL_PROTECTION_SILL_IN, "in")
                .remedy("Raise the sill or add an opening-control device"),
            );
        }
    }
    result
}

fn check_garage_opening(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for door in &plan.doors {
        let a = plan.room(&door.connects[0]);
        let b = plan.room(&door.connects[1]);
        let (Some(a), Some(b)) = (a, b) else { continue };
        let garage_to_bed = (a.room_type == RoomType::Garage && b.room_type.is_sleeping())
            || (b.room_type == RoomType::Garage && a.room_type.is_sleeping());
        if garage_to_bed {
            result = result.violation(
                Violation::new(
                    "garage-opens-to-bedroom",
                    format!("Door {} connects the garage directly to a sleeping room", door.id),
                    Severity::Error,
                    "R302.5.1",
                )
                .remedy("Route garage access through a hallway or service room"),
            );
        }
    }
    result
}
