//! Energy rules — IECC glazing ratios, envelope compactness, and
//! plumbing-run efficiency.

use hearthplan_core::plan::{PlacedPlan, PlacedRoom};
use hearthplan_core::types::{Direction, DoorKind, RoomType};

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

const WWR_ERROR_LIMIT: f64 = 0.25;
const NORTH_GLAZING_LIMIT: f64 = 0.40;
const COMPACTNESS_LIMIT: f64 = 0.35;
const MAX_PLUMBING_GROUPS: usize = 2;
const MAX_EXTERIOR_DOORS: usize = 2;

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "iecc-window-wall-ratio",
            "IECC R402.3",
            RuleCategory::Energy,
            "Window area above 25 percent of exterior wall area fails prescriptive compliance",
            check_window_wall_ratio,
        ),
        ComplianceRule::new(
            "iecc-glazing-orientation",
            "IECC R401.3",
            RuleCategory::Energy,
            "Heavily north-facing glazing loses heat with no solar gain",
            check_glazing_orientation,
        ),
        ComplianceRule::new(
            "iecc-envelope-compactness",
            "IECC R402",
            RuleCategory::Energy,
            "Long envelopes per square foot raise conditioning loads",
            check_compactness,
        ),
        ComplianceRule::new(
            "iecc-garage-buffer",
            "IECC R402.2",
            RuleCategory::Energy,
            "Sleeping rooms against the garage need an insulated buffer",
            check_garage_buffer,
        ),
        ComplianceRule::new(
            "iecc-climate-glazing",
            "IECC R402.3.1",
            RuleCategory::Energy,
            "Climate-zone glazing limit from the jurisdictional parameters",
            check_climate_glazing,
        ),
        ComplianceRule::new(
            "plumbing-compactness",
            "IECC R403.5",
            RuleCategory::Energy,
            "Scattered plumbing groups mean long hot-water runs",
            check_plumbing_compactness,
        ),
        ComplianceRule::new(
            "iecc-exterior-door-count",
            "IECC R402.4",
            RuleCategory::Energy,
            "Each extra exterior door adds infiltration",
            check_exterior_doors,
        ),
    ]
}

/// Total glazing area over total exterior wall area (lengths × ceiling).
fn window_wall_ratio(plan: &PlacedPlan, ceiling_ft: f64) -> Option<f64> {
    let wall_area: f64 = plan
        .rooms
        .iter()
        .flat_map(|r| r.exterior_walls.iter().map(move |&d| r.wall_length(d) as f64))
        .sum::<f64>()
        * ceiling_ft;
    if wall_area <= 0.0 {
        return None;
    }
    let window_area: f64 = plan
        .windows
        .iter()
        .map(|w| (w.width * w.height) as f64)
        .sum();
    Some(window_area / wall_area)
}

fn check_window_wall_ratio(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let Some(ratio) = window_wall_ratio(plan, ctx.ceiling_height_ft()) else {
        return RuleResult::new();
    };
    if ratio <= WWR_ERROR_LIMIT {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "window-wall-ratio",
            format!("Glazing is {:.0}% of exterior wall area", ratio * 100.0),
            Severity::Error,
            "IECC R402.3",
        )
        .values(ratio * 100.0, WWR_ERROR_LIMIT * 100.0, "%")
        .remedy("Reduce window area or use performance-path compliance"),
    )
}

fn check_glazing_orientation(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let total: f64 = plan
        .windows
        .iter()
        .map(|w| (w.width * w.height) as f64)
        .sum();
    if total <= 0.0 {
        return RuleResult::new();
    }
    let north: f64 = plan
        .windows
        .iter()
        .filter(|w| w.direction == Direction::North)
        .map(|w| (w.width * w.height) as f64)
        .sum();
    let fraction = north / total;
    if fraction <= NORTH_GLAZING_LIMIT {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "north-glazing",
            format!("{:.0}% of glazing faces north", fraction * 100.0),
            Severity::Info,
            "IECC R401.3",
        )
        .values(fraction * 100.0, NORTH_GLAZING_LIMIT * 100.0, "%")
        .remedy("Shift glazing toward the south face for passive gain"),
    )
}

fn check_compactness(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let total_area = plan.total_area() as f64;
    if total_area <= 0.0 {
        return RuleResult::new();
    }
    let exterior_length: f64 = plan
        .rooms
        .iter()
        .flat_map(|r| r.exterior_walls.iter().map(move |&d| r.wall_length(d) as f64))
        .sum();
    let ratio = exterior_length / total_area;
    if ratio <= COMPACTNESS_LIMIT {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "envelope-sprawl",
            format!("{:.2} ft of exterior wall per sq ft of floor", ratio),
            Severity::Info,
            "IECC R402",
        )
        .values(ratio, COMPACTNESS_LIMIT, "ft/sq ft")
        .remedy("Compact the footprint toward a squarer shape"),
    )
}

fn check_garage_buffer(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for garage in plan.rooms.iter().filter(|r| r.room_type == RoomType::Garage) {
        for neighbor_id in &garage.neighbor_ids {
            let Some(neighbor) = plan.room(neighbor_id) else {
                continue;
            };
            if neighbor.room_type.is_sleeping() {
                result = result.violation(
                    Violation::new(
                        "garage-bedroom-wall",
                        format!("{} shares a wall with {}", garage.id, neighbor.id),
                        Severity::Info,
                        "IECC R402.2",
                    )
                    .room(neighbor_id)
                    .remedy("Insulate and air-seal the shared garage wall"),
                );
            }
        }
    }
    result
}

fn check_climate_glazing(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let limit = ctx.param_f64("max_window_wall_ratio").unwrap_or(0.25);
    climate_glazing_with_limit(plan, ctx, limit)
}

/// Shared body so jurisdiction amendments can swap the default limit.
pub(crate) fn climate_glazing_with_limit(
    plan: &PlacedPlan,
    ctx: &ComplianceContext,
    limit: f64,
) -> RuleResult {
    let Some(ratio) = window_wall_ratio(plan, ctx.ceiling_height_ft()) else {
        return RuleResult::new();
    };
    if ratio <= limit {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "climate-glazing",
            format!(
                "Glazing ratio {:.0}% exceeds the {:.0}% climate-zone limit",
                ratio * 100.0,
                limit * 100.0
            ),
            Severity::Warning,
            "IECC R402.3.1",
        )
        .values(ratio * 100.0, limit * 100.0, "%")
        .remedy("Trim window sizes to the climate-zone glazing budget"),
    )
}

fn check_plumbing_compactness(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let plumbing: Vec<&PlacedRoom> = plan.plumbing_rooms().collect();
    if plumbing.len() <= 1 {
        return RuleResult::new();
    }
    // Component count over the shared-wall graph between plumbing rooms.
    let mut visited = vec![false; plumbing.len()];
    let mut groups = 0usize;
    for start in 0..plumbing.len() {
        if visited[start] {
            continue;
        }
        groups += 1;
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(i) = stack.pop() {
            for (j, other) in plumbing.iter().enumerate() {
                if !visited[j] && plumbing[i].neighbor_ids.contains(&other.id) {
                    visited[j] = true;
                    stack.push(j);
                }
            }
        }
    }
    if groups <= MAX_PLUMBING_GROUPS {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "plumbing-scattered",
            format!("Plumbing rooms form {} separate groups", groups),
            Severity::Info,
            "IECC R403.5",
        )
        .values(groups as f64, MAX_PLUMBING_GROUPS as f64, "groups")
        .remedy("Cluster wet rooms onto shared walls to shorten hot-water runs"),
    )
}

fn check_exterior_doors(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let count = plan
        .doors
        .iter()
        .filter(|d| d.kind == DoorKind::Exterior)
        .count();
    if count <= MAX_EXTERIOR_DOORS {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "exterior-door-infiltration",
            format!("{} exterior doors add infiltration paths", count),
            Severity::Info,
            "IECC R402.4",
        )
        .values(count as f64, MAX_EXTERIOR_DOORS as f64, "doors")
        .remedy("Remove secondary exterior doors or add an air-lock vestibule"),
    )
}
