//! Room-minimum rules — IRC R304/R306/R307 area and dimension floors.

use hearthplan_core::plan::PlacedPlan;
use hearthplan_core::types::RoomType;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{full_baths, habitable_rooms, rooms_of_type, sleeping_rooms};

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "irc-r304-1-habitable-area",
            "R304.1",
            RuleCategory::RoomMinimums,
            "At least one habitable room must have 120 sq ft of floor area",
            check_habitable_area,
        ),
        ComplianceRule::new(
            "irc-r304-1-bedroom-area",
            "R304.1",
            RuleCategory::RoomMinimums,
            "Sleeping rooms must have at least 70 sq ft of floor area",
            check_bedroom_area,
        ),
        ComplianceRule::new(
            "irc-r304-2-horizontal-dimension",
            "R304.2",
            RuleCategory::RoomMinimums,
            "Habitable rooms must be at least 7 ft in any horizontal dimension",
            check_horizontal_dimension,
        ),
        ComplianceRule::new(
            "irc-r304-3-ceiling-height",
            "R304.3",
            RuleCategory::RoomMinimums,
            "Habitable space requires a 7 ft minimum ceiling height",
            check_ceiling_height,
        ),
        ComplianceRule::new(
            "irc-r306-kitchen-area",
            "R306.2",
            RuleCategory::RoomMinimums,
            "Kitchens need at least 50 sq ft of floor area",
            check_kitchen_area,
        ),
        ComplianceRule::new(
            "irc-r307-bathroom-area",
            "R307.1",
            RuleCategory::RoomMinimums,
            "Full bathrooms below 35 sq ft rarely fit required fixtures",
            check_bathroom_area,
        ),
        ComplianceRule::new(
            "hud-garage-min-width",
            "HUD 4910.1",
            RuleCategory::RoomMinimums,
            "A garage bay narrower than 10 ft cannot park a car",
            check_garage_width,
        ),
        ComplianceRule::new(
            "irc-r304-dwelling-min-area",
            "R304",
            RuleCategory::RoomMinimums,
            "Total habitable area under 320 sq ft is below dwelling minimums",
            check_dwelling_area,
        ),
    ]
}

fn check_habitable_area(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let largest = habitable_rooms(plan)
        .map(|r| r.sqft)
        .fold(0.0f32, f32::max);
    if largest >= 120.0 || habitable_rooms(plan).next().is_none() {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "habitable-area-minimum",
            "No habitable room reaches 120 sq ft",
            Severity::Error,
            "R304.1",
        )
        .values(largest as f64, 120.0, "sq ft")
        .remedy("Enlarge the main living space to at least 120 sq ft"),
    )
}

fn check_bedroom_area(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in sleeping_rooms(plan) {
        if room.sqft < 70.0 {
            result = result.violation(
                Violation::new(
                    "bedroom-area-minimum",
                    format!("{} has {:.0} sq ft, under the 70 sq ft minimum", room.id, room.sqft),
                    Severity::Error,
                    "R304.1",
                )
                .room(&room.id)
                .values(room.sqft as f64, 70.0, "sq ft")
                .remedy(format!("Enlarge {} to at least 70 sq ft", room.id)),
            );
        }
    }
    result
}

fn check_horizontal_dimension(
    plan: &PlacedPlan,
    _: &ComplianceContext,
    _: &RuleConfig,
) -> RuleResult {
    let mut result = RuleResult::new();
    for room in habitable_rooms(plan) {
        let min_dim = room.min_dimension();
        if min_dim < 7.0 {
            result = result.violation(
                Violation::new(
                    "horizontal-dimension-minimum",
                    format!("{} is only {:.1} ft across", room.id, min_dim),
                    Severity::Error,
                    "R304.2",
                )
                .room(&room.id)
                .values(min_dim as f64, 7.0, "ft")
                .remedy(format!("Widen {} to at least 7 ft", room.id)),
            );
        }
    }
    result
}

fn check_ceiling_height(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let height = ctx.ceiling_height_ft();
    if height >= 7.0 || habitable_rooms(plan).next().is_none() {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "ceiling-height-minimum",
            format!("Ceiling height {:.2} ft is under the 7 ft minimum", height),
            Severity::Error,
            "R304.3",
        )
        .values(height, 7.0, "ft")
        .remedy("Raise the ceiling to at least 7 ft in habitable rooms"),
    )
}

fn check_kitchen_area(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Kitchen) {
        if room.sqft < 50.0 {
            result = result.violation(
                Violation::new(
                    "kitchen-area-minimum",
                    format!("{} has {:.0} sq ft", room.id, room.sqft),
                    Severity::Error,
                    "R306.2",
                )
                .room(&room.id)
                .values(room.sqft as f64, 50.0, "sq ft")
                .remedy("Enlarge the kitchen to at least 50 sq ft"),
            );
        }
    }
    result
}

fn check_bathroom_area(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in full_baths(plan) {
        if room.sqft < 35.0 {
            result = result.violation(
                Violation::new(
                    "bathroom-area-minimum",
                    format!("{} has {:.0} sq ft", room.id, room.sqft),
                    Severity::Warning,
                    "R307.1",
                )
                .room(&room.id)
                .values(room.sqft as f64, 35.0, "sq ft")
                .remedy(format!("Enlarge {} to fit tub, lavatory and water closet", room.id)),
            );
        }
    }
    result
}

fn check_garage_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in rooms_of_type(plan, RoomType::Garage) {
        let min_dim = room.min_dimension();
        if min_dim < 10.0 {
            result = result.violation(
                Violation::new(
                    "garage-width-minimum",
                    format!("{} is {:.1} ft wide", room.id, min_dim),
                    Severity::Warning,
                    "HUD 4910.1",
                )
                .room(&room.id)
                .values(min_dim as f64, 10.0, "ft")
                .remedy("Widen the garage bay to at least 10 ft"),
            );
        }
    }
    result
}

fn check_dwelling_area(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let total: f32 = habitable_rooms(plan).map(|r| r.sqft).sum();
    if total >= 320.0 || habitable_rooms(plan).next().is_none() {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "dwelling-area-minimum",
            format!("Habitable area totals {:.0} sq ft", total),
            Severity::Warning,
            "R304",
        )
        .values(total as f64, 320.0, "sq ft")
        .remedy("Add habitable area; the program is below typical dwelling minimums"),
    )
}
