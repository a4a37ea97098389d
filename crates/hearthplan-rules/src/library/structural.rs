//! Structural rules — span limits, modular-transport constraints, and
//! site-hazard parameters from the context.

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

const MAX_CLEAR_SPAN_FT: f64 = 20.0;
const MODULE_WIDTH_FT: f32 = 16.0;
const BEARING_ALIGN_TOLERANCE_FT: f32 = 2.0;
const WIND_SPEED_LIMIT_MPH: f64 = 140.0;
const LARGE_WINDOW_SQFT: f32 = 20.0;
const SNOW_LOAD_LIMIT_PSF: f64 = 50.0;
const SNOW_SPAN_LIMIT_FT: f32 = 16.0;

pub fn rules() -> Vec<ComplianceRule> {
    vec![
        ComplianceRule::new(
            "irc-r502-3-max-span",
            "R502.3",
            RuleCategory::Structural,
            "Rooms longer than 20 ft exceed standard joist spans",
            check_max_span,
        ),
        ComplianceRule::new(
            "modular-transport-width",
            "HP-MOD-1",
            RuleCategory::Structural,
            "Rooms wider than 16 ft in both directions need a marriage wall",
            check_transport_width,
        ),
        ComplianceRule::new(
            "modular-marriage-wall",
            "HP-MOD-2",
            RuleCategory::Structural,
            "Rooms crossing a 16 ft module line straddle two modules",
            check_marriage_wall,
        ),
        ComplianceRule::new(
            "bearing-wall-alignment",
            "R602.10",
            RuleCategory::Structural,
            "Upper-floor bearing lines should stack over lower walls",
            check_bearing_alignment,
        ),
        ComplianceRule::new(
            "seismic-design-category",
            "R301.2.2",
            RuleCategory::Structural,
            "High seismic categories need engineered lateral design",
            check_seismic,
        ),
        ComplianceRule::new(
            "wind-design-speed",
            "R301.2.1",
            RuleCategory::Structural,
            "High design wind speeds limit large glazed openings",
            check_wind,
        ),
        ComplianceRule::new(
            "ground-snow-load",
            "R301.2.3",
            RuleCategory::Structural,
            "Heavy snow loads shorten allowable spans",
            check_snow,
        ),
    ]
}

fn check_max_span(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in &plan.rooms {
        let span = room.width.max(room.depth) as f64;
        if span > MAX_CLEAR_SPAN_FT {
            result = result.violation(
                Violation::new(
                    "span-exceeded",
                    format!("{} spans {:.0} ft", room.id, span),
                    Severity::Error,
                    "R502.3",
                )
                .room(&room.id)
                .values(span, MAX_CLEAR_SPAN_FT, "ft")
                .remedy(format!("Add a beam or bearing line across {}", room.id)),
            );
        }
    }
    result
}

fn check_transport_width(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in &plan.rooms {
        let narrow = room.min_dimension();
        if narrow > MODULE_WIDTH_FT {
            result = result.violation(
                Violation::new(
                    "module-width-exceeded",
                    format!("{} is {:.0} ft in its narrow dimension", room.id, narrow),
                    Severity::Warning,
                    "HP-MOD-1",
                )
                .room(&room.id)
                .values(narrow as f64, MODULE_WIDTH_FT as f64, "ft")
                .remedy("Split the room across modules with a marriage wall"),
            );
        }
    }
    result
}

fn check_marriage_wall(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let mut result = RuleResult::new();
    for room in &plan.rooms {
        let fp = plan.envelope.floor_rect(room.floor);
        let mut line = fp.x + MODULE_WIDTH_FT;
        while line < fp.right() - 0.01 {
            if room.x + 0.01 < line && line < room.x + room.width - 0.01 {
                result = result.violation(
                    Violation::new(
                        "module-line-crossed",
                        format!("{} crosses the module line at {:.0} ft", room.id, line - fp.x),
                        Severity::Warning,
                        "HP-MOD-2",
                    )
                    .room(&room.id)
                    .remedy("Shift the room or align a wall with the module joint"),
                );
                break;
            }
            line += MODULE_WIDTH_FT;
        }
    }
    result
}

fn check_bearing_alignment(plan: &PlacedPlan, _: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if plan.envelope.stories < 2 {
        return RuleResult::new();
    }
    // Vertical wall lines on floor 1 that upper bearing edges can land on.
    let lower_lines: Vec<f32> = plan
        .rooms_on_floor(1)
        .flat_map(|r| [r.x, r.x + r.width])
        .collect();
    let mut result = RuleResult::new();
    for room in plan.rooms_on_floor(2) {
        for edge in [room.x, room.x + room.width] {
            let aligned = lower_lines
                .iter()
                .any(|line| (line - edge).abs() <= BEARING_ALIGN_TOLERANCE_FT);
            if !aligned {
                result = result.violation(
                    Violation::new(
                        "bearing-unstacked",
                        format!("{} has a bearing edge {:.0} ft from any lower wall", room.id, edge),
                        Severity::Info,
                        "R602.10",
                    )
                    .room(&room.id)
                    .remedy("Stack upper walls over lower bearing lines or size a transfer beam"),
                );
                break;
            }
        }
    }
    result
}

fn check_seismic(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let Some(category) = &ctx.seismic_design_category else {
        return RuleResult::new();
    };
    let high = matches!(category.as_str(), "D0" | "D1" | "D2" | "E");
    if !high || plan.envelope.stories < 2 {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "seismic-review",
            format!("Two stories in seismic design category {}", category),
            Severity::Warning,
            "R301.2.2",
        )
        .remedy("Have the lateral system engineered for the seismic category"),
    )
}

fn check_wind(plan: &PlacedPlan, ctx: &ComplianceContext, config: &RuleConfig) -> RuleResult {
    let Some(speed) = ctx.wind_speed_mph else {
        return RuleResult::new();
    };
    let limit = config
        .get("wind_speed_limit_mph")
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(WIND_SPEED_LIMIT_MPH);
    if speed <= limit {
        return RuleResult::new();
    }
    let mut result = RuleResult::new();
    for window in &plan.windows {
        let area = window.width * window.height;
        if area > LARGE_WINDOW_SQFT {
            result = result.violation(
                Violation::new(
                    "wind-large-glazing",
                    format!(
                        "{} is {:.0} sq ft of glazing in {}-mph wind country",
                        window.id, area, speed
                    ),
                    Severity::Warning,
                    "R301.2.1",
                )
                .room(&window.room_id)
                .values(area as f64, LARGE_WINDOW_SQFT as f64, "sq ft")
                .remedy("Use rated glazing or split the opening"),
            );
        }
    }
    result
}

fn check_snow(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let Some(load) = ctx.ground_snow_load_psf else {
        return RuleResult::new();
    };
    if load <= SNOW_LOAD_LIMIT_PSF {
        return RuleResult::new();
    }
    let mut result = RuleResult::new();
    for room in &plan.rooms {
        let span = room.width.max(room.depth);
        if span > SNOW_SPAN_LIMIT_FT {
            result = result.violation(
                Violation::new(
                    "snow-span",
                    format!("{} spans {:.0} ft under a {:.0} psf snow load", room.id, span, load),
                    Severity::Warning,
                    "R301.2.3",
                )
                .room(&room.id)
                .values(span as f64, SNOW_SPAN_LIMIT_FT as f64, "ft")
                .remedy("Shorten the span or upsize the roof framing"),
            );
        }
    }
    result
}
