//! Florida amendments — hurricane wind thresholds and HVHZ glazing.

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{Amendment, JurisdictionProfile};

const FL_WIND_LIMIT_MPH: f64 = 130.0;
const FL_LARGE_WINDOW_SQFT: f32 = 20.0;
const HVHZ_WIND_MPH: f64 = 170.0;

pub fn profile() -> JurisdictionProfile {
    JurisdictionProfile {
        id: "florida",
        amendments: vec![Amendment {
            rule_id: "wind-design-speed",
            check: check_wind_fl,
            version: "fbc-2023",
        }],
        additional_rules: vec![ComplianceRule::new(
            "fl-hvhz-impact-glazing",
            "FBC 1626",
            RuleCategory::Structural,
            "High-velocity hurricane zones require impact-rated glazing",
            check_hvhz,
        )
        .jurisdiction("florida")
        .version_tag("fbc-2023")],
    }
}

/// Florida Building Code reading of the wind rule: the large-glazing check
/// trips at 130 mph instead of 140.
fn check_wind_fl(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let Some(speed) = ctx.wind_speed_mph else {
        return RuleResult::new();
    };
    if speed <= FL_WIND_LIMIT_MPH {
        return RuleResult::new();
    }
    let mut result = RuleResult::new();
    for window in &plan.windows {
        let area = window.width * window.height;
        if area > FL_LARGE_WINDOW_SQFT {
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
                .values(area as f64, FL_LARGE_WINDOW_SQFT as f64, "sq ft")
                .remedy("Use impact-rated glazing or shutters"),
            );
        }
    }
    result
}

fn check_hvhz(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let hvhz = ctx.param_bool("hvhz").unwrap_or(false)
        || ctx.wind_speed_mph.unwrap_or(0.0) >= HVHZ_WIND_MPH;
    if !hvhz || plan.windows.is_empty() {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "hvhz-impact-glazing",
            "All exterior glazing must be impact-rated in the HVHZ",
            Severity::Warning,
            "FBC 1626",
        )
        .remedy("Specify Miami-Dade NOA impact glazing for every opening"),
    )
}
