//! Texas amendments — windstorm certification along the coast.

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::JurisdictionProfile;

const TDI_WIND_SPEED_MPH: f64 = 130.0;

pub fn profile() -> JurisdictionProfile {
    JurisdictionProfile {
        id: "texas",
        amendments: Vec::new(),
        additional_rules: vec![ComplianceRule::new(
            "tx-windstorm-coastal",
            "TX TDI Windstorm",
            RuleCategory::Structural,
            "Coastal counties need TDI windstorm certification",
            check_windstorm,
        )
        .jurisdiction("texas")
        .version_tag("tx-tdi-2023")],
    }
}

fn check_windstorm(_: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let coastal = ctx.param_bool("coastal").unwrap_or(false);
    let speed = ctx.wind_speed_mph.unwrap_or(0.0);
    if !coastal || speed < TDI_WIND_SPEED_MPH {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "tdi-certification",
            format!("Coastal site with {:.0}-mph design wind needs WPI-8 certification", speed),
            Severity::Warning,
            "TX TDI Windstorm",
        )
        .values(speed, TDI_WIND_SPEED_MPH, "mph")
        .remedy("Engage a TDI-appointed engineer for windstorm inspection"),
    )
}
