//! California amendments — Title 24 energy tightening.

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::library::energy::climate_glazing_with_limit;
use crate::report::RuleResult;
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{Amendment, JurisdictionProfile};

const CA_GLAZING_LIMIT: f64 = 0.20;

pub fn profile() -> JurisdictionProfile {
    JurisdictionProfile {
        id: "california",
        amendments: vec![Amendment {
            rule_id: "iecc-climate-glazing",
            check: check_glazing_ca,
            version: "ca-t24-2022",
        }],
        additional_rules: vec![ComplianceRule::new(
            "ca-title24-solar-ready",
            "CA Title 24 §110.10",
            RuleCategory::Energy,
            "New dwellings must reserve a solar-ready roof zone",
            check_solar_ready,
        )
        .jurisdiction("california")
        .version_tag("ca-t24-2022")],
    }
}

/// Title 24 prescriptive glazing cap: 20 percent, context override ignored.
fn check_glazing_ca(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    climate_glazing_with_limit(plan, ctx, CA_GLAZING_LIMIT)
}

fn check_solar_ready(_: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if ctx.param_bool("solar_ready_zone").unwrap_or(false) {
        return RuleResult::new();
    }
    RuleResult::new()
        .recommend("Reserve a 250 sq ft south-facing roof zone clear of vents for photovoltaics")
}
