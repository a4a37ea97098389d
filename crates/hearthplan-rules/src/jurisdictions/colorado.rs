//! Colorado amendments — stricter ceiling heights plus state-program
//! informational rules (WUI, high altitude, Prop 123, SB 25-002).

use hearthplan_core::plan::PlacedPlan;

use crate::context::ComplianceContext;
use crate::report::{RuleResult, Severity, Violation};
use crate::rule::{ComplianceRule, RuleCategory, RuleConfig};

use super::{Amendment, JurisdictionProfile};

const CO_CEILING_ERROR_FT: f64 = 7.5;
const CO_CEILING_WARN_FT: f64 = 8.0;
const HIGH_ALTITUDE_FT: f64 = 8000.0;

pub fn profile() -> JurisdictionProfile {
    JurisdictionProfile {
        id: "colorado",
        amendments: vec![Amendment {
            rule_id: "irc-r304-3-ceiling-height",
            check: check_ceiling_height_co,
            version: "co-2025.1",
        }],
        additional_rules: vec![
            ComplianceRule::new(
                "co-wui-zone",
                "CO WUI Code",
                RuleCategory::Structural,
                "Wildland-urban interface parcels need ignition-resistant construction",
                check_wui,
            )
            .jurisdiction("colorado")
            .version_tag("co-2025.1"),
            ComplianceRule::new(
                "co-high-altitude",
                "CO HB 22-1362",
                RuleCategory::Energy,
                "High-altitude sites derate combustion appliances",
                check_high_altitude,
            )
            .jurisdiction("colorado")
            .version_tag("co-2025.1"),
            ComplianceRule::new(
                "co-prop-123",
                "CO Prop 123",
                RuleCategory::Accessibility,
                "Prop 123 fast-track review is available for affordable units",
                check_prop_123,
            )
            .jurisdiction("colorado")
            .version_tag("co-2025.1"),
            ComplianceRule::new(
                "co-sb25-002",
                "CO SB 25-002",
                RuleCategory::Structural,
                "SB 25-002 factory-built structures need state modular approval",
                check_sb25_002,
            )
            .jurisdiction("colorado")
            .version_tag("co-2025.1"),
        ],
    }
}

/// Colorado reading of R304.3: 7 ft 6 in hard floor, 8 ft preferred.
fn check_ceiling_height_co(plan: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if plan.rooms.iter().all(|r| !r.room_type.is_habitable()) {
        return RuleResult::new();
    }
    let height = ctx.ceiling_height_ft();
    if height < CO_CEILING_ERROR_FT {
        return RuleResult::new().violation(
            Violation::new(
                "ceiling-height-minimum",
                format!("Ceiling height {:.2} ft is under Colorado's 7 ft 6 in minimum", height),
                Severity::Error,
                "R304.3",
            )
            .values(height, CO_CEILING_ERROR_FT, "ft")
            .remedy("Raise habitable ceilings to at least 7 ft 6 in"),
        );
    }
    if height < CO_CEILING_WARN_FT {
        return RuleResult::new().violation(
            Violation::new(
                "ceiling-height-low",
                format!("Ceiling height {:.2} ft is below the preferred 8 ft", height),
                Severity::Warning,
                "R304.3",
            )
            .values(height, CO_CEILING_WARN_FT, "ft")
            .remedy("Consider 8 ft ceilings for resale and comfort"),
        );
    }
    RuleResult::new()
}

fn check_wui(_: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if !ctx.wui_zone {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "wui-parcel",
            "Parcel is in a wildland-urban interface zone",
            Severity::Info,
            "CO WUI Code",
        )
        .remedy("Use ignition-resistant materials and maintain defensible space"),
    )
}

fn check_high_altitude(_: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    let Some(elevation) = ctx.param_f64("elevation_ft") else {
        return RuleResult::new();
    };
    if elevation <= HIGH_ALTITUDE_FT {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "high-altitude",
            format!("Site elevation {:.0} ft derates combustion equipment", elevation),
            Severity::Info,
            "CO HB 22-1362",
        )
        .values(elevation, HIGH_ALTITUDE_FT, "ft")
        .remedy("Derate furnace and water-heater input per the manufacturer's altitude tables"),
    )
}

fn check_prop_123(_: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if ctx.param_bool("affordable_program").unwrap_or(false) {
        return RuleResult::new()
            .recommend("Prop 123 jurisdictions commit to 90-day reviews for affordable units");
    }
    RuleResult::new()
}

fn check_sb25_002(_: &PlacedPlan, ctx: &ComplianceContext, _: &RuleConfig) -> RuleResult {
    if ctx.construction_type != "modular" {
        return RuleResult::new();
    }
    RuleResult::new().violation(
        Violation::new(
            "modular-state-approval",
            "Factory-built structures are state-approved, not locally re-inspected",
            Severity::Info,
            "CO SB 25-002",
        )
        .remedy("Route plan approval through the Division of Housing modular program"),
    )
}
