//! Evaluation context — jurisdiction, construction parameters, and the
//! free-form jurisdictional parameter bag.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context a compliance run evaluates under. Everything the plan itself
/// doesn't carry: site parameters, construction method, local knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceContext {
    pub jurisdiction: String,
    pub building_type: String,
    pub construction_type: String,
    pub occupant_load: u32,
    /// ASCE 7 seismic design category, e.g. "B", "D1".
    #[serde(default)]
    pub seismic_design_category: Option<String>,
    /// Ultimate design wind speed, mph.
    #[serde(default)]
    pub wind_speed_mph: Option<f64>,
    /// Ground snow load, psf.
    #[serde(default)]
    pub ground_snow_load_psf: Option<f64>,
    /// Wildland-urban interface zone.
    #[serde(default)]
    pub wui_zone: bool,
    /// Free-form jurisdictional parameters (ceiling height, climate zone,
    /// elevation, coastal flags...).
    #[serde(default)]
    pub parameters: HashMap<String, Value>,
}

impl Default for ComplianceContext {
    fn default() -> Self {
        ComplianceContext {
            jurisdiction: "irc-base".to_string(),
            building_type: "single_family".to_string(),
            construction_type: "site_built".to_string(),
            occupant_load: 4,
            seismic_design_category: None,
            wind_speed_mph: None,
            ground_snow_load_psf: None,
            wui_zone: false,
            parameters: HashMap::new(),
        }
    }
}

impl ComplianceContext {
    pub fn for_jurisdiction(jurisdiction: &str) -> Self {
        ComplianceContext {
            jurisdiction: jurisdiction.to_string(),
            ..Default::default()
        }
    }

    /// Numeric parameter lookup from the bag.
    pub fn param_f64(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).and_then(Value::as_f64)
    }

    pub fn param_bool(&self, key: &str) -> Option<bool> {
        self.parameters.get(key).and_then(Value::as_bool)
    }

    /// Ceiling height in feet; the plan model is 2-D, so this rides in the
    /// context bag. Defaults to 8 ft.
    pub fn ceiling_height_ft(&self) -> f64 {
        self.param_f64("ceiling_height_ft").unwrap_or(8.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = ComplianceContext::default();
        assert_eq!(ctx.jurisdiction, "irc-base");
        assert_eq!(ctx.ceiling_height_ft(), 8.0);
        assert!(!ctx.wui_zone);
    }

    #[test]
    fn test_parameter_bag() {
        let mut ctx = ComplianceContext::for_jurisdiction("colorado");
        ctx.parameters
            .insert("ceiling_height_ft".to_string(), Value::from(7.25));
        ctx.parameters
            .insert("elevation_ft".to_string(), Value::from(9200.0));
        ctx.parameters.insert("coastal".to_string(), Value::from(true));
        assert_eq!(ctx.ceiling_height_ft(), 7.25);
        assert_eq!(ctx.param_f64("elevation_ft"), Some(9200.0));
        assert_eq!(ctx.param_bool("coastal"), Some(true));
        assert_eq!(ctx.param_f64("missing"), None);
    }
}
