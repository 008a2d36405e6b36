//! Tunable guidance constants.

use serde::{Deserialize, Serialize};

/// Configuration for turn planning and sequencing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Speeds below this are raised to it before sizing a turn (knots)
    pub min_planning_speed_kts: f64,
    /// Bank at zero speed, blended up to nominal at `low_speed_limit_kts`
    pub low_speed_bank_deg: f64,
    /// Bank used across the normal speed band
    pub nominal_bank_deg: f64,
    /// Bank at and beyond `high_speed_end_kts`
    pub high_speed_bank_deg: f64,
    pub low_speed_limit_kts: f64,
    pub high_speed_start_kts: f64,
    pub high_speed_end_kts: f64,
    /// Coordinated-turn constant: deg/s = k * tan(bank) / kts
    pub turn_rate_constant: f64,
    /// Fixed roll demanded while flying a turn arc
    pub turn_bank_command_deg: f64,
    /// Remaining arc below which the active leg is sequenced (nm)
    pub sequencing_threshold_nm: f64,
    /// Turns smaller than this need no transition
    pub collinear_tolerance_deg: f64,
    /// Turns within this of 180 deg are rejected
    pub reversal_tolerance_deg: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            min_planning_speed_kts: 150.0,
            low_speed_bank_deg: 15.0,
            nominal_bank_deg: 25.0,
            high_speed_bank_deg: 19.0,
            low_speed_limit_kts: 150.0,
            high_speed_start_kts: 300.0,
            high_speed_end_kts: 450.0,
            turn_rate_constant: 1091.0,
            turn_bank_command_deg: 25.0,
            sequencing_threshold_nm: 0.001,
            collinear_tolerance_deg: 1e-6,
            reversal_tolerance_deg: 1e-6,
        }
    }
}

impl GuidanceConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GuidanceConfig::from_json_str(r#"{"nominal_bank_deg": 20.0}"#).unwrap();
        assert_eq!(config.nominal_bank_deg, 20.0);
        assert_eq!(config.min_planning_speed_kts, 150.0);
        assert_eq!(config.sequencing_threshold_nm, 0.001);
    }
}
