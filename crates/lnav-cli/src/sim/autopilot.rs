//! Minimal lateral autopilot closing the loop on guidance parameters.

use lnav_core::GuidanceParameters;
use serde::{Deserialize, Serialize};

/// Maps track-angle and cross-track error to a bank demand.
///
/// Cross-track error is turned into an intercept angle, added to the
/// track-angle error and scaled into bank on top of the feed-forward command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateralAutopilot {
    /// Degrees of bank per degree of track error
    pub track_gain: f64,
    /// Degrees of intercept per nautical mile off the path
    pub cross_track_gain_deg_per_nm: f64,
    pub max_intercept_deg: f64,
    pub max_bank_deg: f64,
}

impl Default for LateralAutopilot {
    fn default() -> Self {
        Self {
            track_gain: 2.0,
            cross_track_gain_deg_per_nm: 40.0,
            max_intercept_deg: 30.0,
            max_bank_deg: 30.0,
        }
    }
}

impl LateralAutopilot {
    pub fn bank_demand(&self, guidance: &GuidanceParameters) -> f64 {
        let intercept = (guidance.cross_track_error_nm * self.cross_track_gain_deg_per_nm)
            .clamp(-self.max_intercept_deg, self.max_intercept_deg);
        let demand = guidance.bank_angle_command_deg
            + self.track_gain * (guidance.track_angle_error_deg + intercept);
        demand.clamp(-self.max_bank_deg, self.max_bank_deg)
    }
}
