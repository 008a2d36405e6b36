//! Point-mass aircraft flying coordinated turns.

use lnav_core::geodesy::{destination, normalize_360};
use lnav_core::planner::turn_rate_deg_per_sec;
use lnav_core::{AircraftState, Coordinates, GuidanceConfig};

/// Kinematic aircraft model with a roll-rate limited bank angle.
#[derive(Debug, Clone)]
pub struct SimulatedAircraft {
    pub position: Coordinates,
    pub true_track_deg: f64,
    pub true_airspeed_kts: f64,
    pub bank_deg: f64,
    pub max_bank_deg: f64,
    pub roll_rate_deg_per_sec: f64,
}

impl SimulatedAircraft {
    pub fn new(position: Coordinates, true_track_deg: f64, true_airspeed_kts: f64) -> Self {
        Self {
            position,
            true_track_deg: normalize_360(true_track_deg),
            true_airspeed_kts,
            bank_deg: 0.0,
            max_bank_deg: 30.0,
            roll_rate_deg_per_sec: 10.0,
        }
    }

    pub fn state(&self) -> AircraftState {
        AircraftState::new(self.position, self.true_track_deg, self.true_airspeed_kts)
    }

    /// Advance `dt_s` seconds while rolling towards `bank_demand_deg`.
    pub fn step(&mut self, bank_demand_deg: f64, dt_s: f64, config: &GuidanceConfig) {
        let demand = bank_demand_deg.clamp(-self.max_bank_deg, self.max_bank_deg);
        let max_roll = self.roll_rate_deg_per_sec * dt_s;
        self.bank_deg += (demand - self.bank_deg).clamp(-max_roll, max_roll);

        let turn_rate = if self.true_airspeed_kts > 0.0 {
            turn_rate_deg_per_sec(self.true_airspeed_kts, self.bank_deg, config)
        } else {
            0.0
        };
        let track_change = turn_rate * dt_s;

        // fly the step along the mean track
        let mean_track = self.true_track_deg + track_change / 2.0;
        let distance = self.true_airspeed_kts / 3600.0 * dt_s;
        self.position = destination(self.position, normalize_360(mean_track), distance);
        self.true_track_deg = normalize_360(self.true_track_deg + track_change);
    }
}
