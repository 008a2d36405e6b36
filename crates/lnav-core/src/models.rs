//! Core data models for lateral guidance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geodetic latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A named flight-plan fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub ident: String,
    pub position: Coordinates,
    #[serde(default)]
    pub altitude_ft: f64,
}

impl Waypoint {
    pub fn new(ident: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            ident: ident.into(),
            position: Coordinates::new(lat, lon),
            altitude_ft: 0.0,
        }
    }

    /// Set the fix altitude.
    pub fn with_altitude(mut self, altitude_ft: f64) -> Self {
        self.altitude_ft = altitude_ft;
        self
    }
}

/// One sample of aircraft state, provided once per guidance cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftState {
    pub position: Coordinates,
    /// True track over ground, degrees
    pub true_track_deg: f64,
    /// True airspeed, knots
    pub true_airspeed_kts: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl AircraftState {
    pub fn new(position: Coordinates, true_track_deg: f64, true_airspeed_kts: f64) -> Self {
        Self {
            position,
            true_track_deg,
            true_airspeed_kts,
            timestamp: Utc::now(),
        }
    }
}

/// The control law the guidance parameters are intended for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlLaw {
    /// Track a lateral path using track-angle and cross-track errors
    #[default]
    LateralPath,
}

/// Lateral deviation signal consumed by a flight director or autopilot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuidanceParameters {
    pub control_law: ControlLaw,
    /// Desired track minus actual track, in (-180, 180]
    pub track_angle_error_deg: f64,
    /// Positive when the aircraft is left of the path
    pub cross_track_error_nm: f64,
    /// Feed-forward roll, positive right wing down
    pub bank_angle_command_deg: f64,
}

/// Direction of a turn as seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Clockwise,
    Counterclockwise,
}

impl TurnDirection {
    pub fn is_clockwise(self) -> bool {
        matches!(self, TurnDirection::Clockwise)
    }

    /// +1 for clockwise, -1 for counterclockwise.
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Clockwise => 1.0,
            TurnDirection::Counterclockwise => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoint_deserializes_without_altitude() {
        let wp: Waypoint = serde_json::from_str(
            r#"{"ident":"KSEA","position":{"lat":47.45,"lon":-122.31}}"#,
        )
        .unwrap();
        assert_eq!(wp.ident, "KSEA");
        assert_eq!(wp.altitude_ft, 0.0);
    }

    #[test]
    fn turn_direction_serializes_lowercase() {
        let json = serde_json::to_string(&TurnDirection::Counterclockwise).unwrap();
        assert_eq!(json, "\"counterclockwise\"");
    }
}
