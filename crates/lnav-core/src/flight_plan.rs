//! Flight-plan access used to build path geometry.

use serde::{Deserialize, Serialize};

use crate::models::Waypoint;

/// Read access to an ordered waypoint list with an active waypoint.
///
/// The active waypoint is the one the aircraft is currently flying to; the
/// active leg runs from the waypoint before it.
pub trait WaypointSource {
    fn active_waypoint_index(&self) -> usize;

    fn waypoint_at(&self, index: usize) -> Option<&Waypoint>;
}

/// Advances the active waypoint when a leg is sequenced.
pub trait Sequencer {
    /// Make the next waypoint active. Returns false if there is none.
    fn sequence(&mut self) -> bool;
}

/// An in-memory flight plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub waypoints: Vec<Waypoint>,
    #[serde(default = "default_active_index")]
    pub active_index: usize,
}

fn default_active_index() -> usize {
    1
}

impl FlightPlan {
    /// A plan flying from the first waypoint towards the second.
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self {
            waypoints,
            active_index: default_active_index(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The waypoint being flown to, if any.
    pub fn active_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.get(self.active_index)
    }

    /// True once the last waypoint has been made active.
    pub fn is_on_final_leg(&self) -> bool {
        self.active_index + 1 >= self.waypoints.len()
    }
}

impl WaypointSource for FlightPlan {
    fn active_waypoint_index(&self) -> usize {
        self.active_index
    }

    fn waypoint_at(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }
}

impl Sequencer for FlightPlan {
    fn sequence(&mut self) -> bool {
        if self.is_on_final_leg() {
            return false;
        }
        self.active_index += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> FlightPlan {
        FlightPlan::new(vec![
            Waypoint::new("A", 0.0, 0.0),
            Waypoint::new("B", 1.0, 0.0),
            Waypoint::new("C", 1.0, 1.0),
        ])
    }

    #[test]
    fn starts_flying_to_second_waypoint() {
        let plan = plan();
        assert_eq!(plan.active_waypoint_index(), 1);
        assert_eq!(plan.active_waypoint().map(|wp| wp.ident.as_str()), Some("B"));
    }

    #[test]
    fn sequence_stops_at_last_waypoint() {
        let mut plan = plan();
        assert!(plan.sequence());
        assert_eq!(plan.active_waypoint_index(), 2);
        assert!(plan.is_on_final_leg());
        assert!(!plan.sequence());
        assert_eq!(plan.active_waypoint_index(), 2);
    }

    #[test]
    fn parses_json_with_default_active_index() {
        let plan = FlightPlan::from_json_str(
            r#"{"waypoints":[
                {"ident":"A","position":{"lat":0.0,"lon":0.0}},
                {"ident":"B","position":{"lat":1.0,"lon":0.0}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(plan.active_index, 1);
        assert_eq!(plan.waypoints.len(), 2);
    }
}
