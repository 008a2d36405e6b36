//! Pre-defined flight plans for exercising guidance.

use lnav_core::geodesy::{bearing_deg, destination};
use lnav_core::{AircraftState, Coordinates, FlightPlan, Waypoint};

/// A named flight plan with a starting aircraft state.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub plan: FlightPlan,
    pub initial_state: AircraftState,
}

pub const SCENARIO_NAMES: &[&str] = &["dogleg", "box"];

impl Scenario {
    /// Look up a canned scenario by name.
    pub fn by_name(
        name: &str,
        origin: Coordinates,
        true_airspeed_kts: f64,
    ) -> Option<Self> {
        match name {
            "dogleg" => Some(create_dogleg_scenario(origin, true_airspeed_kts)),
            "box" => Some(create_box_scenario(origin, 15.0, true_airspeed_kts)),
            _ => None,
        }
    }

    /// Start at the first waypoint, established on the first leg.
    fn starting_at_origin(name: &str, plan: FlightPlan, true_airspeed_kts: f64) -> Self {
        let (position, track) = match (plan.waypoints.first(), plan.waypoints.get(1)) {
            (Some(first), Some(second)) => (
                first.position,
                bearing_deg(first.position, second.position),
            ),
            (Some(first), None) => (first.position, 0.0),
            _ => (Coordinates::new(0.0, 0.0), 0.0),
        };

        Self {
            name: name.to_string(),
            plan,
            initial_state: AircraftState::new(position, track, true_airspeed_kts),
        }
    }

    /// Build a scenario around a user-supplied plan.
    pub fn from_plan(name: &str, plan: FlightPlan, true_airspeed_kts: f64) -> Self {
        Self::starting_at_origin(name, plan, true_airspeed_kts)
    }
}

/// North for 20 nm, then a 45 deg right turn for another 20 nm, then a
/// 90 deg left turn.
pub fn create_dogleg_scenario(origin: Coordinates, true_airspeed_kts: f64) -> Scenario {
    let first = destination(origin, 0.0, 20.0);
    let second = destination(first, 45.0, 20.0);
    let third = destination(second, 315.0, 20.0);

    let plan = FlightPlan::new(vec![
        waypoint("ORIGN", origin),
        waypoint("DOG01", first),
        waypoint("DOG02", second),
        waypoint("DOG03", third),
    ]);
    Scenario::starting_at_origin("dogleg", plan, true_airspeed_kts)
}

/// A right-hand square of `side_nm`, returning to the start.
pub fn create_box_scenario(
    origin: Coordinates,
    side_nm: f64,
    true_airspeed_kts: f64,
) -> Scenario {
    let north = destination(origin, 0.0, side_nm);
    let north_east = destination(north, 90.0, side_nm);
    let east = destination(north_east, 180.0, side_nm);

    let plan = FlightPlan::new(vec![
        waypoint("BOX00", origin),
        waypoint("BOX01", north),
        waypoint("BOX02", north_east),
        waypoint("BOX03", east),
        waypoint("BOX04", origin),
    ]);
    Scenario::starting_at_origin("box", plan, true_airspeed_kts)
}

fn waypoint(ident: &str, position: Coordinates) -> Waypoint {
    Waypoint::new(ident, position.lat, position.lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnav_core::geodesy::distance_nm;

    #[test]
    fn box_closes_on_itself() {
        let origin = Coordinates::new(47.0, 8.0);
        let scenario = create_box_scenario(origin, 15.0, 250.0);
        let wps = &scenario.plan.waypoints;
        assert_eq!(wps.len(), 5);
        assert!((distance_nm(wps[0].position, wps[1].position) - 15.0).abs() < 1e-6);
        assert_eq!(wps[0].position, wps[4].position);
    }

    #[test]
    fn scenarios_start_on_the_first_leg() {
        let origin = Coordinates::new(0.0, 0.0);
        for name in SCENARIO_NAMES {
            let scenario = Scenario::by_name(name, origin, 250.0).unwrap();
            assert_eq!(scenario.initial_state.position, origin);
            assert!(scenario.initial_state.true_track_deg.abs() < 1e-9);
            assert_eq!(scenario.plan.active_index, 1);
        }
        assert!(Scenario::by_name("figure-eight", origin, 250.0).is_none());
    }
}
