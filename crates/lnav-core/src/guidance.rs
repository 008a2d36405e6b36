//! Per-cycle lateral navigation loop.
//!
//! Owns the flight plan and runs the leg state machine:
//! on active leg -> abeam of turn -> turn complete, sequence and rebuild.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::flight_plan::{Sequencer, WaypointSource};
use crate::geometry::Geometry;
use crate::models::{AircraftState, GuidanceParameters};
use crate::rules::GuidanceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LnavMode {
    /// Guidance is valid and should be flown
    Engaged,
    /// No usable geometry; hold previous guidance or revert to a basic mode
    Disengaged,
}

/// Result of one guidance cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LnavOutput {
    pub mode: LnavMode,
    pub guidance: Option<GuidanceParameters>,
    pub distance_to_go_nm: Option<f64>,
    pub active_waypoint_index: usize,
    pub active_waypoint: Option<String>,
    /// A leg was sequenced during this cycle
    pub sequenced: bool,
    /// The aircraft is flying a turn rather than a straight leg
    pub in_turn: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,
}

pub struct LateralGuidance<P> {
    plan: P,
    config: GuidanceConfig,
}

impl<P> LateralGuidance<P>
where
    P: WaypointSource + Sequencer,
{
    pub fn new(plan: P, config: GuidanceConfig) -> Self {
        Self { plan, config }
    }

    pub fn plan(&self) -> &P {
        &self.plan
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Consume the loop and hand the flight plan back.
    pub fn into_plan(self) -> P {
        self.plan
    }

    /// Run one guidance cycle for the given aircraft state.
    pub fn update(&mut self, state: &AircraftState) -> LnavOutput {
        let sequenced = match self.sequence_if_due(state) {
            Ok(sequenced) => sequenced,
            Err(err) => return self.faulted(err, false),
        };

        let geometry = match Geometry::from_flight_plan(
            &self.plan,
            state.true_airspeed_kts,
            &self.config,
        ) {
            Ok(Some(geometry)) => geometry,
            Ok(None) => return self.disengaged(None, sequenced),
            Err(err) => return self.faulted(err, sequenced),
        };

        let position = state.position;
        let guidance = geometry.guidance_at(position, state.true_track_deg);
        let mode = if guidance.is_some() {
            LnavMode::Engaged
        } else {
            LnavMode::Disengaged
        };

        LnavOutput {
            mode,
            guidance,
            distance_to_go_nm: Some(geometry.distance_to_go(position)),
            active_waypoint_index: self.plan.active_waypoint_index(),
            active_waypoint: self.active_ident(),
            sequenced,
            in_turn: geometry.abeam_transition(position).is_some(),
            fault: None,
        }
    }

    fn sequence_if_due(&mut self, state: &AircraftState) -> Result<bool, GeometryError> {
        let due = match Geometry::from_flight_plan(
            &self.plan,
            state.true_airspeed_kts,
            &self.config,
        )? {
            Some(geometry) => {
                geometry.should_sequence_leg(state.position)
                    || passed_fix_without_turn(&geometry, state)
            }
            None => false,
        };

        if !due || !self.plan.sequence() {
            return Ok(false);
        }

        tracing::info!(
            "Sequenced to waypoint {} ({})",
            self.plan.active_waypoint_index(),
            self.active_ident().unwrap_or_default()
        );
        Ok(true)
    }

    fn active_ident(&self) -> Option<String> {
        self.plan
            .waypoint_at(self.plan.active_waypoint_index())
            .map(|wp| wp.ident.clone())
    }

    fn faulted(&self, err: GeometryError, sequenced: bool) -> LnavOutput {
        tracing::warn!("Lateral guidance disengaged: {}", err);
        self.disengaged(Some(err.to_string()), sequenced)
    }

    fn disengaged(&self, fault: Option<String>, sequenced: bool) -> LnavOutput {
        LnavOutput {
            mode: LnavMode::Disengaged,
            guidance: None,
            distance_to_go_nm: None,
            active_waypoint_index: self.plan.active_waypoint_index(),
            active_waypoint: self.active_ident(),
            sequenced,
            in_turn: false,
            fault,
        }
    }
}

/// A straight-through fix has no turn to complete, so the active leg is
/// sequenced once the aircraft draws level with its end.
fn passed_fix_without_turn(geometry: &Geometry<'_>, state: &AircraftState) -> bool {
    if geometry.next_leg().is_none() || !geometry.transitions().is_empty() {
        return false;
    }
    let passed = geometry.active_leg().has_passed_fix(state.position);
    if passed {
        tracing::debug!(
            "Passed {} with no turn planned",
            geometry.active_leg().to_waypoint().ident
        );
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_plan::FlightPlan;
    use crate::models::{Coordinates, Waypoint};

    #[test]
    fn engaged_on_a_valid_plan() {
        let plan = FlightPlan::new(vec![
            Waypoint::new("A", 0.0, 0.0),
            Waypoint::new("B", 1.0, 0.0),
        ]);
        let mut lnav = LateralGuidance::new(plan, GuidanceConfig::default());
        let out = lnav.update(&AircraftState::new(Coordinates::new(0.2, 0.0), 0.0, 250.0));

        assert_eq!(out.mode, LnavMode::Engaged);
        assert_eq!(out.active_waypoint.as_deref(), Some("B"));
        assert!(!out.sequenced);
        assert!(!out.in_turn);
        assert!(out.guidance.unwrap().cross_track_error_nm.abs() < 1e-9);
    }

    #[test]
    fn disengaged_without_an_active_leg() {
        let plan = FlightPlan::new(vec![Waypoint::new("A", 0.0, 0.0)]);
        let mut lnav = LateralGuidance::new(plan, GuidanceConfig::default());
        let out = lnav.update(&AircraftState::new(Coordinates::new(0.0, 0.0), 0.0, 250.0));

        assert_eq!(out.mode, LnavMode::Disengaged);
        assert!(out.guidance.is_none());
        assert!(out.fault.is_none());
    }

    #[test]
    fn geometry_fault_is_reported_not_propagated() {
        let plan = FlightPlan::new(vec![
            Waypoint::new("A", 0.0, 0.0),
            Waypoint::new("A2", 0.0, 0.0),
        ]);
        let mut lnav = LateralGuidance::new(plan, GuidanceConfig::default());
        let out = lnav.update(&AircraftState::new(Coordinates::new(0.0, 0.0), 0.0, 250.0));

        assert_eq!(out.mode, LnavMode::Disengaged);
        let fault = out.fault.unwrap();
        assert!(fault.contains("coincident"), "fault was {fault}");
    }

    #[test]
    fn sequencing_into_a_bad_leg_still_reports_the_sequence() {
        // A -> B -> C runs straight north; C -> D then doubles back.
        let plan = FlightPlan::new(vec![
            Waypoint::new("A", 0.0, 0.0),
            Waypoint::new("B", 0.5, 0.0),
            Waypoint::new("C", 1.0, 0.0),
            Waypoint::new("D", 0.8, 0.0),
        ]);
        let mut lnav = LateralGuidance::new(plan, GuidanceConfig::default());
        let out = lnav.update(&AircraftState::new(Coordinates::new(0.51, 0.0), 0.0, 250.0));

        assert_eq!(out.mode, LnavMode::Disengaged);
        assert!(out.sequenced);
        assert_eq!(out.active_waypoint_index, 2);
        assert_eq!(lnav.plan().active_index, 2);
        assert!(out.fault.unwrap().contains("reverses"));
    }
}
