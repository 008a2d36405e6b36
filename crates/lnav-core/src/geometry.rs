//! Composed path geometry for one guidance cycle.
//!
//! A [`Geometry`] is rebuilt from the flight plan every cycle rather than
//! patched; it holds the active leg, the optional next leg and the turns
//! joining them, and routes guidance queries to whichever one the aircraft
//! is currently on.

use crate::error::GeometryError;
use crate::flight_plan::WaypointSource;
use crate::guidable::Guidable;
use crate::leg::Leg;
use crate::models::{Coordinates, GuidanceParameters};
use crate::planner::plan_transitions;
use crate::rules::GuidanceConfig;
use crate::transition::Transition;

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry<'a> {
    /// Active leg first, then the next leg if there is one
    legs: Vec<Leg<'a>>,
    /// In traversal order
    transitions: Vec<Transition>,
    sequencing_threshold_nm: f64,
}

impl<'a> Geometry<'a> {
    /// Compose the active leg, the next leg and the turn between them.
    pub fn new(
        active_leg: Leg<'a>,
        next_leg: Option<Leg<'a>>,
        true_airspeed_kts: f64,
        config: &GuidanceConfig,
    ) -> Result<Self, GeometryError> {
        let mut legs = vec![active_leg];
        legs.extend(next_leg);
        let transitions = plan_transitions(&legs, true_airspeed_kts, config)?;

        Ok(Self {
            legs,
            transitions,
            sequencing_threshold_nm: config.sequencing_threshold_nm,
        })
    }

    /// Build the geometry around the source's active waypoint.
    ///
    /// Returns `Ok(None)` when there is no waypoint before or at the active
    /// index, i.e. no active leg can be formed.
    pub fn from_flight_plan<S>(
        source: &'a S,
        true_airspeed_kts: f64,
        config: &GuidanceConfig,
    ) -> Result<Option<Self>, GeometryError>
    where
        S: WaypointSource + ?Sized,
    {
        let index = source.active_waypoint_index();
        let Some(from_index) = index.checked_sub(1) else {
            return Ok(None);
        };
        let (Some(from), Some(to)) = (source.waypoint_at(from_index), source.waypoint_at(index))
        else {
            return Ok(None);
        };

        let active_leg = Leg::track_to_fix(from, to)?;
        let next_leg = source
            .waypoint_at(index + 1)
            .map(|next| Leg::track_to_fix(to, next))
            .transpose()?;

        Self::new(active_leg, next_leg, true_airspeed_kts, config).map(Some)
    }

    pub fn active_leg(&self) -> &Leg<'a> {
        &self.legs[0]
    }

    pub fn next_leg(&self) -> Option<&Leg<'a>> {
        self.legs.get(1)
    }

    pub fn leg(&self, index: usize) -> Option<&Leg<'a>> {
        self.legs.get(index)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The first transition, in traversal order, the aircraft is abeam of.
    pub fn abeam_transition(&self, position: Coordinates) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|transition| transition.is_abeam(position))
    }

    pub fn guidance_at(
        &self,
        position: Coordinates,
        true_track_deg: f64,
    ) -> Option<GuidanceParameters> {
        match self.abeam_transition(position) {
            Some(transition) => transition.guidance_at(position, true_track_deg),
            None => self.active_leg().guidance_at(position, true_track_deg),
        }
    }

    pub fn distance_to_go(&self, position: Coordinates) -> f64 {
        match self.abeam_transition(position) {
            Some(transition) => transition.distance_to_go(position),
            None => self.active_leg().distance_to_go(position),
        }
    }

    /// Whether the aircraft has flown far enough round the entry turn for
    /// the active leg to be sequenced.
    pub fn should_sequence_leg(&self, position: Coordinates) -> bool {
        let Some(transition) = self.transitions.first() else {
            return false;
        };

        let remaining = transition.track_distance_to_termination(position);
        tracing::debug!(
            "Transition distance to termination {:.4} nm (threshold {} nm)",
            remaining,
            self.sequencing_threshold_nm
        );
        remaining < self.sequencing_threshold_nm
    }
}
