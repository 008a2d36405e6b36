//! Turns joining two consecutive legs.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geodesy::{
    angle_diff, bearing_deg, destination, distance_nm, normalize_180, normalize_360, reciprocal,
};
use crate::guidable::Guidable;
use crate::leg::Leg;
use crate::models::{ControlLaw, Coordinates, GuidanceParameters, TurnDirection};
use crate::rules::GuidanceConfig;

/// Position of a leg within a [`Geometry`](crate::geometry::Geometry).
pub type LegIndex = usize;

/// The kinds of turn a planner may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Constant-radius arc tangent to both legs
    FixedRadius,
    /// Reserved: a curved join onto a fixed leg. Not implemented.
    SmoothOntoLeg,
}

/// A turn segment between a previous leg and a next leg.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    FixedRadius(FixedRadiusTransition),
}

impl Transition {
    pub fn kind(&self) -> TransitionKind {
        match self {
            Transition::FixedRadius(_) => TransitionKind::FixedRadius,
        }
    }

    pub fn previous_leg(&self) -> LegIndex {
        match self {
            Transition::FixedRadius(turn) => turn.previous_leg,
        }
    }

    pub fn next_leg(&self) -> LegIndex {
        match self {
            Transition::FixedRadius(turn) => turn.next_leg,
        }
    }

    /// Along-path distance from `position` to the end of the turn (nm).
    pub fn track_distance_to_termination(&self, position: Coordinates) -> f64 {
        match self {
            Transition::FixedRadius(turn) => turn.track_distance_to_termination(position),
        }
    }
}

impl Guidable for Transition {
    fn guidance_at(
        &self,
        position: Coordinates,
        true_track_deg: f64,
    ) -> Option<GuidanceParameters> {
        match self {
            Transition::FixedRadius(turn) => turn.guidance_at(position, true_track_deg),
        }
    }

    fn distance_to_go(&self, position: Coordinates) -> f64 {
        match self {
            Transition::FixedRadius(turn) => turn.distance_to_go(position),
        }
    }

    fn is_abeam(&self, position: Coordinates) -> bool {
        match self {
            Transition::FixedRadius(turn) => turn.is_abeam(position),
        }
    }
}

/// A circular arc of fixed radius, tangent to the previous and next legs.
///
/// The arc geometry is derived once from the two legs; the legs themselves
/// stay owned by the geometry and are referenced by index.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRadiusTransition {
    previous_leg: LegIndex,
    next_leg: LegIndex,
    radius_nm: f64,
    turn_direction: TurnDirection,
    bank_command_deg: f64,
    previous_bearing_deg: f64,
    turn_angle_deg: f64,
    corner: Coordinates,
    center: Coordinates,
    entry_point: Coordinates,
    exit_point: Coordinates,
}

impl FixedRadiusTransition {
    /// Build the turn from `legs[previous_leg]` onto the leg that follows it.
    pub fn new(
        legs: &[Leg<'_>],
        previous_leg: LegIndex,
        radius_nm: f64,
        turn_direction: TurnDirection,
        config: &GuidanceConfig,
    ) -> Result<Self, GeometryError> {
        let next_leg = previous_leg + 1;
        let previous = legs
            .get(previous_leg)
            .ok_or(GeometryError::LegOutOfRange { index: previous_leg })?;
        let next = legs
            .get(next_leg)
            .ok_or(GeometryError::LegOutOfRange { index: next_leg })?;

        if !radius_nm.is_finite() || radius_nm <= 0.0 {
            return Err(GeometryError::InvalidRadius { radius_nm });
        }

        let previous_bearing_deg = previous.bearing_deg();
        let next_bearing_deg = next.bearing_deg();
        let turn_angle_deg = angle_diff(previous_bearing_deg, next_bearing_deg).abs();

        if turn_angle_deg <= config.collinear_tolerance_deg {
            return Err(GeometryError::CollinearLegs);
        }
        if turn_angle_deg >= 180.0 - config.reversal_tolerance_deg {
            return Err(GeometryError::ReversalTurn { turn_angle_deg });
        }

        let corner = previous.to_waypoint().position;
        let inbound_reciprocal = reciprocal(previous_bearing_deg);

        let bisecting = (180.0 - turn_angle_deg) / 2.0;
        let center_to_corner_nm = radius_nm / bisecting.to_radians().sin();
        let tangent_length_nm = radius_nm / bisecting.to_radians().tan();
        if !center_to_corner_nm.is_finite() || !tangent_length_nm.is_finite() {
            return Err(GeometryError::ReversalTurn { turn_angle_deg });
        }
        // Both tangent points must lie on their legs.
        let leg_length_nm = previous.length_nm().min(next.length_nm());
        if tangent_length_nm > leg_length_nm {
            return Err(GeometryError::TurnExceedsLeg {
                turn_angle_deg,
                tangent_length_nm,
                leg_length_nm,
            });
        }

        // The center sits on the bisector, to the inside of the turn.
        let center_bearing = normalize_360(inbound_reciprocal - turn_direction.sign() * bisecting);
        let center = destination(corner, center_bearing, center_to_corner_nm);
        let entry_point = destination(corner, inbound_reciprocal, tangent_length_nm);
        let exit_point = destination(corner, next_bearing_deg, tangent_length_nm);

        Ok(Self {
            previous_leg,
            next_leg,
            radius_nm,
            turn_direction,
            bank_command_deg: config.turn_bank_command_deg,
            previous_bearing_deg,
            turn_angle_deg,
            corner,
            center,
            entry_point,
            exit_point,
        })
    }

    pub fn radius_nm(&self) -> f64 {
        self.radius_nm
    }

    pub fn turn_direction(&self) -> TurnDirection {
        self.turn_direction
    }

    /// Course change across the turn, in (0, 180).
    pub fn turn_angle_deg(&self) -> f64 {
        self.turn_angle_deg
    }

    /// The waypoint shared by both legs.
    pub fn corner(&self) -> Coordinates {
        self.corner
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    /// Tangent point on the previous leg where the arc begins.
    pub fn entry_point(&self) -> Coordinates {
        self.entry_point
    }

    /// Tangent point on the next leg where the arc ends.
    pub fn exit_point(&self) -> Coordinates {
        self.exit_point
    }

    pub fn arc_length_nm(&self) -> f64 {
        2.0 * PI * self.radius_nm / 360.0 * self.turn_angle_deg
    }

    /// Along-arc distance from `position` to the exit tangent point.
    ///
    /// Bearings from the center are rotated so the bisector (center towards
    /// corner) reads 180 deg; the arc then spans 180 +/- half the turn angle.
    pub fn track_distance_to_termination(&self, position: Coordinates) -> f64 {
        let corrective_factor = 180.0 - bearing_deg(self.center, self.corner);
        let half_turn = self.turn_angle_deg / 2.0;
        let min_bearing = 180.0 - half_turn;
        let max_bearing = 180.0 + half_turn;

        let rotated_bearing = normalize_360(bearing_deg(self.center, position) + corrective_factor);
        let limited_bearing = rotated_bearing.clamp(min_bearing, max_bearing);

        let remaining_arc_deg = match self.turn_direction {
            TurnDirection::Clockwise => max_bearing - limited_bearing,
            TurnDirection::Counterclockwise => limited_bearing - min_bearing,
        };

        2.0 * PI * self.radius_nm / 360.0 * remaining_arc_deg
    }
}

impl Guidable for FixedRadiusTransition {
    fn guidance_at(
        &self,
        position: Coordinates,
        true_track_deg: f64,
    ) -> Option<GuidanceParameters> {
        let bearing_from_center = bearing_deg(self.center, position);
        let desired_track =
            normalize_360(bearing_from_center + self.turn_direction.sign() * 90.0);
        let track_angle_error = normalize_180(desired_track - true_track_deg);

        let distance_from_center = distance_nm(self.center, position);
        let cross_track_error = match self.turn_direction {
            TurnDirection::Clockwise => distance_from_center - self.radius_nm,
            TurnDirection::Counterclockwise => self.radius_nm - distance_from_center,
        };

        Some(GuidanceParameters {
            control_law: ControlLaw::LateralPath,
            track_angle_error_deg: track_angle_error,
            cross_track_error_nm: cross_track_error,
            bank_angle_command_deg: self.turn_direction.sign() * self.bank_command_deg,
        })
    }

    fn distance_to_go(&self, position: Coordinates) -> f64 {
        self.track_distance_to_termination(position)
    }

    fn is_abeam(&self, position: Coordinates) -> bool {
        let bearing_from_entry = bearing_deg(self.entry_point, position);
        angle_diff(self.previous_bearing_deg, bearing_from_entry).abs() <= 90.0
    }
}
