//! Straight flight-plan legs.

use crate::error::GeometryError;
use crate::geodesy::{angle_diff, bearing_deg, distance_nm, normalize_180, EARTH_RADIUS_NM};
use crate::guidable::Guidable;
use crate::models::{ControlLaw, Coordinates, GuidanceParameters, Waypoint};

/// Endpoints closer than this are treated as the same point (nm).
const DEGENERATE_LEG_NM: f64 = 1e-9;

/// A path segment between two flight-plan waypoints.
///
/// Waypoints are borrowed from the flight plan for the lifetime of one
/// guidance cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leg<'a> {
    TrackToFix(TrackToFixLeg<'a>),
}

impl<'a> Leg<'a> {
    /// Build a track-to-fix leg.
    pub fn track_to_fix(from: &'a Waypoint, to: &'a Waypoint) -> Result<Self, GeometryError> {
        TrackToFixLeg::new(from, to).map(Leg::TrackToFix)
    }

    /// Initial great-circle course of the leg (degrees).
    pub fn bearing_deg(&self) -> f64 {
        match self {
            Leg::TrackToFix(leg) => leg.bearing_deg(),
        }
    }

    /// Great-circle length of the leg (nm).
    pub fn length_nm(&self) -> f64 {
        match self {
            Leg::TrackToFix(leg) => leg.length_nm(),
        }
    }

    /// Distance flown along the leg's course from its start point (nm),
    /// negative behind the start.
    pub fn along_track_nm(&self, position: Coordinates) -> f64 {
        match self {
            Leg::TrackToFix(leg) => leg.along_track_nm(position),
        }
    }

    /// Whether `position` is level with or beyond the leg's end fix.
    pub fn has_passed_fix(&self, position: Coordinates) -> bool {
        self.along_track_nm(position) >= self.length_nm()
    }

    pub fn from_waypoint(&self) -> &'a Waypoint {
        match self {
            Leg::TrackToFix(leg) => leg.from,
        }
    }

    /// The waypoint the leg terminates at.
    pub fn to_waypoint(&self) -> &'a Waypoint {
        match self {
            Leg::TrackToFix(leg) => leg.to,
        }
    }
}

impl Guidable for Leg<'_> {
    fn guidance_at(
        &self,
        position: Coordinates,
        true_track_deg: f64,
    ) -> Option<GuidanceParameters> {
        match self {
            Leg::TrackToFix(leg) => leg.guidance_at(position, true_track_deg),
        }
    }

    fn distance_to_go(&self, position: Coordinates) -> f64 {
        match self {
            Leg::TrackToFix(leg) => leg.distance_to_go(position),
        }
    }

    fn is_abeam(&self, position: Coordinates) -> bool {
        match self {
            Leg::TrackToFix(leg) => leg.is_abeam(position),
        }
    }
}

/// Great-circle track from one fix directly to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackToFixLeg<'a> {
    pub from: &'a Waypoint,
    pub to: &'a Waypoint,
    bearing_deg: f64,
    length_nm: f64,
}

impl<'a> TrackToFixLeg<'a> {
    /// Returns `DegenerateLeg` when both waypoints share a position, since the
    /// course between them is undefined.
    pub fn new(from: &'a Waypoint, to: &'a Waypoint) -> Result<Self, GeometryError> {
        let length_nm = distance_nm(from.position, to.position);
        if length_nm.is_nan() || length_nm <= DEGENERATE_LEG_NM {
            return Err(GeometryError::DegenerateLeg {
                from: from.ident.clone(),
                to: to.ident.clone(),
            });
        }

        Ok(Self {
            from,
            to,
            bearing_deg: bearing_deg(from.position, to.position),
            length_nm,
        })
    }

    pub fn bearing_deg(&self) -> f64 {
        self.bearing_deg
    }

    pub fn length_nm(&self) -> f64 {
        self.length_nm
    }

    pub fn along_track_nm(&self, position: Coordinates) -> f64 {
        let bearing_ac = bearing_deg(self.from.position, position);
        let relative = angle_diff(self.bearing_deg, bearing_ac);
        distance_nm(self.from.position, position) * relative.to_radians().cos()
    }

    /// Signed distance from the great circle through `from` and `to`,
    /// positive to the right of the course.
    fn offset_from_course_nm(&self, position: Coordinates) -> f64 {
        let bearing_ac = bearing_deg(self.from.position, position);
        let distance_ac = distance_nm(self.from.position, position);

        let angular_distance = distance_ac / EARTH_RADIUS_NM;
        let relative = (bearing_ac - self.bearing_deg).to_radians();
        (angular_distance.sin() * relative.sin())
            .clamp(-1.0, 1.0)
            .asin()
            * EARTH_RADIUS_NM
    }
}

impl Guidable for TrackToFixLeg<'_> {
    fn guidance_at(
        &self,
        position: Coordinates,
        true_track_deg: f64,
    ) -> Option<GuidanceParameters> {
        let desired_track = self.bearing_deg;
        let track_angle_error = normalize_180(desired_track - true_track_deg);

        // Path offsets are not supported; the desired offset is always zero.
        let cross_track_error = 0.0 - self.offset_from_course_nm(position);

        Some(GuidanceParameters {
            control_law: ControlLaw::LateralPath,
            track_angle_error_deg: track_angle_error,
            cross_track_error_nm: cross_track_error,
            bank_angle_command_deg: 0.0,
        })
    }

    fn distance_to_go(&self, position: Coordinates) -> f64 {
        distance_nm(position, self.to.position)
    }

    fn is_abeam(&self, position: Coordinates) -> bool {
        let bearing_ac = bearing_deg(self.from.position, position);
        let heading_ac = angle_diff(self.bearing_deg, bearing_ac).abs();
        if heading_ac > 90.0 {
            // behind the start of the leg
            return false;
        }

        self.along_track_nm(position) <= self.length_nm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::destination;

    fn north_leg_waypoints() -> (Waypoint, Waypoint) {
        (Waypoint::new("SOUTH", 0.0, 0.0), Waypoint::new("NORTH", 1.0, 0.0))
    }

    #[test]
    fn bearing_and_length_are_derived() {
        let (a, b) = north_leg_waypoints();
        let leg = Leg::track_to_fix(&a, &b).unwrap();
        assert!(leg.bearing_deg().abs() < 1e-9);
        assert!((leg.length_nm() - 60.04).abs() < 0.05);
        assert_eq!(leg.to_waypoint().ident, "NORTH");
    }

    #[test]
    fn passes_the_fix_only_beyond_its_end() {
        let (a, b) = north_leg_waypoints();
        let leg = Leg::track_to_fix(&a, &b).unwrap();

        let short = destination(b.position, 180.0, 0.5);
        assert!(!leg.has_passed_fix(short));
        assert!((leg.along_track_nm(short) - (leg.length_nm() - 0.5)).abs() < 1e-3);

        let beyond = destination(b.position, 0.0, 0.5);
        assert!(leg.has_passed_fix(beyond));
        assert!(leg.along_track_nm(destination(a.position, 180.0, 2.0)) < 0.0);
    }

    #[test]
    fn coincident_waypoints_are_rejected() {
        let a = Waypoint::new("A", 10.0, 10.0);
        let b = Waypoint::new("B", 10.0, 10.0);
        let err = Leg::track_to_fix(&a, &b).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateLeg { .. }));
    }

    #[test]
    fn cross_track_error_is_zero_on_course() {
        let a = Waypoint::new("A", 40.0, -100.0);
        let b = Waypoint::new("B", 41.0, -98.0);
        let leg = TrackToFixLeg::new(&a, &b).unwrap();

        for along in [0.5, 10.0, 45.0, 80.0] {
            let on_course = destination(a.position, leg.bearing_deg(), along);
            let params = leg.guidance_at(on_course, leg.bearing_deg()).unwrap();
            assert!(
                params.cross_track_error_nm.abs() < 1e-6,
                "xte at {along} nm was {}",
                params.cross_track_error_nm
            );
        }
    }

    #[test]
    fn cross_track_error_sign_follows_side_of_course() {
        let (a, b) = north_leg_waypoints();
        let leg = TrackToFixLeg::new(&a, &b).unwrap();

        let left = destination(destination(a.position, 0.0, 20.0), 270.0, 2.0);
        let right = destination(destination(a.position, 0.0, 20.0), 90.0, 2.0);

        let left_xte = leg.guidance_at(left, 0.0).unwrap().cross_track_error_nm;
        let right_xte = leg.guidance_at(right, 0.0).unwrap().cross_track_error_nm;
        assert!((left_xte - 2.0).abs() < 1e-3, "left xte {left_xte}");
        assert!((right_xte + 2.0).abs() < 1e-3, "right xte {right_xte}");
    }

    #[test]
    fn track_angle_error_stays_in_half_open_range() {
        let (a, b) = north_leg_waypoints();
        let leg = TrackToFixLeg::new(&a, &b).unwrap();
        let position = destination(a.position, 0.0, 5.0);

        for track in [0.0, 1.0, 90.0, 179.0, 180.0, 181.0, 270.0, 359.0, 360.0, -180.0] {
            let tae = leg.guidance_at(position, track).unwrap().track_angle_error_deg;
            assert!(tae > -180.0 && tae <= 180.0, "track {track} gave {tae}");
        }
        let tae = leg.guidance_at(position, 10.0).unwrap().track_angle_error_deg;
        assert!((tae + 10.0).abs() < 1e-9);
    }

    #[test]
    fn straight_leg_commands_wings_level() {
        let (a, b) = north_leg_waypoints();
        let leg = TrackToFixLeg::new(&a, &b).unwrap();
        let params = leg.guidance_at(a.position, 0.0).unwrap();
        assert_eq!(params.bank_angle_command_deg, 0.0);
        assert_eq!(params.control_law, ControlLaw::LateralPath);
    }

    #[test]
    fn not_abeam_behind_leg_start() {
        let (a, b) = north_leg_waypoints();
        let leg = TrackToFixLeg::new(&a, &b).unwrap();

        let behind = destination(a.position, 180.0, 5.0);
        assert!(!leg.is_abeam(behind));
        let behind_and_aside = destination(a.position, 95.0, 5.0);
        assert!(!leg.is_abeam(behind_and_aside));
    }

    #[test]
    fn abeam_along_segment_but_not_past_its_end() {
        let (a, b) = north_leg_waypoints();
        let leg = TrackToFixLeg::new(&a, &b).unwrap();

        let alongside = destination(destination(a.position, 0.0, 30.0), 90.0, 3.0);
        assert!(leg.is_abeam(alongside));

        let beyond = destination(b.position, 0.0, 5.0);
        assert!(!leg.is_abeam(beyond));
    }

    #[test]
    fn distance_to_go_measures_to_terminating_fix() {
        let (a, b) = north_leg_waypoints();
        let leg = TrackToFixLeg::new(&a, &b).unwrap();
        let position = destination(b.position, 180.0, 12.5);
        assert!((leg.distance_to_go(position) - 12.5).abs() < 1e-6);
    }
}
