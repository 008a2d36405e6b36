//! Turn sizing and transition planning between consecutive legs.

use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::geodesy::{angle_diff, normalize_360};
use crate::leg::Leg;
use crate::models::TurnDirection;
use crate::rules::GuidanceConfig;
use crate::transition::{FixedRadiusTransition, LegIndex, Transition, TransitionKind};

/// Bank angle the turn is sized for at `kts` true airspeed.
///
/// Blends from the low-speed bank up to nominal below the low-speed limit,
/// and from nominal down to the high-speed bank across the high-speed band.
pub fn nominal_bank_angle(kts: f64, config: &GuidanceConfig) -> f64 {
    if kts < config.low_speed_limit_kts {
        let ratio = (kts / config.low_speed_limit_kts).clamp(0.0, 1.0);
        config.low_speed_bank_deg + ratio * (config.nominal_bank_deg - config.low_speed_bank_deg)
    } else if kts > config.high_speed_start_kts {
        let band = config.high_speed_end_kts - config.high_speed_start_kts;
        let ratio = ((kts - config.high_speed_start_kts) / band).clamp(0.0, 1.0);
        config.nominal_bank_deg - ratio * (config.nominal_bank_deg - config.high_speed_bank_deg)
    } else {
        config.nominal_bank_deg
    }
}

/// Rate of a coordinated turn in degrees per second.
pub fn turn_rate_deg_per_sec(kts: f64, bank_angle_deg: f64, config: &GuidanceConfig) -> f64 {
    config.turn_rate_constant * bank_angle_deg.to_radians().tan() / kts
}

/// Radius of the turn flown at `kts` (raised to the planning minimum) with
/// the scheduled bank angle, in nautical miles.
pub fn turn_radius_nm(kts: f64, config: &GuidanceConfig) -> f64 {
    let kts = kts.max(config.min_planning_speed_kts);
    let bank_angle = nominal_bank_angle(kts, config);
    let deg_per_sec = turn_rate_deg_per_sec(kts, bank_angle, config);
    let nm_per_sec = kts / 3600.0;
    nm_per_sec / (deg_per_sec * PI / 180.0)
}

/// Shorter way round from the active leg's course onto the next leg's.
pub fn turn_direction(active_bearing_deg: f64, next_bearing_deg: f64) -> TurnDirection {
    let delta = normalize_360(next_bearing_deg - active_bearing_deg + 180.0) - 180.0;
    if delta >= 0.0 {
        TurnDirection::Clockwise
    } else {
        TurnDirection::Counterclockwise
    }
}

/// Build one transition of the requested kind from `legs[previous_leg]`
/// onto the leg after it.
pub fn build_transition(
    kind: TransitionKind,
    legs: &[Leg<'_>],
    previous_leg: LegIndex,
    true_airspeed_kts: f64,
    config: &GuidanceConfig,
) -> Result<Transition, GeometryError> {
    match kind {
        TransitionKind::FixedRadius => {
            let previous = legs
                .get(previous_leg)
                .ok_or(GeometryError::LegOutOfRange { index: previous_leg })?;
            let next = legs
                .get(previous_leg + 1)
                .ok_or(GeometryError::LegOutOfRange { index: previous_leg + 1 })?;

            let radius = turn_radius_nm(true_airspeed_kts, config);
            let direction = turn_direction(previous.bearing_deg(), next.bearing_deg());
            FixedRadiusTransition::new(legs, previous_leg, radius, direction, config)
                .map(Transition::FixedRadius)
        }
        TransitionKind::SmoothOntoLeg => {
            Err(GeometryError::UnsupportedTransition("smooth onto-leg"))
        }
    }
}

/// Plan the turns joining `legs` in traversal order.
///
/// Emits one fixed-radius transition per consecutive pair of legs, except
/// where the legs are collinear and no turn is needed.
pub fn plan_transitions(
    legs: &[Leg<'_>],
    true_airspeed_kts: f64,
    config: &GuidanceConfig,
) -> Result<Vec<Transition>, GeometryError> {
    let mut transitions = Vec::new();

    for (index, pair) in legs.windows(2).enumerate() {
        let turn_angle = angle_diff(pair[0].bearing_deg(), pair[1].bearing_deg()).abs();
        if turn_angle <= config.collinear_tolerance_deg {
            tracing::trace!(
                "Legs {} and {} are collinear, no transition",
                index,
                index + 1
            );
            continue;
        }

        transitions.push(build_transition(
            TransitionKind::FixedRadius,
            legs,
            index,
            true_airspeed_kts,
            config,
        )?);
    }

    Ok(transitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;

    #[test]
    fn bank_schedule_breakpoints() {
        let config = GuidanceConfig::default();
        assert!((nominal_bank_angle(150.0, &config) - 25.0).abs() < 1e-9);
        assert!((nominal_bank_angle(75.0, &config) - 20.0).abs() < 1e-9);
        assert!((nominal_bank_angle(0.0, &config) - 15.0).abs() < 1e-9);
        assert!((nominal_bank_angle(250.0, &config) - 25.0).abs() < 1e-9);
        assert!((nominal_bank_angle(300.0, &config) - 25.0).abs() < 1e-9);
        assert!((nominal_bank_angle(375.0, &config) - 22.0).abs() < 1e-9);
        assert!((nominal_bank_angle(450.0, &config) - 19.0).abs() < 1e-9);
        assert!((nominal_bank_angle(600.0, &config) - 19.0).abs() < 1e-9);
    }

    #[test]
    fn radius_at_nominal_bank() {
        let config = GuidanceConfig::default();
        // 1091 * tan(25) / 150 deg/s at 150/3600 nm/s
        let deg_per_sec = 1091.0 * 25.0_f64.to_radians().tan() / 150.0;
        let expected = (150.0 / 3600.0) / deg_per_sec.to_radians();
        let radius = turn_radius_nm(150.0, &config);
        assert!((radius - expected).abs() < 1e-12);
        assert!((radius - 0.704).abs() < 0.001, "radius {radius}");
    }

    #[test]
    fn slow_speeds_are_planned_at_the_minimum() {
        let config = GuidanceConfig::default();
        assert_eq!(turn_radius_nm(60.0, &config), turn_radius_nm(150.0, &config));
    }

    #[test]
    fn radius_grows_with_speed() {
        let config = GuidanceConfig::default();
        let slow = turn_radius_nm(200.0, &config);
        let fast = turn_radius_nm(420.0, &config);
        assert!(fast > slow);
        assert!(turn_radius_nm(400.0, &config) > 0.0);
    }

    #[test]
    fn turn_direction_picks_the_short_way() {
        assert_eq!(turn_direction(0.0, 90.0), TurnDirection::Clockwise);
        assert_eq!(turn_direction(0.0, 270.0), TurnDirection::Counterclockwise);
        assert_eq!(turn_direction(350.0, 10.0), TurnDirection::Clockwise);
        assert_eq!(turn_direction(10.0, 350.0), TurnDirection::Counterclockwise);
    }

    #[test]
    fn plans_one_turn_per_corner() {
        let wps = [
            Waypoint::new("A", -0.5, 0.0),
            Waypoint::new("B", 0.0, 0.0),
            Waypoint::new("C", 0.0, 0.5),
        ];
        let legs = [
            Leg::track_to_fix(&wps[0], &wps[1]).unwrap(),
            Leg::track_to_fix(&wps[1], &wps[2]).unwrap(),
        ];
        let config = GuidanceConfig::default();
        let transitions = plan_transitions(&legs, 250.0, &config).unwrap();
        assert_eq!(transitions.len(), 1);

        let Transition::FixedRadius(turn) = &transitions[0];
        assert_eq!(turn.turn_direction(), TurnDirection::Clockwise);
        assert!((turn.radius_nm() - turn_radius_nm(250.0, &config)).abs() < 1e-12);
        assert_eq!(transitions[0].previous_leg(), 0);
        assert_eq!(transitions[0].next_leg(), 1);
    }

    #[test]
    fn single_leg_has_no_transitions() {
        let wps = [Waypoint::new("A", 0.0, 0.0), Waypoint::new("B", 1.0, 0.0)];
        let legs = [Leg::track_to_fix(&wps[0], &wps[1]).unwrap()];
        let transitions = plan_transitions(&legs, 250.0, &GuidanceConfig::default()).unwrap();
        assert!(transitions.is_empty());
    }

    #[test]
    fn collinear_legs_need_no_transition() {
        let wps = [
            Waypoint::new("A", -0.5, 0.0),
            Waypoint::new("B", 0.0, 0.0),
            Waypoint::new("C", 0.5, 0.0),
        ];
        let legs = [
            Leg::track_to_fix(&wps[0], &wps[1]).unwrap(),
            Leg::track_to_fix(&wps[1], &wps[2]).unwrap(),
        ];
        let transitions = plan_transitions(&legs, 250.0, &GuidanceConfig::default()).unwrap();
        assert!(transitions.is_empty());
    }

    #[test]
    fn smooth_transition_is_refused() {
        let wps = [
            Waypoint::new("A", -0.5, 0.0),
            Waypoint::new("B", 0.0, 0.0),
            Waypoint::new("C", 0.0, 0.5),
        ];
        let legs = [
            Leg::track_to_fix(&wps[0], &wps[1]).unwrap(),
            Leg::track_to_fix(&wps[1], &wps[2]).unwrap(),
        ];
        let err = build_transition(
            TransitionKind::SmoothOntoLeg,
            &legs,
            0,
            250.0,
            &GuidanceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::UnsupportedTransition(_)));
    }
}
