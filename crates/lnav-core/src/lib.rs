pub mod error;
pub mod flight_plan;
pub mod geodesy;
pub mod geometry;
pub mod guidable;
pub mod guidance;
pub mod leg;
pub mod models;
pub mod planner;
pub mod rules;
pub mod transition;

pub use error::GeometryError;
pub use flight_plan::{FlightPlan, Sequencer, WaypointSource};
pub use geometry::Geometry;
pub use guidable::Guidable;
pub use guidance::{LateralGuidance, LnavMode, LnavOutput};
pub use leg::{Leg, TrackToFixLeg};
pub use models::{
    AircraftState, ControlLaw, Coordinates, GuidanceParameters, TurnDirection, Waypoint,
};
pub use planner::{nominal_bank_angle, plan_transitions, turn_direction, turn_radius_nm};
pub use rules::GuidanceConfig;
pub use transition::{FixedRadiusTransition, LegIndex, Transition, TransitionKind};
