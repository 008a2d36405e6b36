//! Closed-loop simulation of an aircraft flying LNAV guidance.
//!
//! Provides a kinematic aircraft, a simple lateral autopilot, canned
//! scenarios and a runner stepping them together.

mod aircraft;
mod autopilot;
mod runner;
mod scenarios;

pub use aircraft::SimulatedAircraft;
pub use autopilot::LateralAutopilot;
pub use runner::{SimSample, Simulation};
pub use scenarios::{create_box_scenario, create_dogleg_scenario, Scenario, SCENARIO_NAMES};
