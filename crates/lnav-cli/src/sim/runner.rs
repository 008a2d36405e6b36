//! Closed-loop simulation: guidance, autopilot and aircraft stepped together.

use std::time::Duration;

use lnav_core::{AircraftState, FlightPlan, GuidanceConfig, LateralGuidance, LnavOutput};
use serde::Serialize;
use tokio::time;

use super::aircraft::SimulatedAircraft;
use super::autopilot::LateralAutopilot;
use super::scenarios::Scenario;

/// One simulated guidance cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SimSample {
    pub elapsed_s: f64,
    pub state: AircraftState,
    pub bank_deg: f64,
    pub output: LnavOutput,
}

pub struct Simulation {
    lnav: LateralGuidance<FlightPlan>,
    aircraft: SimulatedAircraft,
    autopilot: LateralAutopilot,
    dt_s: f64,
    elapsed_s: f64,
}

impl Simulation {
    pub fn new(scenario: Scenario, config: GuidanceConfig, dt_s: f64) -> Self {
        let initial = scenario.initial_state;
        Self {
            lnav: LateralGuidance::new(scenario.plan, config),
            aircraft: SimulatedAircraft::new(
                initial.position,
                initial.true_track_deg,
                initial.true_airspeed_kts,
            ),
            autopilot: LateralAutopilot::default(),
            dt_s,
            elapsed_s: 0.0,
        }
    }

    pub fn with_autopilot(mut self, autopilot: LateralAutopilot) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn plan(&self) -> &FlightPlan {
        self.lnav.plan()
    }

    /// Run one guidance cycle and advance the aircraft by one time step.
    ///
    /// With guidance disengaged the aircraft rolls wings level.
    pub fn step(&mut self) -> SimSample {
        let state = self.aircraft.state();
        let output = self.lnav.update(&state);

        let bank_demand = output
            .guidance
            .as_ref()
            .map(|guidance| self.autopilot.bank_demand(guidance))
            .unwrap_or(0.0);

        let sample = SimSample {
            elapsed_s: self.elapsed_s,
            state,
            bank_deg: self.aircraft.bank_deg,
            output,
        };

        self.aircraft.step(bank_demand, self.dt_s, self.lnav.config());
        self.elapsed_s += self.dt_s;
        sample
    }

    /// Step until `duration_s` of simulated time has passed.
    pub fn run_for(&mut self, duration_s: f64) -> Vec<SimSample> {
        let mut samples = Vec::new();
        while self.elapsed_s < duration_s {
            samples.push(self.step());
        }
        samples
    }

    /// Step in wall-clock time, one cycle per `period`.
    pub async fn run_paced<F>(&mut self, duration_s: f64, period: Duration, mut on_sample: F)
    where
        F: FnMut(&SimSample),
    {
        let mut interval = time::interval(period);
        while self.elapsed_s < duration_s {
            interval.tick().await;
            let sample = self.step();
            on_sample(&sample);
        }
    }
}
