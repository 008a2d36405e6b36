//! CLI tool to fly a simulated aircraft along a flight plan using LNAV guidance.
//!
//! Runs either a canned scenario or a JSON flight plan and prints one line
//! per guidance cycle.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use lnav_cli::sim::{Scenario, SimSample, Simulation, SCENARIO_NAMES};
use lnav_cli::{init_tracing, load_flight_plan, load_guidance_config, CliConfig};
use lnav_core::{Coordinates, LnavMode};

/// Fly a simulated aircraft along a flight plan
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Canned scenario name (dogleg, box)
    #[arg(long, default_value = "dogleg")]
    scenario: String,

    /// JSON flight plan; overrides --scenario
    #[arg(long)]
    plan: Option<PathBuf>,

    /// JSON guidance config; overrides LNAV_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scenario origin latitude
    #[arg(long, default_value_t = 47.4502, allow_hyphen_values = true)]
    lat: f64,

    /// Scenario origin longitude
    #[arg(long, default_value_t = -122.3088, allow_hyphen_values = true)]
    lon: f64,

    /// True airspeed in knots
    #[arg(long, default_value_t = 250.0)]
    tas: f64,

    /// Simulated duration in seconds
    #[arg(long, default_value_t = 900.0)]
    duration: f64,

    /// Simulation time step in seconds
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Pace cycles in wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Print every n-th cycle
    #[arg(long, default_value_t = 10)]
    every: usize,

    /// Emit JSON lines instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cli_config = CliConfig::from_env().with_config_path(args.config.clone());
    init_tracing(&cli_config.log_directive)?;

    if args.dt <= 0.0 {
        bail!("--dt must be positive");
    }

    let config = load_guidance_config(cli_config.guidance_config_path.as_deref())?;
    let origin = Coordinates::new(args.lat, args.lon);
    let scenario = match &args.plan {
        Some(path) => Scenario::from_plan("file", load_flight_plan(path)?, args.tas),
        None => match Scenario::by_name(&args.scenario, origin, args.tas) {
            Some(scenario) => scenario,
            None => bail!(
                "unknown scenario '{}', expected one of {:?}",
                args.scenario,
                SCENARIO_NAMES
            ),
        },
    };

    tracing::info!(
        "Flying '{}' with {} waypoints at {} kts",
        scenario.name,
        scenario.plan.waypoints.len(),
        args.tas
    );

    let mut sim = Simulation::new(scenario, config, args.dt);
    let every = args.every.max(1);
    let mut cycle = 0usize;
    let mut print = |sample: &SimSample| {
        if sample.output.sequenced || cycle % every == 0 {
            print_sample(sample, args.json);
        }
        cycle += 1;
    };

    if args.realtime {
        sim.run_paced(args.duration, Duration::from_secs_f64(args.dt), &mut print)
            .await;
    } else {
        while sim.elapsed_s() < args.duration {
            let sample = sim.step();
            print(&sample);
        }
    }

    println!(
        "\nSimulation complete after {:.0}s, active waypoint {}",
        sim.elapsed_s(),
        sim.plan().active_index
    );
    Ok(())
}

fn print_sample(sample: &SimSample, json: bool) {
    if json {
        match serde_json::to_string(sample) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("Failed to serialize sample: {err}"),
        }
        return;
    }

    let out = &sample.output;
    let target = out.active_waypoint.as_deref().unwrap_or("-");
    match (out.mode, out.guidance) {
        (LnavMode::Engaged, Some(g)) => println!(
            "[{:6.0}s] ({:.5}, {:.5}) trk {:5.1} bank {:5.1} -> {:<6} dtg {:6.2} xte {:+6.3} tae {:+6.1} phi {:+5.1}{}{}",
            sample.elapsed_s,
            sample.state.position.lat,
            sample.state.position.lon,
            sample.state.true_track_deg,
            sample.bank_deg,
            target,
            out.distance_to_go_nm.unwrap_or(0.0),
            g.cross_track_error_nm,
            g.track_angle_error_deg,
            g.bank_angle_command_deg,
            if out.in_turn { " TURN" } else { "" },
            if out.sequenced { " SEQ" } else { "" },
        ),
        _ => println!(
            "[{:6.0}s] LNAV disengaged{}",
            sample.elapsed_s,
            out.fault
                .as_deref()
                .map(|fault| format!(": {fault}"))
                .unwrap_or_default()
        ),
    }
}
