//! CLI tool to evaluate LNAV guidance for a single aircraft state.
//!
//! Builds the path geometry around the active waypoint of a flight plan and
//! prints guidance, distance to go and the sequencing decision as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lnav_cli::{init_tracing, load_flight_plan, load_guidance_config, CliConfig};
use lnav_core::{Coordinates, Geometry, Guidable, Transition};
use serde_json::json;

/// Evaluate guidance at one position against a flight plan
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON flight plan
    #[arg(long)]
    plan: PathBuf,

    /// JSON guidance config; overrides LNAV_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the plan's active waypoint index
    #[arg(long)]
    active_index: Option<usize>,

    /// Aircraft latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Aircraft longitude
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// True track in degrees
    #[arg(long, default_value_t = 0.0)]
    track: f64,

    /// True airspeed in knots
    #[arg(long, default_value_t = 250.0)]
    tas: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let cli_config = CliConfig::from_env().with_config_path(args.config.clone());
    init_tracing(&cli_config.log_directive)?;

    let config = load_guidance_config(cli_config.guidance_config_path.as_deref())?;
    let mut plan = load_flight_plan(&args.plan)?;
    if let Some(index) = args.active_index {
        plan.active_index = index;
    }

    let position = Coordinates::new(args.lat, args.lon);
    let geometry = Geometry::from_flight_plan(&plan, args.tas, &config)
        .context("building path geometry")?;

    let Some(geometry) = geometry else {
        println!("{}", json!({ "mode": "disengaged", "active_index": plan.active_index }));
        return Ok(());
    };

    let transitions: Vec<_> = geometry
        .transitions()
        .iter()
        .map(|transition| match transition {
            Transition::FixedRadius(turn) => json!({
                "kind": transition.kind(),
                "direction": turn.turn_direction(),
                "radius_nm": turn.radius_nm(),
                "turn_angle_deg": turn.turn_angle_deg(),
                "center": turn.center(),
                "entry_point": turn.entry_point(),
                "exit_point": turn.exit_point(),
                "abeam": transition.is_abeam(position),
                "track_distance_to_termination_nm":
                    transition.track_distance_to_termination(position),
            }),
        })
        .collect();

    let report = json!({
        "mode": "engaged",
        "active_index": plan.active_index,
        "active_leg": {
            "from": geometry.active_leg().from_waypoint().ident,
            "to": geometry.active_leg().to_waypoint().ident,
            "bearing_deg": geometry.active_leg().bearing_deg(),
            "length_nm": geometry.active_leg().length_nm(),
            "abeam": geometry.active_leg().is_abeam(position),
        },
        "next_leg": geometry.next_leg().map(|leg| json!({
            "from": leg.from_waypoint().ident,
            "to": leg.to_waypoint().ident,
            "bearing_deg": leg.bearing_deg(),
        })),
        "transitions": transitions,
        "guidance": geometry.guidance_at(position, args.track),
        "distance_to_go_nm": geometry.distance_to_go(position),
        "should_sequence_leg": geometry.should_sequence_leg(position),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
