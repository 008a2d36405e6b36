//! LNAV CLI - Command line tools for exercising lateral guidance.
//!
//! This crate provides the binaries:
//! - fly_plan: closed-loop simulation of a scenario or JSON flight plan
//! - probe_guidance: one-shot guidance evaluation at a given position

pub mod config;
pub mod sim;

pub use config::{init_tracing, load_flight_plan, load_guidance_config, CliConfig};
