//! CLI configuration from environment and files.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lnav_core::{FlightPlan, GuidanceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JSON file overriding guidance defaults
    pub guidance_config_path: Option<PathBuf>,
    /// Directive applied on top of `RUST_LOG`
    pub log_directive: String,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self {
            guidance_config_path: env::var("LNAV_CONFIG").ok().map(PathBuf::from),
            log_directive: env::var("LNAV_LOG").unwrap_or_else(|_| "lnav_core=info".to_string()),
        }
    }

    /// A path given on the command line wins over the environment.
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.guidance_config_path = path;
        }
        self
    }
}

/// Install the fmt subscriber with `RUST_LOG` plus `directive`.
pub fn init_tracing(directive: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?))
        .try_init()?;
    Ok(())
}

/// Load guidance config from `path`, or defaults when there is none.
pub fn load_guidance_config(path: Option<&Path>) -> Result<GuidanceConfig> {
    let Some(path) = path else {
        return Ok(GuidanceConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading guidance config {}", path.display()))?;
    GuidanceConfig::from_json_str(&text)
        .with_context(|| format!("parsing guidance config {}", path.display()))
}

pub fn load_flight_plan(path: &Path) -> Result<FlightPlan> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading flight plan {}", path.display()))?;
    FlightPlan::from_json_str(&text)
        .with_context(|| format!("parsing flight plan {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_gives_defaults() {
        let config = load_guidance_config(None).unwrap();
        assert_eq!(config, GuidanceConfig::default());
    }

    #[test]
    fn reads_partial_config_file() {
        let path = env::temp_dir().join(format!("lnav-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"turn_bank_command_deg": 20.0}"#).unwrap();
        let config = load_guidance_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.turn_bank_command_deg, 20.0);
        assert_eq!(config.nominal_bank_deg, 25.0);
    }

    #[test]
    fn missing_plan_file_names_the_path() {
        let err = load_flight_plan(Path::new("/nonexistent/plan.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/plan.json"));
    }

    #[test]
    fn explicit_config_path_overrides_env() {
        let config = CliConfig {
            guidance_config_path: Some(PathBuf::from("env.json")),
            log_directive: "lnav_core=info".to_string(),
        }
        .with_config_path(Some(PathBuf::from("cli.json")));
        assert_eq!(config.guidance_config_path, Some(PathBuf::from("cli.json")));
    }
}
