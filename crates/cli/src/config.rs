// Command-line configuration for both programs

use clap::Parser;
use migrator_core::AppError;
use migrator_infra_http::{HttpStep, Url};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_METRO_INPUT: &str = "gtp_shoppers.csv";
pub const DEFAULT_METRO_WORKERS: usize = 50;
pub const DEFAULT_SHOPPER_PROFILE_URL: &str = "https://shopper-profile.us-central1.staging.shipt.com";
pub const DEFAULT_METRO_ID: &str = "124";

pub const DEFAULT_VEHICLE_INPUT: &str = "data/houston_active.csv";
pub const DEFAULT_VEHICLE_WORKERS: usize = 3;
pub const DEFAULT_VEHICLE_URL: &str = "https://vehicle.us-central1.staging.shipt.com";
pub const DEFAULT_VEHICLE_ID: &str = "49436";

#[derive(Parser, Debug)]
#[command(name = "switch-metros")]
#[command(about = "Reassign the metro of every shopper listed in a CSV file", long_about = None)]
#[command(version)]
pub struct SwitchMetrosArgs {
    /// CSV file with a header row; the first column holds shopper IDs
    #[arg(short, long, env = "MIGRATOR_INPUT", default_value = DEFAULT_METRO_INPUT)]
    pub input: String,

    /// Number of concurrent workers
    #[arg(short, long, env = "MIGRATOR_WORKERS", default_value_t = DEFAULT_METRO_WORKERS)]
    pub workers: usize,

    /// Shopper profile service base URL
    #[arg(long, env = "MIGRATOR_SHOPPER_PROFILE_URL", default_value = DEFAULT_SHOPPER_PROFILE_URL)]
    pub base_url: String,

    /// Metro ID written to every shopper
    #[arg(long, env = "MIGRATOR_METRO_ID", default_value = DEFAULT_METRO_ID)]
    pub metro_id: String,

    /// Also send the certify request after each metro update
    #[arg(long)]
    pub certify: bool,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "MIGRATOR_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Parser, Debug)]
#[command(name = "assign-vehicles")]
#[command(about = "Assign a vehicle to every driver listed in a CSV file", long_about = None)]
#[command(version)]
pub struct AssignVehiclesArgs {
    /// CSV file with a header row; the first column holds driver IDs
    #[arg(short, long, env = "MIGRATOR_INPUT", default_value = DEFAULT_VEHICLE_INPUT)]
    pub input: String,

    /// Number of concurrent workers
    #[arg(short, long, env = "MIGRATOR_WORKERS", default_value_t = DEFAULT_VEHICLE_WORKERS)]
    pub workers: usize,

    /// Vehicle service base URL
    #[arg(long, env = "MIGRATOR_VEHICLE_URL", default_value = DEFAULT_VEHICLE_URL)]
    pub base_url: String,

    /// Vehicle every driver is assigned to
    #[arg(long, env = "MIGRATOR_VEHICLE_ID", default_value = DEFAULT_VEHICLE_ID)]
    pub vehicle_id: String,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(long, env = "MIGRATOR_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub workers: usize,
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub strip_escaped_quotes: bool,
    pub steps: Vec<HttpStep>,
}

impl TryFrom<SwitchMetrosArgs> for RunConfig {
    type Error = AppError;

    fn try_from(args: SwitchMetrosArgs) -> Result<Self, Self::Error> {
        let mut steps = vec![HttpStep::metro_update(args.metro_id)];
        if args.certify {
            steps.push(HttpStep::certify());
        }
        Ok(Self {
            input: expand_input(&args.input),
            workers: validate_workers(args.workers)?,
            base_url: parse_base_url(&args.base_url)?,
            timeout: parse_timeout(args.timeout_secs)?,
            strip_escaped_quotes: false,
            steps,
        })
    }
}

impl TryFrom<AssignVehiclesArgs> for RunConfig {
    type Error = AppError;

    fn try_from(args: AssignVehiclesArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            input: expand_input(&args.input),
            workers: validate_workers(args.workers)?,
            base_url: parse_base_url(&args.base_url)?,
            timeout: parse_timeout(args.timeout_secs)?,
            strip_escaped_quotes: true,
            steps: vec![HttpStep::vehicle_assign(&args.vehicle_id)],
        })
    }
}

fn expand_input(input: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(input).into_owned())
}

fn validate_workers(workers: usize) -> Result<usize, AppError> {
    if workers == 0 {
        return Err(AppError::Config("--workers must be at least 1".to_string()));
    }
    Ok(workers)
}

fn parse_base_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::Config(format!("invalid base URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Config(format!(
            "base URL must use http or https, got '{}'",
            other
        ))),
    }
}

fn parse_timeout(timeout_secs: Option<u64>) -> Result<Option<Duration>, AppError> {
    match timeout_secs {
        Some(0) => Err(AppError::Config(
            "--timeout-secs must be greater than 0".to_string(),
        )),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(config: &RunConfig) -> Vec<&'static str> {
        config.steps.iter().map(|s| s.label()).collect()
    }

    #[test]
    fn test_switch_metros_defaults() {
        let args = SwitchMetrosArgs::try_parse_from(["switch-metros"]).unwrap();
        let config = RunConfig::try_from(args).unwrap();

        assert_eq!(config.workers, DEFAULT_METRO_WORKERS);
        assert_eq!(config.input, PathBuf::from(DEFAULT_METRO_INPUT));
        assert_eq!(config.base_url.host_str(), Some("shopper-profile.us-central1.staging.shipt.com"));
        assert_eq!(config.timeout, None);
        assert!(!config.strip_escaped_quotes);
        assert_eq!(labels(&config), vec!["metro_update"]);
    }

    #[test]
    fn test_certify_is_opt_in() {
        let args = SwitchMetrosArgs::try_parse_from(["switch-metros", "--certify"]).unwrap();
        let config = RunConfig::try_from(args).unwrap();
        assert_eq!(labels(&config), vec!["metro_update", "certify"]);
    }

    #[test]
    fn test_assign_vehicles_defaults() {
        let args = AssignVehiclesArgs::try_parse_from(["assign-vehicles"]).unwrap();
        let config = RunConfig::try_from(args).unwrap();

        assert_eq!(config.workers, DEFAULT_VEHICLE_WORKERS);
        assert_eq!(config.input, PathBuf::from(DEFAULT_VEHICLE_INPUT));
        assert!(config.strip_escaped_quotes);
        assert_eq!(labels(&config), vec!["vehicle_assign"]);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let args =
            AssignVehiclesArgs::try_parse_from(["assign-vehicles", "--workers", "0"]).unwrap();
        let err = RunConfig::try_from(args).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let args =
            SwitchMetrosArgs::try_parse_from(["switch-metros", "--base-url", "not a url"]).unwrap();
        assert!(matches!(RunConfig::try_from(args), Err(AppError::Config(_))));

        let args =
            SwitchMetrosArgs::try_parse_from(["switch-metros", "--base-url", "ftp://host"]).unwrap();
        let err = RunConfig::try_from(args).unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_timeout_parsing() {
        let args =
            SwitchMetrosArgs::try_parse_from(["switch-metros", "--timeout-secs", "15"]).unwrap();
        let config = RunConfig::try_from(args).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));

        let args =
            SwitchMetrosArgs::try_parse_from(["switch-metros", "--timeout-secs", "0"]).unwrap();
        assert!(RunConfig::try_from(args).is_err());
    }

    #[test]
    fn test_input_tilde_is_expanded() {
        let args =
            SwitchMetrosArgs::try_parse_from(["switch-metros", "--input", "~/ids.csv"]).unwrap();
        let config = RunConfig::try_from(args).unwrap();
        assert!(!config.input.to_string_lossy().starts_with('~'));
        assert!(config.input.ends_with("ids.csv"));
    }
}
