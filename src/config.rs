// src/config.rs

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::dashboard::{SLIDER_DEFAULT, SLIDER_MAX, SLIDER_MIN};
use crate::error::DashboardError;

const APP_DIR: &str = "sample-dashboard";
const DEFAULT_TICK_RATE_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive random sample data dashboard", long_about = None)]
/// Command-line arguments
pub struct Args {
    /// Initial slider value (number of rows)
    #[arg(long, value_name = "N", default_value_t = SLIDER_DEFAULT)]
    pub rows: usize,

    /// Seed for reproducible random data
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Event poll interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TICK_RATE_MS)]
    pub tick_rate: u64,

    /// Directory for log files
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub initial_rows: usize,
    pub seed: Option<u64>,
    pub tick_rate: Duration,
    pub log_dir: PathBuf,
}

impl DashboardConfig {
    pub fn from_args(args: Args) -> Result<Self, DashboardError> {
        if !(SLIDER_MIN..=SLIDER_MAX).contains(&args.rows) {
            return Err(DashboardError::InvalidRowCount { value: args.rows });
        }
        if args.tick_rate == 0 {
            return Err(DashboardError::InvalidTickRate);
        }
        Ok(DashboardConfig {
            initial_rows: args.rows,
            seed: args.seed,
            tick_rate: Duration::from_millis(args.tick_rate),
            log_dir: args.log_dir.unwrap_or_else(default_log_dir),
        })
    }
}

pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sample-dashboard").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_args(parse(&[])).unwrap();
        assert_eq!(config.initial_rows, 50);
        assert_eq!(config.seed, None);
        assert_eq!(config.tick_rate, Duration::from_millis(100));
        assert!(config.log_dir.ends_with("sample-dashboard/logs"));
    }

    #[test]
    fn test_explicit_values() {
        let config = DashboardConfig::from_args(parse(&[
            "--rows", "100", "--seed", "7", "--tick-rate", "250", "--log-dir", "/tmp/dash",
        ]))
        .unwrap();
        assert_eq!(config.initial_rows, 100);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tick_rate, Duration::from_millis(250));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/dash"));
    }

    #[test]
    fn test_rows_above_slider_max_rejected() {
        let err = DashboardConfig::from_args(parse(&["--rows", "101"])).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRowCount { value: 101 }));
    }

    #[test]
    fn test_zero_rows_accepted() {
        let config = DashboardConfig::from_args(parse(&["--rows", "0"])).unwrap();
        assert_eq!(config.initial_rows, 0);
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let err = DashboardConfig::from_args(parse(&["--tick-rate", "0"])).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidTickRate));
    }

    #[test]
    fn test_negative_rows_fail_to_parse() {
        let argv = ["sample-dashboard", "--rows", "-3"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
