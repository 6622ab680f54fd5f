//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use stay_contract::Suite;

/// Scenario suite selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SuiteArg {
    /// `/properties` scenarios
    Property,
    /// `/bookings` scenarios
    Booking,
}

impl From<SuiteArg> for Suite {
    fn from(arg: SuiteArg) -> Self {
        match arg {
            SuiteArg::Property => Suite::Property,
            SuiteArg::Booking => Suite::Booking,
        }
    }
}

/// Booking API contract scenario runner
#[derive(Parser, Debug)]
#[command(name = "stay-check", about = "Run booking API contract scenarios", version)]
pub struct Args {
    /// Suite to run (runs all suites if omitted)
    #[arg(short, long, value_enum)]
    pub suite: Option<SuiteArg>,

    /// Tags to filter scenarios (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub name: Option<String>,

    /// List matching scenarios instead of running them
    #[arg(long)]
    pub list: bool,

    /// Environment name, selects appsettings-<env>.properties
    #[arg(long = "env", env = "APP_ENV", default_value = "qa")]
    pub environment: String,

    /// Directory containing the settings files
    #[arg(long, default_value = ".")]
    pub settings_dir: PathBuf,

    /// API base URL (overrides API_BASE_URI)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Admin username (overrides ADMIN_USERNAME)
    #[arg(long)]
    pub admin_username: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Append log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Console log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Quiet mode - one line per scenario, no summary
    #[arg(short, long)]
    pub quiet: bool,
}
