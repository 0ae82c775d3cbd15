use activity_helper::config::Config;
use activity_helper::error::ConfigError;
use activity_helper::report::DateKey;
use activity_helper::ReportAggregator;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

/// Command-line arguments for the activity helper
#[derive(Parser)]
#[command(
    name = "activity-helper",
    about = "Gather a day's notes and commits as one JSON document",
    long_about = "Scans the workspace for markdown learnings, retrospectives and drafts whose \
                  names contain the date, queries git for that day's commits, and prints the \
                  combined report as a single line of JSON on standard output."
)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Day to collect instead of today
    #[arg(
        short,
        long,
        value_name = "YYYY-MM-DD",
        help = "Collect for this date instead of today (local time)"
    )]
    date: Option<DateKey>,

    /// Pretty-print the report
    #[arg(long, help = "Print indented multi-line JSON instead of a single line")]
    pretty: bool,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,
}

impl Cli {
    /// Validate the CLI arguments
    ///
    /// Missing config files are allowed and fall back to defaults; a path that
    /// exists but is not a file is rejected.
    fn validate(&self) -> Result<(), String> {
        if let Some(ref config_path) = self.config {
            if config_path.exists() && !config_path.is_file() {
                return Err(format!(
                    "Configuration path is not a file: {}",
                    config_path.display()
                ));
            }
        }
        Ok(())
    }

    /// The date to collect, today unless overridden
    fn date_key(&self) -> DateKey {
        self.date.unwrap_or_else(DateKey::today)
    }
}

/// Load configuration, falling back to defaults when the file is missing or invalid
fn load_config(config_path: Option<&PathBuf>) -> Result<Config, ConfigError> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            match Config::from_file(path) {
                Ok(config) => Ok(config),
                Err(ConfigError::ReadError(_)) => {
                    warn!(
                        "Configuration file '{}' not found or unreadable, using defaults",
                        path.display()
                    );
                    Ok(Config::default())
                }
                Err(e) => {
                    error!("Configuration error in '{}': {}", path.display(), e);
                    warn!("Using default configuration due to invalid config file");
                    Ok(Config::default())
                }
            }
        }
        None => {
            info!("Using default configuration");
            Ok(Config::default())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let date = cli.date_key();
    info!("Collecting activity for {}", date);

    let report = ReportAggregator::from_config(&config).build(&date);
    let rendered = if cli.pretty {
        report.to_json_pretty()
    } else {
        report.to_json()
    };

    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}
