//! Command-line interface components.

use crate::config::{OutputFormat, UptimeConfig};
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::error::{Result, UptimeError};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "charger-uptime")]
#[command(about = "Compute station uptime from charger availability reports")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the availability report file
    #[arg(value_name = "FILE")]
    pub input_path: PathBuf,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Decimal places for text output (default: truncate to a whole percentage)
    #[arg(long, value_name = "N")]
    pub precision: Option<u32>,

    /// Keep each charger's reports in input order instead of sorting by start time
    #[arg(long)]
    pub no_sort: bool,

    /// Skip stations without reports instead of failing
    #[arg(long)]
    pub skip_unreported: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the uptime summary
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Build the processing configuration from command-line flags
    pub fn to_config(&self) -> Result<UptimeConfig> {
        let mut config = UptimeConfig::default().with_output_format(self.format);
        if self.no_sort {
            config = config.without_sorting();
        }
        if self.skip_unreported {
            config = config.with_skip_unreported();
        }
        if self.quiet {
            config = config.quiet();
        }
        if let Some(precision) = self.precision {
            config = config.with_precision(precision);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            DEFAULT_LOG_LEVEL
        }
    }
}

/// Set up structured logging to stderr; `RUST_LOG` takes precedence over flags
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("charger_uptime={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| UptimeError::configuration(format!("failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
