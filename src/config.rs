//! Configuration management and validation.
//!
//! Provides the processing options shared by the engine and the CLI:
//! report ordering policy, handling of stations without reports, and
//! summary output settings.

use crate::constants::MAX_PRECISION;
use crate::error::{Result, UptimeError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// One `<stationId> <uptime>` line per station
    #[default]
    Text,
    /// Pretty-printed JSON array of station results
    Json,
}

/// Main configuration for uptime processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UptimeConfig {
    /// Sort each charger's reports by start time before the sweep
    pub sort_reports: bool,

    /// Warn and skip stations whose uptime is undefined instead of aborting
    pub skip_unreported_stations: bool,

    /// Print parsed stations, reports and grouped reports before the summary
    pub show_progress: bool,

    /// Summary output format
    pub output_format: OutputFormat,

    /// Decimal places for text output; `None` truncates to a whole percentage
    pub precision: Option<u32>,
}

impl Default for UptimeConfig {
    fn default() -> Self {
        Self {
            sort_reports: true,
            skip_unreported_stations: false,
            show_progress: true,
            output_format: OutputFormat::Text,
            precision: None,
        }
    }
}

impl UptimeConfig {
    /// Keep each charger's reports in input order
    pub fn without_sorting(mut self) -> Self {
        self.sort_reports = false;
        self
    }

    /// Skip stations that have no reports or a zero-width window
    pub fn with_skip_unreported(mut self) -> Self {
        self.skip_unreported_stations = true;
        self
    }

    /// Suppress progress listings
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(precision) = self.precision {
            if precision > MAX_PRECISION {
                return Err(UptimeError::configuration(format!(
                    "precision must be at most {}, got {}",
                    MAX_PRECISION, precision
                )));
            }
            if self.output_format == OutputFormat::Json {
                return Err(UptimeError::configuration(
                    "precision only applies to text output; JSON always carries the exact value",
                ));
            }
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}
