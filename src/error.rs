//! Error handling for uptime report processing.
//!
//! Provides error types with context for input parsing failures and
//! uptime computation precondition violations.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UptimeError {
    #[error("Failed to read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid record{}: '{line}' - {reason}", line_suffix(.line_number))]
    Format {
        line_number: Option<usize>,
        line: String,
        reason: String,
    },

    #[error("Missing required section header: {header}")]
    MissingSection { header: String },

    #[error("No reports found for any charger of station {station_id}")]
    NoReports { station_id: String },

    #[error("Observation window for station {station_id} has zero width (at {at}ns)")]
    ZeroWindow { station_id: String, at: i64 },

    #[error("Uptime arithmetic overflowed for station {station_id}")]
    Arithmetic { station_id: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to serialize summary: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn line_suffix(line_number: &Option<usize>) -> String {
    match line_number {
        Some(n) => format!(" on line {}", n),
        None => String::new(),
    }
}

impl UptimeError {
    /// Create a format error for a line without position information
    pub fn format(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            line_number: None,
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Attach a 1-based line number to a format error, leaving other errors untouched
    pub fn at_line(self, number: usize) -> Self {
        match self {
            Self::Format { line, reason, .. } => Self::Format {
                line_number: Some(number),
                line,
                reason,
            },
            other => other,
        }
    }

    /// Whether this error is a precondition violation raised by the uptime engine
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::NoReports { .. } | Self::ZeroWindow { .. })
    }
}

pub type Result<T> = std::result::Result<T, UptimeError>;
