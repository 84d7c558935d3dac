//! Charger Uptime Library
//!
//! Computes, for each charging station, the percentage of its observation
//! window during which at least one of its chargers was reported available.
//!
//! This library provides tools for:
//! - Parsing sectioned availability documents into stations and interval reports
//! - Grouping interval reports by charger
//! - Sweeping all of a station's charger timelines to total its down time
//! - Exact decimal uptime percentages with typed precondition errors
//! - Text and JSON summaries for the command-line tool
//!
//! ```
//! use charger_uptime::{compute_uptime, group_by_charger, parse_document};
//!
//! let input = parse_document(
//!     "[Stations]\n0 1001\n[Charger Availability Reports]\n1001 0 100 true\n",
//! )?;
//! let grouped = group_by_charger(input.reports);
//! let result = compute_uptime(&input.stations[0], &grouped)?;
//! assert_eq!(result.uptime, rust_decimal::Decimal::ONE_HUNDRED);
//! # Ok::<(), charger_uptime::UptimeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod models;
pub mod parser;
pub mod processor;
pub mod summary;

pub use config::{OutputFormat, UptimeConfig};
pub use engine::{UptimeEngine, compute_uptime};
pub use error::{Result, UptimeError};
pub use grouping::group_by_charger;
pub use models::{AvailabilityInput, ReportsByCharger, Station, StationUptime, UptimeReport};
pub use parser::{parse_document, parse_file, parse_report_line, parse_station_line};
pub use processor::{ProcessingOutcome, UptimeProcessor};
