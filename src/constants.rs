//! Application constants for the charger uptime calculator
//!
//! Section headers, record tokens and default values used across the
//! parser, engine and CLI.

// =============================================================================
// Input Format
// =============================================================================

/// Header line opening the stations section
pub const STATIONS_HEADER: &str = "[Stations]";

/// Header line opening the availability reports section
pub const REPORTS_HEADER: &str = "[Charger Availability Reports]";

/// Token marking a charger as available during the reported interval
pub const UP_TOKEN: &str = "true";

/// Token marking a charger as unavailable during the reported interval
pub const DOWN_TOKEN: &str = "false";

/// Exact number of fields in an availability report line
pub const REPORT_FIELD_COUNT: usize = 4;

/// Minimum number of fields in a station line (station id plus one charger)
pub const MIN_STATION_FIELD_COUNT: usize = 2;

// =============================================================================
// Uptime Arithmetic
// =============================================================================

/// Significant digits kept in the uptime quotient before scaling to a percentage
pub const SIGNIFICANT_DIGITS: u32 = 28;

/// Largest quotient scale; scaling by 100 then leaves at most 28 decimal places
pub const MAX_QUOTIENT_SCALE: u32 = 30;

// =============================================================================
// Output
// =============================================================================

/// Largest number of decimal places accepted for the text summary
pub const MAX_PRECISION: u32 = 28;

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";
