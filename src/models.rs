//! Core data structures for station uptime processing.
//!
//! Defines availability reports, stations, the parsed input document and
//! per-station uptime results used throughout the library.

use crate::constants::{DOWN_TOKEN, UP_TOKEN};
use crate::error::UptimeError;
use crate::parser::{parse_report_line, parse_station_line};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One observed interval `[start, end)` for a single charger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UptimeReport {
    pub charger_id: String,
    pub start_time_nanos: i64,
    pub end_time_nanos: i64,
    pub up: bool,
}

impl UptimeReport {
    pub fn new(charger_id: impl Into<String>, start: i64, end: i64, up: bool) -> Self {
        Self {
            charger_id: charger_id.into(),
            start_time_nanos: start,
            end_time_nanos: end,
            up,
        }
    }
}

impl fmt::Display for UptimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.charger_id,
            self.start_time_nanos,
            self.end_time_nanos,
            if self.up { UP_TOKEN } else { DOWN_TOKEN }
        )
    }
}

impl FromStr for UptimeReport {
    type Err = UptimeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_report_line(line)
    }
}

/// A charging station made of one or more chargers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    /// Charger ids in input order; duplicates are allowed
    pub charger_ids: Vec<String>,
}

impl Station {
    pub fn new(id: impl Into<String>, charger_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            charger_ids,
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        for charger_id in &self.charger_ids {
            write!(f, " {}", charger_id)?;
        }
        Ok(())
    }
}

impl FromStr for Station {
    type Err = UptimeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_station_line(line)
    }
}

/// Reports indexed by charger id, each list in input order
pub type ReportsByCharger = HashMap<String, Vec<UptimeReport>>;

/// Stations and reports as read from an availability document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityInput {
    pub stations: Vec<Station>,
    pub reports: Vec<UptimeReport>,
}

/// Uptime computed for one station over its observation window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationUptime {
    pub station_id: String,
    pub window_start: i64,
    pub window_end: i64,
    pub down_time: i64,
    /// Percentage in `[0, 100]`, exact to 28 significant digits
    pub uptime: Decimal,
}

impl StationUptime {
    /// Uptime percentage rounded towards zero to a whole number
    pub fn whole_percent(&self) -> Decimal {
        self.uptime.trunc()
    }
}
