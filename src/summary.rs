//! Progress listings and uptime summaries.
//!
//! Renders parsed stations, parsed reports and the per-charger grouping as
//! human-readable progress text, and the final per-station results as
//! either plain `<stationId> <uptime>` lines or JSON.

use crate::config::{OutputFormat, UptimeConfig};
use crate::error::Result;
use crate::grouping::sorted_charger_ids;
use crate::models::{ReportsByCharger, Station, StationUptime, UptimeReport};
use chrono::{DateTime, SecondsFormat};
use colored::*;
use rust_decimal::RoundingStrategy;

/// List parsed stations and their chargers
pub fn render_stations(stations: &[Station]) -> String {
    let mut out = format!(
        "{} {}\n",
        "Parsed stations:".bright_cyan(),
        stations.len().to_string().bright_white().bold()
    );
    for station in stations {
        out.push_str(&format!(
            "  Station {} with chargers [{}]\n",
            station.id,
            station.charger_ids.join(", ")
        ));
    }
    out
}

/// List parsed reports in input order
pub fn render_reports(reports: &[UptimeReport]) -> String {
    let mut out = format!(
        "{} {}\n",
        "Parsed reports:".bright_cyan(),
        reports.len().to_string().bright_white().bold()
    );
    for report in reports {
        out.push_str(&format!(
            "  Report {} from {} to {}, up: {}\n",
            report.charger_id, report.start_time_nanos, report.end_time_nanos, report.up
        ));
    }
    out
}

/// List grouped reports per charger, chargers in ascending id order
pub fn render_grouped(grouped: &ReportsByCharger) -> String {
    let mut out = format!(
        "{} {}\n",
        "Grouped chargers:".bright_cyan(),
        grouped.len().to_string().bright_white().bold()
    );
    for charger_id in sorted_charger_ids(grouped) {
        let reports = &grouped[charger_id];
        let first = reports.iter().map(|r| r.start_time_nanos).min();
        let last = reports.iter().map(|r| r.end_time_nanos).max();
        match (first, last) {
            (Some(first), Some(last)) => {
                out.push_str(&format!(
                    "  Charger {} ({} reports, {} to {})\n",
                    charger_id,
                    reports.len(),
                    format_timestamp(first),
                    format_timestamp(last)
                ));
            }
            _ => {
                out.push_str(&format!("  Charger {}\n", charger_id));
            }
        }
        for report in reports {
            out.push_str(&format!(
                "    {} to {}, up: {}\n",
                report.start_time_nanos, report.end_time_nanos, report.up
            ));
        }
    }
    out
}

/// Render station results in the configured output format
pub fn render_summary(results: &[StationUptime], config: &UptimeConfig) -> Result<String> {
    match config.output_format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)? + "\n"),
        OutputFormat::Text => {
            let mut out = String::new();
            for result in results {
                out.push_str(&format!(
                    "{} {}\n",
                    result.station_id,
                    format_uptime(result, config.precision)
                ));
            }
            Ok(out)
        }
    }
}

/// Uptime as text: truncated to a whole number, or rounded to `precision` places
pub fn format_uptime(result: &StationUptime, precision: Option<u32>) -> String {
    match precision {
        None => result.whole_percent().to_string(),
        Some(dp) => {
            let rounded = result
                .uptime
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", dp as usize, rounded)
        }
    }
}

/// Nanosecond timestamp as RFC 3339 UTC
fn format_timestamp(nanos: i64) -> String {
    DateTime::from_timestamp_nanos(nanos).to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
