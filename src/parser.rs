//! Availability document parsing.
//!
//! Parses the sectioned availability format: a `[Stations]` section listing
//! each station and its chargers, followed by a `[Charger Availability Reports]`
//! section with one interval report per line.

use crate::constants::{
    DOWN_TOKEN, MIN_STATION_FIELD_COUNT, REPORT_FIELD_COUNT, REPORTS_HEADER, STATIONS_HEADER,
    UP_TOKEN,
};
use crate::error::{Result, UptimeError};
use crate::models::{AvailabilityInput, Station, UptimeReport};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse a single `<chargerId> <startNanos> <endNanos> <true|false>` line
pub fn parse_report_line(line: &str) -> Result<UptimeReport> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != REPORT_FIELD_COUNT {
        return Err(UptimeError::format(
            line,
            format!(
                "expected {} fields, found {}",
                REPORT_FIELD_COUNT,
                fields.len()
            ),
        ));
    }

    let start = parse_timestamp(line, fields[1], "start")?;
    let end = parse_timestamp(line, fields[2], "end")?;
    let up = match fields[3] {
        UP_TOKEN => true,
        DOWN_TOKEN => false,
        other => {
            return Err(UptimeError::format(
                line,
                format!("invalid up value '{}'", other),
            ));
        }
    };

    Ok(UptimeReport::new(fields[0], start, end, up))
}

/// Parse a single `<stationId> <chargerId> [<chargerId> ...]` line
pub fn parse_station_line(line: &str) -> Result<Station> {
    let mut fields = line.split_whitespace();
    let field_count = fields.clone().count();
    if field_count < MIN_STATION_FIELD_COUNT {
        return Err(UptimeError::format(
            line,
            format!(
                "expected at least {} fields, found {}",
                MIN_STATION_FIELD_COUNT, field_count
            ),
        ));
    }

    // Count checked above
    let id = fields.next().unwrap_or_default();
    let charger_ids = fields.map(str::to_string).collect();
    Ok(Station::new(id, charger_ids))
}

fn parse_timestamp(line: &str, value: &str, name: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|e| {
        UptimeError::format(line, format!("invalid {} time '{}': {}", name, value, e))
    })
}

/// Parse a complete availability document
pub fn parse_document(content: &str) -> Result<AvailabilityInput> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .skip_while(|(_, line)| line.is_empty());

    match lines.next() {
        Some((_, STATIONS_HEADER)) => {}
        _ => {
            return Err(UptimeError::MissingSection {
                header: STATIONS_HEADER.to_string(),
            });
        }
    }

    let mut input = AvailabilityInput::default();
    let mut in_reports = false;

    for (line_number, line) in lines {
        if line.is_empty() {
            continue;
        }

        if !in_reports {
            if line == REPORTS_HEADER {
                in_reports = true;
                continue;
            }
            let station = parse_station_line(line).map_err(|e| e.at_line(line_number))?;
            input.stations.push(station);
        } else {
            let report = parse_report_line(line).map_err(|e| e.at_line(line_number))?;
            input.reports.push(report);
        }
    }

    if !in_reports {
        return Err(UptimeError::MissingSection {
            header: REPORTS_HEADER.to_string(),
        });
    }

    debug!(
        "Parsed document: {} stations, {} reports",
        input.stations.len(),
        input.reports.len()
    );

    Ok(input)
}

/// Read and parse an availability document from disk
pub fn parse_file(path: &Path) -> Result<AvailabilityInput> {
    let content = fs::read_to_string(path).map_err(|source| UptimeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    parse_document(&content)
}
