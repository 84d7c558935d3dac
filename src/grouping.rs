//! Charger report grouping.
//!
//! Indexes availability reports by charger id so the engine can look up
//! each station's chargers directly.

use crate::models::{ReportsByCharger, UptimeReport};
use tracing::debug;

/// Group reports by charger id, preserving input order within each charger
pub fn group_by_charger(reports: impl IntoIterator<Item = UptimeReport>) -> ReportsByCharger {
    let mut grouped = ReportsByCharger::new();
    for report in reports {
        grouped
            .entry(report.charger_id.clone())
            .or_default()
            .push(report);
    }

    debug!("Grouped reports into {} chargers", grouped.len());
    grouped
}

/// Charger ids of a grouping in ascending order, for stable listings
pub fn sorted_charger_ids(grouped: &ReportsByCharger) -> Vec<&str> {
    let mut ids: Vec<&str> = grouped.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}
