//! Station uptime engine.
//!
//! Computes how much of a station's observation window was covered by at
//! least one charger reporting "up". Each charger is treated as an
//! independent timeline with its own cursor; the sweep jumps from one
//! report boundary to the next, taking the earliest boundary across all
//! chargers, so every cursor only ever moves forward.
//!
//! Policy details:
//! - Time not covered by any report counts as down.
//! - Only each charger's *current* report is consulted, so overlapping
//!   reports within one charger resolve by cursor order.
//! - The observation window runs from the earliest report start to the
//!   latest report end across the station's chargers.

use crate::config::UptimeConfig;
use crate::constants::{MAX_QUOTIENT_SCALE, SIGNIFICANT_DIGITS};
use crate::error::{Result, UptimeError};
use crate::models::{ReportsByCharger, Station, StationUptime, UptimeReport};
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

/// One charger's reports as seen by the sweep
type Timeline<'a> = Vec<&'a UptimeReport>;

/// Computes uptime percentages for stations
#[derive(Debug, Clone)]
pub struct UptimeEngine {
    sort_reports: bool,
    skip_unreported: bool,
}

impl Default for UptimeEngine {
    fn default() -> Self {
        Self::new(&UptimeConfig::default())
    }
}

impl UptimeEngine {
    pub fn new(config: &UptimeConfig) -> Self {
        Self {
            sort_reports: config.sort_reports,
            skip_unreported: config.skip_unreported_stations,
        }
    }

    /// Compute uptime for a single station
    ///
    /// Chargers missing from `reports` contribute an empty timeline. Fails with
    /// [`UptimeError::NoReports`] when none of the station's chargers has a
    /// report, and with [`UptimeError::ZeroWindow`] when the window is empty.
    pub fn compute(&self, station: &Station, reports: &ReportsByCharger) -> Result<StationUptime> {
        let timelines = self.collect_timelines(station, reports);

        let all_reports = || timelines.iter().flatten();
        let window_end = all_reports()
            .map(|r| r.end_time_nanos)
            .max()
            .ok_or_else(|| UptimeError::NoReports {
                station_id: station.id.clone(),
            })?;
        let window_start = all_reports()
            .map(|r| r.start_time_nanos)
            .min()
            .unwrap_or(window_end);

        if window_end <= window_start {
            return Err(UptimeError::ZeroWindow {
                station_id: station.id.clone(),
                at: window_start,
            });
        }

        let arithmetic = || UptimeError::Arithmetic {
            station_id: station.id.clone(),
        };

        let window = window_end.checked_sub(window_start).ok_or_else(arithmetic)?;
        let down_time = Sweep::new(timelines, window_start)
            .run(window_end)
            .ok_or_else(arithmetic)?;
        let uptime = uptime_percentage(window, down_time).ok_or_else(arithmetic)?;

        debug!(
            "Station {}: window [{}, {}), down {}ns, uptime {}%",
            station.id, window_start, window_end, down_time, uptime
        );

        Ok(StationUptime {
            station_id: station.id.clone(),
            window_start,
            window_end,
            down_time,
            uptime,
        })
    }

    /// Compute uptime for every station, in input order
    ///
    /// With skipping enabled, stations whose uptime is undefined are logged
    /// and left out; otherwise the first error aborts the run.
    pub fn compute_all(
        &self,
        stations: &[Station],
        reports: &ReportsByCharger,
    ) -> Result<Vec<StationUptime>> {
        let mut results = Vec::with_capacity(stations.len());
        for station in stations {
            match self.compute(station, reports) {
                Ok(result) => results.push(result),
                Err(e) if self.skip_unreported && e.is_precondition_violation() => {
                    warn!("Skipping station {}: {}", station.id, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(results)
    }

    fn collect_timelines<'a>(
        &self,
        station: &Station,
        reports: &'a ReportsByCharger,
    ) -> Vec<Timeline<'a>> {
        station
            .charger_ids
            .iter()
            .map(|charger_id| {
                let mut timeline: Timeline<'a> = reports
                    .get(charger_id)
                    .map(|list| list.iter().collect())
                    .unwrap_or_default();
                if self.sort_reports {
                    timeline.sort_by_key(|r| r.start_time_nanos);
                }
                timeline
            })
            .collect()
    }
}

/// Compute a station's uptime with default settings
pub fn compute_uptime(station: &Station, reports: &ReportsByCharger) -> Result<StationUptime> {
    UptimeEngine::default().compute(station, reports)
}

/// `(window - down) / window * 100` in decimal arithmetic
///
/// The quotient is rounded half-even to 28 significant digits, then scaled by
/// 100, which is exact. Quotients so small that 28 significant digits would
/// need more than 28 decimal places in the percentage are rounded at 28 places.
fn uptime_percentage(window: i64, down_time: i64) -> Option<Decimal> {
    let up_time = window.checked_sub(down_time)?;
    if window == 0 {
        return None;
    }
    if up_time == 0 {
        return Some(Decimal::ZERO);
    }

    let negative = (up_time < 0) != (window < 0);
    let divisor = u128::from(window.unsigned_abs());
    let numerator = u128::from(up_time.unsigned_abs());

    let mut coefficient = numerator / divisor;
    let mut remainder = numerator % divisor;
    let mut scale: u32 = 0;
    while remainder != 0
        && digit_count(coefficient) < SIGNIFICANT_DIGITS
        && scale < MAX_QUOTIENT_SCALE
    {
        remainder *= 10;
        coefficient = coefficient * 10 + remainder / divisor;
        remainder %= divisor;
        scale += 1;
    }

    let twice = remainder * 2;
    if twice > divisor || (twice == divisor && coefficient % 2 == 1) {
        coefficient += 1;
        if digit_count(coefficient) > SIGNIFICANT_DIGITS {
            coefficient /= 10;
            scale = scale.checked_sub(1)?;
        }
    }

    // Multiplying by 100 only moves the decimal point
    let (coefficient, scale) = match scale.checked_sub(2) {
        Some(scale) => (coefficient, scale),
        None => (coefficient * 10_u128.pow(2 - scale), 0),
    };

    let magnitude = i128::try_from(coefficient).ok()?;
    let signed = if negative { -magnitude } else { magnitude };
    Decimal::try_from_i128_with_scale(signed, scale)
        .ok()
        .map(|d| d.normalize())
}

fn digit_count(value: u128) -> u32 {
    if value == 0 { 0 } else { value.ilog10() + 1 }
}

/// Whether the charger's current report covers `time` and says up
fn charger_is_up(timeline: &[&UptimeReport], cursor: usize, time: i64) -> bool {
    timeline
        .get(cursor)
        .is_some_and(|r| time >= r.start_time_nanos && r.up)
}

/// Next time the charger's state can change, or `None` once exhausted
fn next_boundary(timeline: &[&UptimeReport], cursor: usize, time: i64) -> Option<i64> {
    timeline.get(cursor).map(|r| {
        if time < r.start_time_nanos {
            r.start_time_nanos
        } else {
            r.end_time_nanos
        }
    })
}

/// Sweep state: current time plus one cursor per charger timeline
struct Sweep<'a> {
    timelines: Vec<Timeline<'a>>,
    cursors: Vec<usize>,
    current_time: i64,
}

impl<'a> Sweep<'a> {
    fn new(timelines: Vec<Timeline<'a>>, start: i64) -> Self {
        let cursors = vec![0; timelines.len()];
        Self {
            timelines,
            cursors,
            current_time: start,
        }
    }

    fn station_is_up(&self) -> bool {
        self.timelines
            .iter()
            .zip(&self.cursors)
            .any(|(timeline, &cursor)| charger_is_up(timeline, cursor, self.current_time))
    }

    fn next_event(&self) -> Option<i64> {
        self.timelines
            .iter()
            .zip(&self.cursors)
            .filter_map(|(timeline, &cursor)| next_boundary(timeline, cursor, self.current_time))
            .min()
    }

    /// Step past every current report that has ended
    fn advance_cursors(&mut self) {
        for (timeline, cursor) in self.timelines.iter().zip(self.cursors.iter_mut()) {
            if let Some(report) = timeline.get(*cursor) {
                if self.current_time >= report.end_time_nanos {
                    *cursor += 1;
                }
            }
        }
    }

    /// Run until `end`, returning accumulated down time (`None` on overflow)
    fn run(mut self, end: i64) -> Option<i64> {
        let mut down_time: i64 = 0;

        while self.current_time < end {
            let up = self.station_is_up();
            let Some(next_time) = self.next_event() else {
                // Every cursor exhausted before `end`; only reachable with
                // inverted intervals
                break;
            };

            if !up {
                down_time = down_time.checked_add(next_time.checked_sub(self.current_time)?)?;
            }
            trace!(
                "Sweep [{}, {}) {}",
                self.current_time,
                next_time,
                if up { "up" } else { "down" }
            );

            self.current_time = next_time;
            self.advance_cursors();
        }

        Some(down_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_by_charger;
    use std::str::FromStr;

    fn station(id: &str, chargers: &[&str]) -> Station {
        Station::new(id, chargers.iter().map(|c| c.to_string()).collect())
    }

    fn report(charger: &str, start: i64, end: i64, up: bool) -> UptimeReport {
        UptimeReport::new(charger, start, end, up)
    }

    #[test]
    fn test_alternating_chargers_full_coverage() {
        let reports = group_by_charger(vec![
            report("1001", 0, 50000, true),
            report("1001", 50000, 100000, false),
            report("1002", 50000, 100000, true),
        ]);

        let result = compute_uptime(&station("0", &["1001", "1002"]), &reports).unwrap();

        assert_eq!(result.uptime, Decimal::ONE_HUNDRED);
        assert_eq!(result.down_time, 0);
        assert_eq!(result.window_start, 0);
        assert_eq!(result.window_end, 100000);
    }

    #[test]
    fn test_fully_down_interval() {
        let reports = group_by_charger(vec![report("1003", 25000, 75000, false)]);

        let result = compute_uptime(&station("1", &["1003"]), &reports).unwrap();

        assert_eq!(result.uptime, Decimal::ZERO);
        assert_eq!(result.down_time, 50000);
    }

    #[test]
    fn test_gap_counts_as_down() {
        let reports = group_by_charger(vec![
            report("1004", 0, 50000, true),
            report("1004", 100000, 200000, true),
        ]);

        let result = compute_uptime(&station("2", &["1004"]), &reports).unwrap();

        assert_eq!(result.window_end - result.window_start, 200000);
        assert_eq!(result.down_time, 50000);
        assert_eq!(result.uptime, Decimal::from(75));
    }

    #[test]
    fn test_exact_two_thirds() {
        let reports = group_by_charger(vec![
            report("0", 10, 20, true),
            report("0", 20, 30, false),
            report("0", 30, 40, true),
        ]);

        let result = compute_uptime(&station("0", &["0"]), &reports).unwrap();

        assert_eq!(
            result.uptime,
            Decimal::from_str("66.66666666666666666666666667").unwrap()
        );
        assert_eq!(result.uptime.to_string(), "66.66666666666666666666666667");
    }

    /// Station with one charger up for `up` nanos, then down until `total`
    fn single_charger_uptime(up: i64, total: i64) -> Decimal {
        let reports = group_by_charger(vec![
            report("1", 0, up, true),
            report("1", up, total, false),
        ]);
        compute_uptime(&station("s", &["1"]), &reports)
            .unwrap()
            .uptime
    }

    #[test]
    fn test_small_quotient_keeps_significant_digits() {
        assert_eq!(
            single_charger_uptime(1, 300).to_string(),
            "0.3333333333333333333333333333"
        );
        assert_eq!(
            single_charger_uptime(7, 3000).to_string(),
            "0.2333333333333333333333333333"
        );
    }

    #[test]
    fn test_uptime_percentage_values() {
        let cases = [
            (4, 1, "75"),
            (3, 0, "100"),
            (3, 3, "0"),
            (3, 1, "66.66666666666666666666666667"),
            (8, 1, "87.5"),
            (300, 299, "0.3333333333333333333333333333"),
            (6, 5, "16.66666666666666666666666667"),
        ];
        for (window, down, expected) in cases {
            let value = uptime_percentage(window, down).unwrap();
            assert_eq!(value.to_string(), expected, "window {window}, down {down}");
        }
    }

    #[test]
    fn test_uptime_percentage_rounds_last_digit() {
        // 1/7 = 0.142857142857142857142857142857...
        assert_eq!(
            uptime_percentage(7, 6).unwrap().to_string(),
            "14.28571428571428571428571429"
        );
        assert_eq!(uptime_percentage(1, 0).unwrap(), Decimal::ONE_HUNDRED);
        assert!(uptime_percentage(0, 0).is_none());
    }

    #[test]
    fn test_uptime_percentage_tiny_quotient_rounds_at_scale_limit() {
        let value =
            uptime_percentage(9_000_000_000_000_000_000, 8_999_999_999_999_999_999).unwrap();
        assert_eq!(
            value,
            Decimal::from_str("0.0000000000000000111111111111").unwrap()
        );
    }

    #[test]
    fn test_no_reports_is_an_error() {
        let reports = group_by_charger(vec![report("1001", 0, 10, true)]);

        let err = compute_uptime(&station("9", &["2001", "2002"]), &reports).unwrap_err();

        assert!(matches!(err, UptimeError::NoReports { ref station_id } if station_id == "9"));
    }

    #[test]
    fn test_zero_width_window_is_an_error() {
        let reports = group_by_charger(vec![report("1001", 500, 500, true)]);

        let err = compute_uptime(&station("3", &["1001"]), &reports).unwrap_err();

        assert!(matches!(err, UptimeError::ZeroWindow { at: 500, .. }));
    }

    #[test]
    fn test_unknown_charger_is_treated_as_empty() {
        let reports = group_by_charger(vec![report("1001", 0, 100, true)]);

        let result = compute_uptime(&station("4", &["1001", "missing"]), &reports).unwrap();

        assert_eq!(result.uptime, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_overlapping_chargers_use_logical_or() {
        let reports = group_by_charger(vec![
            report("a", 0, 60, true),
            report("b", 40, 100, false),
            report("c", 80, 120, true),
        ]);

        let result = compute_uptime(&station("5", &["a", "b", "c"]), &reports).unwrap();

        // Down only during [60, 80)
        assert_eq!(result.down_time, 20);
        assert_eq!(result.window_end - result.window_start, 120);
    }

    #[test]
    fn test_duplicate_charger_ids_in_station() {
        let reports = group_by_charger(vec![
            report("1001", 0, 50, true),
            report("1001", 50, 100, false),
        ]);

        let result = compute_uptime(&station("6", &["1001", "1001"]), &reports).unwrap();

        assert_eq!(result.uptime, Decimal::from(50));
    }

    #[test]
    fn test_out_of_order_reports_are_sorted() {
        let reports = group_by_charger(vec![
            report("1001", 50, 100, true),
            report("1001", 0, 50, true),
        ]);
        let station = station("7", &["1001"]);

        let sorted = compute_uptime(&station, &reports).unwrap();
        assert_eq!(sorted.uptime, Decimal::ONE_HUNDRED);

        // Input order kept: the later report hides the earlier one
        let engine = UptimeEngine::new(&UptimeConfig::default().without_sorting());
        let unsorted = engine.compute(&station, &reports).unwrap();
        assert_eq!(unsorted.uptime, Decimal::from(50));
    }

    #[test]
    fn test_leading_gap_before_first_report() {
        let reports = group_by_charger(vec![
            report("a", 0, 10, false),
            report("b", 20, 40, true),
        ]);

        let result = compute_uptime(&station("8", &["a", "b"]), &reports).unwrap();

        assert_eq!(result.down_time, 20);
        assert_eq!(result.uptime, Decimal::from(50));
    }

    #[test]
    fn test_exact_tiling_is_full_uptime() {
        let mut reports = Vec::new();
        let mut start = 1_000;
        for (i, len) in [7_i64, 13, 1, 250, 42, 3].iter().enumerate() {
            let charger = if i % 2 == 0 { "x" } else { "y" };
            reports.push(report(charger, start, start + len, true));
            start += len;
        }
        let grouped = group_by_charger(reports);

        let result = compute_uptime(&station("10", &["x", "y"]), &grouped).unwrap();

        assert_eq!(result.uptime, Decimal::ONE_HUNDRED);
        assert_eq!(result.down_time, 0);
    }

    #[test]
    fn test_uptime_stays_within_bounds() {
        // Small linear congruential generator for repeatable inputs
        let mut seed: u64 = 0x5eed;
        let mut next = |modulus: u64| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) % modulus) as i64
        };

        for case in 0..200 {
            let chargers = ["a", "b", "c"];
            let mut reports = Vec::new();
            for charger in chargers {
                let mut time = next(50);
                for _ in 0..next(5) {
                    let len = next(30) + 1;
                    let gap = next(3) * next(20);
                    let up = next(2) == 0;
                    reports.push(report(charger, time + gap, time + gap + len, up));
                    time += gap + len;
                }
            }
            if reports.is_empty() {
                continue;
            }
            let grouped = group_by_charger(reports);

            let result = compute_uptime(&station("p", &chargers), &grouped)
                .unwrap_or_else(|e| panic!("case {case} failed: {e}"));

            assert!(result.uptime >= Decimal::ZERO, "case {case}: {}", result.uptime);
            assert!(result.uptime <= Decimal::ONE_HUNDRED, "case {case}: {}", result.uptime);
            let window = result.window_end - result.window_start;
            assert!(result.down_time >= 0 && result.down_time <= window);
        }
    }

    #[test]
    fn test_compute_all_aborts_on_unreported_station() {
        let reports = group_by_charger(vec![report("1001", 0, 10, true)]);
        let stations = vec![station("0", &["1001"]), station("1", &["2001"])];

        let err = UptimeEngine::default()
            .compute_all(&stations, &reports)
            .unwrap_err();

        assert!(matches!(err, UptimeError::NoReports { .. }));
    }

    #[test]
    fn test_compute_all_skips_unreported_station() {
        let reports = group_by_charger(vec![
            report("1001", 0, 10, true),
            report("3001", 0, 10, false),
        ]);
        let stations = vec![
            station("0", &["1001"]),
            station("1", &["2001"]),
            station("2", &["3001"]),
        ];
        let engine = UptimeEngine::new(&UptimeConfig::default().with_skip_unreported());

        let results = engine.compute_all(&stations, &reports).unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.station_id.as_str()).collect();
        assert_eq!(ids, vec!["0", "2"]);
        assert_eq!(results[1].uptime, Decimal::ZERO);
    }
}
