//! Main processing pipeline.
//!
//! Orchestrates a single uptime run: parse the availability document,
//! group reports by charger, compute each station's uptime and render the
//! progress listing and summary.

use crate::config::UptimeConfig;
use crate::engine::UptimeEngine;
use crate::error::Result;
use crate::grouping::group_by_charger;
use crate::models::{AvailabilityInput, ReportsByCharger, StationUptime};
use crate::parser::{parse_document, parse_file};
use crate::summary::{render_grouped, render_reports, render_stations, render_summary};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub input: AvailabilityInput,
    pub grouped: ReportsByCharger,
    pub results: Vec<StationUptime>,
    pub processing_time_ms: u128,
}

/// Processor for one availability report file
pub struct UptimeProcessor {
    input_path: PathBuf,
    config: UptimeConfig,
}

impl UptimeProcessor {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            config: UptimeConfig::default(),
        }
    }

    /// Configure the processor
    pub fn with_config(mut self, config: UptimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Read the input file and compute every station's uptime
    pub fn process(&self) -> Result<ProcessingOutcome> {
        info!("Processing availability report {}", self.input_path.display());
        let input = parse_file(&self.input_path)?;
        self.process_input(input)
    }

    /// Compute uptimes for an in-memory document
    pub fn process_str(&self, content: &str) -> Result<ProcessingOutcome> {
        self.process_input(parse_document(content)?)
    }

    fn process_input(&self, input: AvailabilityInput) -> Result<ProcessingOutcome> {
        let start_time = Instant::now();
        info!(
            "Parsed {} stations and {} reports",
            input.stations.len(),
            input.reports.len()
        );

        let grouped = group_by_charger(input.reports.iter().cloned());
        let engine = UptimeEngine::new(&self.config);
        let results = engine.compute_all(&input.stations, &grouped)?;

        let processing_time_ms = start_time.elapsed().as_millis();
        info!(
            "Computed uptime for {} of {} stations in {}ms",
            results.len(),
            input.stations.len(),
            processing_time_ms
        );

        Ok(ProcessingOutcome {
            input,
            grouped,
            results,
            processing_time_ms,
        })
    }

    /// Render progress listings (unless quiet) followed by the summary
    pub fn render(&self, outcome: &ProcessingOutcome) -> Result<String> {
        let mut out = String::new();
        if self.config.show_progress {
            out.push_str(&render_stations(&outcome.input.stations));
            out.push_str(&render_reports(&outcome.input.reports));
            out.push_str(&render_grouped(&outcome.grouped));
        }
        out.push_str(&render_summary(&outcome.results, &self.config)?);
        Ok(out)
    }
}
