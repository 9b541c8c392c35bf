//! Human-readable and JSON renderings of a finished run.

use serde::Serialize;

use crate::branch::{RunSummary, SimulationOutcome};
use crate::config::SimulationConfig;
use crate::statistics::WaitStatistics;

pub const NO_CUSTOMERS_MESSAGE: &str = "No customers arrived during the simulation.";

/// Report for one simulated day.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub config: SimulationConfig,
    /// Seed of the run's random source, for replaying it
    pub seed: u64,
    pub summary: RunSummary,
    /// `None` when nobody was served
    pub statistics: Option<WaitStatistics>,
}

impl Report {
    pub fn new(config: SimulationConfig, seed: u64, outcome: &SimulationOutcome) -> Self {
        Report {
            config,
            seed,
            summary: outcome.summary.clone(),
            statistics: WaitStatistics::analyze(outcome.wait_times.as_slice()),
        }
    }

    pub fn render_text(&self, verbose: bool) -> String {
        let Some(stats) = &self.statistics else {
            return format!("{NO_CUSTOMERS_MESSAGE}\n");
        };

        let mut lines = vec![
            "=== Simulation Report ===".to_string(),
            format!("Total customers served: {}", stats.count),
            format!("Average (Mean) wait time: {:.2} minutes", stats.mean),
            format!("Median wait time: {:.2} minutes", stats.median),
            format!("Mode wait time: {:.2} minutes", stats.mode),
            format!("Standard deviation: {:.2}", stats.std_dev),
            format!("Longest single wait: {:.2} minutes", stats.max),
        ];

        if verbose {
            let summary = &self.summary;
            lines.extend([
                String::new(),
                "--- Run Summary ---".to_string(),
                format!("Seed: {}", self.seed),
                format!("Arrival rate (lambda): {:.2} per minute", self.config.lambda),
                format!("Tellers: {}", summary.tellers),
                format!("Minutes simulated: {}", summary.minutes_elapsed),
                format!("Total arrivals: {}", summary.arrivals),
                format!("Left waiting in line at close: {}", summary.left_in_queue),
                format!("Still at a teller at close: {}", summary.in_service_at_close),
                format!("Peak queue length: {}", summary.peak_queue_length),
                format!("Teller utilization: {:.2}%", summary.utilization() * 100.0),
            ]);
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
