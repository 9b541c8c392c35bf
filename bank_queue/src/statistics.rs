//! Descriptive statistics over recorded wait times.
//!
//! Every function returns `None` for an empty series, so callers decide how
//! to report "no data" instead of dividing by zero.

use serde::Serialize;

/// Summary of a wait-time distribution, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaitStatistics {
    /// Number of customers served
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by n)
    pub std_dev: f64,
    pub median: f64,
    /// Most frequent wait; the smallest value wins ties
    pub mode: f64,
    /// Longest single wait
    pub max: f64,
}

impl WaitStatistics {
    /// Analyze a series of waits. Returns `None` when there is nothing to analyze.
    pub fn analyze(waits: &[f64]) -> Option<Self> {
        let mean = mean(waits)?;
        let sorted = sorted(waits);

        Some(WaitStatistics {
            count: waits.len(),
            mean,
            std_dev: population_std_dev(waits, mean),
            median: median_of_sorted(&sorted)?,
            mode: mode_of_sorted(&sorted)?,
            max: max(waits)?,
        })
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    Some(population_std_dev(values, mean))
}

pub fn median(values: &[f64]) -> Option<f64> {
    median_of_sorted(&sorted(values))
}

/// Most frequent value. Equal frequencies resolve to the smallest value.
pub fn mode(values: &[f64]) -> Option<f64> {
    mode_of_sorted(&sorted(values))
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

fn mode_of_sorted(sorted: &[f64]) -> Option<f64> {
    let (&first, rest) = sorted.split_first()?;

    let mut best = first;
    let mut best_run = 1;
    let mut run = 1;
    let mut previous = first;
    for &value in rest {
        run = if value == previous { run + 1 } else { 1 };
        // strictly longer only: earlier (smaller) values keep ties
        if run > best_run {
            best = value;
            best_run = run;
        }
        previous = value;
    }
    Some(best)
}
