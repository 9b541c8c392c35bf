use serde::Serialize;

use crate::error::SimulationError;

/// Append-only record of customer waits, in minutes, in service order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WaitTimeLog {
    waits: Vec<f64>,
}

impl WaitTimeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `waits`, failing instead of aborting if the log cannot grow.
    pub fn record(&mut self, waits: &[f64]) -> Result<(), SimulationError> {
        self.waits
            .try_reserve(waits.len())
            .map_err(|_| SimulationError::WaitLogExhausted {
                recorded: self.waits.len(),
            })?;
        self.waits.extend_from_slice(waits);
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.waits
    }

    pub fn len(&self) -> usize {
        self.waits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.waits.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.waits
    }
}

impl From<Vec<f64>> for WaitTimeLog {
    fn from(waits: Vec<f64>) -> Self {
        WaitTimeLog { waits }
    }
}
