use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::BUSINESS_DAY_MINUTES;
use crate::arrivals::MAX_LAMBDA;
use crate::error::ConfigError;

/// Parameters for one simulated business day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Mean number of customers arriving per minute (λ)
    pub lambda: f64,
    /// Number of tellers serving the single queue
    pub tellers: usize,
    /// Minutes simulated before the branch stops observing
    pub horizon_minutes: usize,
}

impl SimulationConfig {
    pub fn new(lambda: f64, tellers: usize) -> Self {
        SimulationConfig {
            lambda,
            tellers,
            ..Self::default()
        }
    }

    pub fn with_horizon(self, horizon_minutes: usize) -> Self {
        SimulationConfig {
            horizon_minutes,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !lambda_in_range(self.lambda) {
            return Err(ConfigError::InvalidLambda(self.lambda));
        }
        if self.tellers == 0 {
            return Err(ConfigError::NoTellers);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            lambda: 1.0,
            tellers: 1,
            horizon_minutes: BUSINESS_DAY_MINUTES,
        }
    }
}

/// λ above zero and no larger than [`MAX_LAMBDA`]. Rejects NaN.
fn lambda_in_range(lambda: f64) -> bool {
    lambda > 0.0 && lambda <= MAX_LAMBDA
}

/// Parse a mean arrival rate. Accepts values above zero up to [`MAX_LAMBDA`].
pub fn parse_lambda(input: &str) -> Result<f64, ConfigError> {
    let trimmed = input.trim();
    let lambda: f64 = trimmed.parse().map_err(|_| ConfigError::Parse {
        field: "lambda",
        input: trimmed.to_string(),
    })?;
    if !lambda_in_range(lambda) {
        return Err(ConfigError::InvalidLambda(lambda));
    }
    Ok(lambda)
}

pub fn parse_tellers(input: &str) -> Result<usize, ConfigError> {
    let trimmed = input.trim();
    let tellers: usize = trimmed.parse().map_err(|_| ConfigError::Parse {
        field: "tellers",
        input: trimmed.to_string(),
    })?;
    if tellers == 0 {
        return Err(ConfigError::NoTellers);
    }
    Ok(tellers)
}

/// Write `message` to `output` and read one line from `input`.
///
/// Returns `Ok(None)` on end of input or a blank line.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}
