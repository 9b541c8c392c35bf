//! Customer arrival processes.

use rand::Rng;

use crate::error::ConfigError;

/// Largest supported mean arrival rate per minute.
///
/// The sampler compares a running product against e^(−λ), which stops being a
/// normal `f64` just above λ = 708.
pub const MAX_LAMBDA: f64 = 700.0;

/// Source of per-minute arrival counts.
pub trait ArrivalProcess {
    /// Number of customers walking in during the next minute.
    fn next_arrival_count<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize;
}

/// Poisson-distributed arrivals sampled with Knuth's multiplication method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonArrivals {
    /// Mean arrivals per minute
    lambda: f64,
    /// e^(−λ), the stopping threshold for the running product
    threshold: f64,
}

impl PoissonArrivals {
    /// A zero rate is allowed and always yields no arrivals.
    pub fn new(lambda: f64) -> Result<Self, ConfigError> {
        if !(0.0..=MAX_LAMBDA).contains(&lambda) {
            return Err(ConfigError::InvalidLambda(lambda));
        }
        Ok(PoissonArrivals {
            lambda,
            threshold: (-lambda).exp(),
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Draw one Poisson(λ) sample.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            // uniform on (0, 1]
            p *= 1.0 - rng.random::<f64>();
            if p <= self.threshold {
                return k - 1;
            }
        }
    }
}

impl ArrivalProcess for PoissonArrivals {
    fn next_arrival_count<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.sample(rng)
    }
}
