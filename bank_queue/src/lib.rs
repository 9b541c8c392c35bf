pub mod arrivals;
pub mod branch;
pub mod config;
pub mod error;
pub mod queue;
pub mod report;
pub mod statistics;
pub mod tellers;
pub mod wait_log;

pub use arrivals::{ArrivalProcess, PoissonArrivals};
pub use branch::{Branch, BranchStats, RunSummary, SimulationOutcome, run, run_with_arrivals};
pub use config::SimulationConfig;
pub use error::{ConfigError, SimulationError};
pub use queue::CustomerQueue;
pub use report::Report;
pub use statistics::WaitStatistics;
pub use tellers::{Teller, TellerPool};
pub use wait_log::WaitTimeLog;

/// Eight opening hours at one-minute resolution.
pub const BUSINESS_DAY_MINUTES: usize = 480;

/// Events in the bank simulation
#[derive(Debug, Clone)]
pub enum Event {
    /// Advance the branch through one minute of business
    Minute { minute: usize },
}

/// Combined stats enum for DES framework compatibility
#[derive(Debug, Clone)]
pub enum Stats {
    Branch(BranchStats),
}

/// A customer, from walking in until a teller takes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    /// Minute the customer joined the line
    pub arrival_time: usize,
    /// Minute a teller accepted the customer
    pub service_start: Option<usize>,
    /// Minutes the teller will spend with the customer
    pub service_duration: Option<usize>,
}

impl Customer {
    pub fn arriving_at(minute: usize) -> Self {
        Customer {
            arrival_time: minute,
            service_start: None,
            service_duration: None,
        }
    }

    /// Start service at `minute` and return how long the customer waited.
    pub fn begin_service(&mut self, minute: usize, duration: usize) -> usize {
        debug_assert!(
            minute >= self.arrival_time,
            "service at minute {minute} before arrival at {}",
            self.arrival_time
        );
        self.service_start = Some(minute);
        self.service_duration = Some(duration);
        minute.saturating_sub(self.arrival_time)
    }

    pub fn wait_time(&self) -> Option<usize> {
        self.service_start
            .map(|start| start.saturating_sub(self.arrival_time))
    }
}
