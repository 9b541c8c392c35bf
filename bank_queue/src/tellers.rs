use std::ops::RangeInclusive;

use rand::Rng;
use tracing::trace;

use crate::Customer;
use crate::error::ConfigError;
use crate::queue::CustomerQueue;

/// Service takes two or three minutes, equally likely.
pub const SERVICE_MINUTES: RangeInclusive<usize> = 2..=3;

/// A single service position.
///
/// `remaining_busy_minutes > 0` exactly when a customer is being served.
#[derive(Debug, Default)]
pub struct Teller {
    remaining_busy_minutes: usize,
    serving: Option<Customer>,
}

impl Teller {
    pub fn remaining_busy_minutes(&self) -> usize {
        self.remaining_busy_minutes
    }

    pub fn is_busy(&self) -> bool {
        self.remaining_busy_minutes > 0
    }

    pub fn serving(&self) -> Option<&Customer> {
        self.serving.as_ref()
    }

    fn work_one_minute(&mut self) {
        self.remaining_busy_minutes -= 1;
        if self.remaining_busy_minutes == 0 {
            self.serving = None;
        }
    }

    fn accept(&mut self, customer: Customer, duration: usize) {
        self.remaining_busy_minutes = duration;
        self.serving = Some(customer);
    }
}

/// Tellers sharing one line, visited in index order every minute.
#[derive(Debug)]
pub struct TellerPool {
    tellers: Vec<Teller>,
    occupied_minutes: usize,
}

impl TellerPool {
    pub fn new(teller_count: usize) -> Result<Self, ConfigError> {
        if teller_count == 0 {
            return Err(ConfigError::NoTellers);
        }
        Ok(TellerPool {
            tellers: (0..teller_count).map(|_| Teller::default()).collect(),
            occupied_minutes: 0,
        })
    }

    pub fn teller_count(&self) -> usize {
        self.tellers.len()
    }

    pub fn tellers(&self) -> &[Teller] {
        &self.tellers
    }

    pub fn busy_count(&self) -> usize {
        self.tellers.iter().filter(|t| t.is_busy()).count()
    }

    /// Teller-minutes spent either serving or starting service so far.
    pub fn occupied_minutes(&self) -> usize {
        self.occupied_minutes
    }

    /// Advance every teller by one minute and return the waits of customers
    /// who started service at `minute`.
    ///
    /// A busy teller only counts down; it cannot take the next customer in the
    /// same minute its countdown reaches zero.
    pub fn advance_one_minute<R: Rng + ?Sized>(
        &mut self,
        queue: &mut CustomerQueue,
        minute: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        let mut waits = Vec::new();
        for (index, teller) in self.tellers.iter_mut().enumerate() {
            if teller.is_busy() {
                teller.work_one_minute();
                self.occupied_minutes += 1;
                continue;
            }

            let Some(mut customer) = queue.dequeue() else {
                continue;
            };
            let duration = rng.random_range(SERVICE_MINUTES);
            let wait = customer.begin_service(minute, duration);
            trace!(
                teller = index,
                minute,
                arrived = customer.arrival_time,
                wait,
                duration,
                "service started"
            );
            teller.accept(customer, duration);
            self.occupied_minutes += 1;
            waits.push(wait as f64);
        }
        waits
    }
}
