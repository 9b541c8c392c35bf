use des::{Agent, EventLoop, Response};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::arrivals::{ArrivalProcess, PoissonArrivals};
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::queue::CustomerQueue;
use crate::tellers::TellerPool;
use crate::wait_log::WaitTimeLog;
use crate::{Customer, Event, Stats};

/// Counters describing how a business day unfolded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub tellers: usize,
    pub minutes_elapsed: usize,
    pub arrivals: usize,
    /// Customers who reached a teller (including those still at the counter)
    pub served: usize,
    /// Still waiting in line when the branch stopped observing
    pub left_in_queue: usize,
    /// Still at a counter when the branch stopped observing
    pub in_service_at_close: usize,
    pub peak_queue_length: usize,
    pub occupied_teller_minutes: usize,
}

impl RunSummary {
    /// Fraction of available teller-minutes spent with a customer.
    pub fn utilization(&self) -> f64 {
        let available = self.tellers * self.minutes_elapsed;
        if available == 0 {
            return 0.0;
        }
        self.occupied_teller_minutes as f64 / available as f64
    }
}

/// Snapshot reported by a [`Branch`] through the event loop.
#[derive(Debug, Clone)]
pub struct BranchStats {
    pub wait_times: WaitTimeLog,
    pub summary: RunSummary,
    pub failure: Option<SimulationError>,
}

/// The bank branch: one line, a pool of tellers and a minute-by-minute clock.
///
/// Each `Event::Minute` first admits the minute's arrivals, then lets every
/// teller work, then records the waits of customers who reached a counter.
/// The branch schedules its own next minute; the event loop's horizon decides
/// when observation stops.
pub struct Branch<A, R> {
    arrivals: A,
    queue: CustomerQueue,
    tellers: TellerPool,
    rng: R,
    wait_times: WaitTimeLog,
    total_arrivals: usize,
    peak_queue_length: usize,
    minutes_elapsed: usize,
    failure: Option<SimulationError>,
}

impl<A: ArrivalProcess, R: Rng> Branch<A, R> {
    pub fn new(arrivals: A, tellers: TellerPool, rng: R) -> Self {
        Branch {
            arrivals,
            queue: CustomerQueue::new(),
            tellers,
            rng,
            wait_times: WaitTimeLog::new(),
            total_arrivals: 0,
            peak_queue_length: 0,
            minutes_elapsed: 0,
            failure: None,
        }
    }

    /// Simulate a single minute.
    pub fn step(&mut self, minute: usize) -> Result<(), SimulationError> {
        let arrivals = self.arrivals.next_arrival_count(&mut self.rng);
        for _ in 0..arrivals {
            self.queue.enqueue(Customer::arriving_at(minute));
        }
        self.total_arrivals += arrivals;
        self.peak_queue_length = self.peak_queue_length.max(self.queue.len());

        let waits = self
            .tellers
            .advance_one_minute(&mut self.queue, minute, &mut self.rng);
        self.wait_times.record(&waits)?;
        self.minutes_elapsed += 1;

        debug!(
            minute,
            arrivals,
            started = waits.len(),
            queue_length = self.queue.len(),
            busy_tellers = self.tellers.busy_count(),
            "minute complete"
        );
        Ok(())
    }

    pub fn queue(&self) -> &CustomerQueue {
        &self.queue
    }

    pub fn tellers(&self) -> &TellerPool {
        &self.tellers
    }

    pub fn wait_times(&self) -> &WaitTimeLog {
        &self.wait_times
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            tellers: self.tellers.teller_count(),
            minutes_elapsed: self.minutes_elapsed,
            arrivals: self.total_arrivals,
            served: self.wait_times.len(),
            left_in_queue: self.queue.len(),
            in_service_at_close: self.tellers.busy_count(),
            peak_queue_length: self.peak_queue_length,
            occupied_teller_minutes: self.tellers.occupied_minutes(),
        }
    }
}

impl<A: ArrivalProcess, R: Rng> Agent<Event, Stats> for Branch<A, R> {
    fn act(&mut self, _current_t: usize, data: &Event) -> Response<Event, Stats> {
        match data {
            Event::Minute { minute } => match self.step(*minute) {
                Ok(()) => Response::event(minute + 1, Event::Minute { minute: minute + 1 }),
                Err(e) => {
                    error!(minute = *minute, "simulation halted: {}", e);
                    self.failure = Some(e);
                    Response::new()
                }
            },
        }
    }

    fn stats(&self) -> Stats {
        Stats::Branch(BranchStats {
            wait_times: self.wait_times.clone(),
            summary: self.summary(),
            failure: self.failure.clone(),
        })
    }
}

/// Everything a finished run hands to analysis and reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub wait_times: WaitTimeLog,
    pub summary: RunSummary,
}

/// Simulate one business day with Poisson arrivals at `config.lambda`.
///
/// The random source is used for both arrivals and service times, so a
/// seeded generator makes the whole run reproducible.
pub fn run<R>(config: &SimulationConfig, rng: R) -> Result<SimulationOutcome, SimulationError>
where
    R: Rng + 'static,
{
    config.validate()?;
    let arrivals = PoissonArrivals::new(config.lambda)?;
    run_with_arrivals(config, arrivals, rng)
}

/// Simulate one business day with a caller-supplied arrival process.
///
/// `config.lambda` is ignored; teller count and horizon still apply.
pub fn run_with_arrivals<A, R>(
    config: &SimulationConfig,
    arrivals: A,
    rng: R,
) -> Result<SimulationOutcome, SimulationError>
where
    A: ArrivalProcess + 'static,
    R: Rng + 'static,
{
    let tellers = TellerPool::new(config.tellers)?;
    let branch = Branch::new(arrivals, tellers, rng);

    info!(
        lambda = config.lambda,
        tellers = config.tellers,
        horizon = config.horizon_minutes,
        "branch opening"
    );

    let agents: Vec<Box<dyn Agent<Event, Stats>>> = vec![Box::new(branch)];
    let mut event_loop = EventLoop::new(vec![(0, Event::Minute { minute: 0 })], agents);
    event_loop.run(config.horizon_minutes);

    let Some(Stats::Branch(stats)) = event_loop.stats().pop() else {
        unreachable!("the branch is the only agent in the loop");
    };
    if let Some(failure) = stats.failure {
        return Err(failure);
    }

    info!(
        arrivals = stats.summary.arrivals,
        served = stats.summary.served,
        left_in_queue = stats.summary.left_in_queue,
        in_service = stats.summary.in_service_at_close,
        "branch closed"
    );

    Ok(SimulationOutcome {
        wait_times: stats.wait_times,
        summary: stats.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Scripted(Vec<usize>);

    impl ArrivalProcess for Scripted {
        fn next_arrival_count<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> usize {
            if self.0.is_empty() { 0 } else { self.0.remove(0) }
        }
    }

    fn branch(script: Vec<usize>, tellers: usize) -> Branch<Scripted, StdRng> {
        Branch::new(
            Scripted(script),
            TellerPool::new(tellers).unwrap(),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn branch_advances_on_minute_event() {
        let mut branch = branch(vec![2], 1);

        let response = branch.act(0, &Event::Minute { minute: 0 });

        assert_eq!(response.events.len(), 1);
        assert!(matches!(response.events[0], (1, Event::Minute { minute: 1 })));
        assert_eq!(branch.wait_times().as_slice(), &[0.0]);
        assert_eq!(branch.queue().len(), 1);
        assert_eq!(branch.tellers().busy_count(), 1);
    }

    #[test]
    fn summary_tracks_peak_queue() {
        let mut branch = branch(vec![4, 0, 0], 1);
        for minute in 0..3 {
            branch.step(minute).unwrap();
        }

        let summary = branch.summary();
        assert_eq!(summary.arrivals, 4);
        assert_eq!(summary.peak_queue_length, 4);
        assert_eq!(summary.served, 1);
        assert_eq!(summary.left_in_queue, 3);
        assert_eq!(summary.minutes_elapsed, 3);
    }

    #[test]
    fn stats_snapshot_matches_branch() {
        let mut branch = branch(vec![1, 1], 2);
        branch.act(0, &Event::Minute { minute: 0 });
        branch.act(1, &Event::Minute { minute: 1 });

        let Stats::Branch(stats) = branch.stats();
        assert_eq!(stats.wait_times.as_slice(), &[0.0, 0.0]);
        assert_eq!(stats.summary.in_service_at_close, 2);
        assert!(stats.failure.is_none());
    }

    #[test]
    fn utilization_without_time_is_zero() {
        assert_eq!(RunSummary::default().utilization(), 0.0);
    }

    #[test]
    fn run_rejects_invalid_config() {
        let config = SimulationConfig::new(-1.0, 1);
        assert!(matches!(
            run(&config, StdRng::seed_from_u64(1)),
            Err(SimulationError::Config(_))
        ));
    }
}
