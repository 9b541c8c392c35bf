//! A small discrete-event engine.
//!
//! Agents react to timestamped events broadcast by an [`EventLoop`] and answer
//! with a [`Response`] carrying follow-up events (and, occasionally, new
//! agents). Events sharing a timestamp are delivered in the order they were
//! scheduled, so a run is fully determined by its agents and their RNGs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{trace, warn};

struct Event<T> {
    t: usize,
    seq: u64,
    data: T,
}

impl<T> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.seq == other.seq
    }
}

impl<T> Eq for Event<T> {}

impl<T> Ord for Event<T> {
    // BinaryHeap is a max-heap: reverse so the earliest (t, seq) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.t.cmp(&self.t).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What an agent hands back to the loop after handling an event.
pub struct Response<T, S> {
    pub events: Vec<(usize, T)>,
    pub agents: Vec<Box<dyn Agent<T, S>>>,
}

impl<T, S> Response<T, S> {
    pub fn new() -> Response<T, S> {
        Response {
            events: Vec::new(),
            agents: Vec::new(),
        }
    }

    /// A response scheduling a single event at time `t`.
    pub fn event(t: usize, data: T) -> Response<T, S> {
        Response {
            events: vec![(t, data)],
            agents: Vec::new(),
        }
    }

    pub fn events(events: Vec<(usize, T)>) -> Response<T, S> {
        Response {
            events,
            agents: Vec::new(),
        }
    }
}

impl<T, S> Default for Response<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A participant in the simulation.
///
/// Every agent sees every event; agents ignore what does not concern them by
/// returning an empty [`Response`].
pub trait Agent<T, S> {
    fn act(&mut self, _current_t: usize, _data: &T) -> Response<T, S> {
        Response::new()
    }

    /// Snapshot of the agent's observable state.
    fn stats(&self) -> S;
}

pub struct EventLoop<T, S> {
    queue: BinaryHeap<Event<T>>,
    current_t: usize,
    next_seq: u64,
    agents: Vec<Box<dyn Agent<T, S>>>,
}

impl<T, S> EventLoop<T, S> {
    pub fn new(events: Vec<(usize, T)>, agents: Vec<Box<dyn Agent<T, S>>>) -> EventLoop<T, S> {
        let mut event_loop = EventLoop {
            queue: BinaryHeap::with_capacity(events.len()),
            current_t: 0,
            next_seq: 0,
            agents,
        };
        for (t, data) in events {
            event_loop.schedule(t, data);
        }
        event_loop
    }

    /// Time of the most recently dispatched event.
    pub fn current_t(&self) -> usize {
        self.current_t
    }

    /// Number of events waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn schedule(&mut self, t: usize, data: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Event { t, seq, data });
    }

    fn broadcast(&mut self) {
        let Some(event) = self.queue.pop() else {
            return;
        };
        self.current_t = event.t;
        trace!(t = event.t, seq = event.seq, "dispatching event");

        let mut new_events = Vec::new();
        let mut new_agents = Vec::new();
        for agent in &mut self.agents {
            let response = agent.act(self.current_t, &event.data);
            new_events.extend(response.events);
            new_agents.extend(response.agents);
        }

        for (t, data) in new_events {
            if t < self.current_t {
                warn!(
                    t,
                    current_t = self.current_t,
                    "dropping event scheduled in the past"
                );
                continue;
            }
            self.schedule(t, data);
        }
        self.agents.extend(new_agents);
    }

    /// Dispatch events in time order until the queue drains or the next event
    /// is due at or after `until`. Events left in the queue are not processed.
    pub fn run(&mut self, until: usize) {
        while let Some(next) = self.queue.peek() {
            if next.t >= until {
                break;
            }
            self.broadcast();
        }
    }

    pub fn stats(&self) -> Vec<S> {
        self.agents.iter().map(|agent| agent.stats()).collect()
    }
}
