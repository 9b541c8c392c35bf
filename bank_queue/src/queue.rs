use std::collections::VecDeque;

use crate::Customer;

/// First-in-first-out line of waiting customers.
///
/// Customers are enqueued as the clock advances, so the head always holds the
/// earliest arrival.
#[derive(Debug, Default)]
pub struct CustomerQueue {
    customers: VecDeque<Customer>,
}

impl CustomerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, customer: Customer) {
        debug_assert!(
            self.customers
                .back()
                .is_none_or(|last| last.arrival_time <= customer.arrival_time),
            "customers must join the line in arrival order"
        );
        self.customers.push_back(customer);
    }

    /// Next customer in line, or `None` when nobody is waiting.
    pub fn dequeue(&mut self) -> Option<Customer> {
        self.customers.pop_front()
    }

    pub fn peek_front(&self) -> Option<&Customer> {
        self.customers.front()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
