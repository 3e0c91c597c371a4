use crate::order::Order;
use crate::worker::DeliveryWorker;

use super::{Filter, lowest_group};

/// Prefers the workers with the fewest delivered orders.
///
/// Without a successor this is the end of the chain: a remaining tie is
/// broken by the lowest username so exactly one worker comes out.
pub struct DeliveredCountFilter {
    next: Option<Box<dyn Filter>>,
}

impl DeliveredCountFilter {
    /// Creates a terminal filter.
    pub fn new() -> Self {
        Self { next: None }
    }

    /// Creates the filter with a custom successor.
    pub fn with_next(next: Box<dyn Filter>) -> Self {
        Self { next: Some(next) }
    }
}

impl Default for DeliveredCountFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for DeliveredCountFilter {
    fn name(&self) -> &'static str {
        "delivered_count"
    }

    fn apply(&self, candidates: Vec<DeliveryWorker>, _order: &Order) -> Vec<DeliveryWorker> {
        let mut group = lowest_group(candidates, |worker| worker.delivered_count());
        if self.next.is_none() {
            group.truncate(1);
        }
        group
    }

    fn next_filter(&self) -> Option<&dyn Filter> {
        self.next.as_deref()
    }
}
