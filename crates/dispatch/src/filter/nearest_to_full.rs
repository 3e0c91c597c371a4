use crate::order::Order;
use crate::worker::DeliveryWorker;

use super::{DeliveredCountFilter, Filter, lowest_group};

/// Prefers the workers whose bags are closest to full.
///
/// Consolidating load on busy workers keeps idle ones free for larger
/// orders. Ties go to the next filter, by default a [`DeliveredCountFilter`].
pub struct NearestToFullFilter {
    next: Option<Box<dyn Filter>>,
}

impl NearestToFullFilter {
    /// Creates the filter followed by a terminal [`DeliveredCountFilter`].
    pub fn new() -> Self {
        Self::with_next(Box::new(DeliveredCountFilter::new()))
    }

    /// Creates the filter with a custom successor.
    pub fn with_next(next: Box<dyn Filter>) -> Self {
        Self { next: Some(next) }
    }

    /// Creates the filter with no successor.
    pub fn terminal() -> Self {
        Self { next: None }
    }
}

impl Default for NearestToFullFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for NearestToFullFilter {
    fn name(&self) -> &'static str {
        "nearest_to_full"
    }

    fn apply(&self, candidates: Vec<DeliveryWorker>, _order: &Order) -> Vec<DeliveryWorker> {
        lowest_group(candidates, |worker| worker.bag().remaining())
    }

    fn next_filter(&self) -> Option<&dyn Filter> {
        self.next.as_deref()
    }
}
