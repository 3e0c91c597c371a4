//! Tie-breaking filters that narrow candidate workers down to one.
//!
//! Filters form a chain of responsibility. Each one keeps the best-ranked
//! group of its input and hands that group to its successor only when the
//! group still holds more than one worker.
//!
//! The default chain is:
//!
//! ```text
//! NearestToFullFilter ──(tie)──► DeliveredCountFilter ──(tie)──► lowest username
//! ```

mod delivered_count;
mod nearest_to_full;

pub use delivered_count::DeliveredCountFilter;
pub use nearest_to_full::NearestToFullFilter;

use std::collections::BTreeMap;

use crate::order::Order;
use crate::worker::DeliveryWorker;

/// A ranking policy in the assignment chain.
///
/// Given a non-empty candidate list, `apply` must return a non-empty subset
/// of it, best candidates first.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter, used in logs.
    fn name(&self) -> &'static str;

    /// Keeps the best-ranked candidates according to this filter alone.
    fn apply(&self, candidates: Vec<DeliveryWorker>, order: &Order) -> Vec<DeliveryWorker>;

    /// Returns the filter that breaks ties left by this one.
    fn next_filter(&self) -> Option<&dyn Filter>;

    /// Runs this filter and, on a tie, the rest of the chain.
    fn filter(&self, candidates: Vec<DeliveryWorker>, order: &Order) -> Vec<DeliveryWorker> {
        let narrowed = self.apply(candidates, order);
        tracing::debug!(
            filter = self.name(),
            order_id = %order.id(),
            remaining = narrowed.len(),
            "filter applied"
        );

        match self.next_filter() {
            Some(next) if narrowed.len() > 1 => next.filter(narrowed, order),
            _ => narrowed,
        }
    }
}

/// Groups candidates by `key` and keeps the group with the smallest key,
/// sorted by username.
pub(crate) fn lowest_group<K, F>(candidates: Vec<DeliveryWorker>, key: F) -> Vec<DeliveryWorker>
where
    K: Ord,
    F: Fn(&DeliveryWorker) -> K,
{
    let mut groups: BTreeMap<K, Vec<DeliveryWorker>> = BTreeMap::new();
    for candidate in candidates {
        groups.entry(key(&candidate)).or_default().push(candidate);
    }

    let mut group = groups
        .into_iter()
        .next()
        .map(|(_, group)| group)
        .unwrap_or_default();
    group.sort_by(|a, b| a.username().cmp(b.username()));
    group
}
