//! Assignment engine: picks the worker that will carry an order.

use tokio::sync::Mutex;

use crate::error::{DispatchError, Result};
use crate::filter::{Filter, NearestToFullFilter};
use crate::order::{Order, OrderState};
use crate::store::WorkerStore;
use crate::worker::DeliveryWorker;

/// Assigns orders to workers with room for them.
///
/// Only workers whose bag fits the order are candidates. The filter chain
/// ranks them down to a single winner, whose bag is debited and saved
/// before the order is bound to it and put on delivery.
///
/// Assignments are serialized: reading the bags, picking a winner and
/// saving its bag happen under one lock, so two concurrent calls never
/// spend the same free capacity.
pub struct DeliveryAssigner<W: WorkerStore> {
    workers: W,
    filter: Box<dyn Filter>,
    lock: Mutex<()>,
}

impl<W: WorkerStore> DeliveryAssigner<W> {
    /// Creates an engine using the default filter chain.
    pub fn new(workers: W) -> Self {
        Self::with_filter(workers, Box::new(NearestToFullFilter::new()))
    }

    /// Creates an engine whose chain starts at `filter`.
    pub fn with_filter(workers: W, filter: Box<dyn Filter>) -> Self {
        Self {
            workers,
            filter,
            lock: Mutex::new(()),
        }
    }

    /// Returns the worker store.
    pub fn workers(&self) -> &W {
        &self.workers
    }

    /// Returns the first filter of the chain.
    pub fn filter(&self) -> &dyn Filter {
        self.filter.as_ref()
    }

    /// Assigns `order` to a worker and returns the winner with its updated bag.
    ///
    /// Fails with [`DispatchError::NoCapacityAvailable`] when no bag fits
    /// the order; neither the order nor any bag is touched in that case.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id(), size = order.size()))]
    pub async fn assign_to(&self, order: &mut Order) -> Result<DeliveryWorker> {
        let started = std::time::Instant::now();
        let _guard = self.lock.lock().await;

        let size = order.size();
        let candidates: Vec<DeliveryWorker> = self
            .workers
            .list_available()
            .await?
            .into_iter()
            .filter(|worker| worker.bag().fits(size))
            .collect();

        if candidates.is_empty() {
            metrics::counter!("dispatch_assignments_rejected_total").increment(1);
            tracing::warn!("no worker has room for the order");
            return Err(DispatchError::NoCapacityAvailable {
                order_id: order.id(),
                size,
            });
        }
        tracing::debug!(candidates = candidates.len(), "candidates with room");

        let mut winner = self
            .filter
            .filter(candidates, order)
            .into_iter()
            .min_by(|a, b| a.username().cmp(b.username()))
            .ok_or(DispatchError::EmptySelection {
                filter: self.filter.name(),
            })?;

        winner.bag_mut().load(size);
        self.workers
            .save_bag(winner.username(), *winner.bag())
            .await?;

        order.assign_to(winner.username().clone());
        order.change_state(OrderState::OnDelivery);

        tracing::info!(
            worker = %winner.username(),
            remaining = winner.bag().remaining(),
            "order assigned"
        );
        metrics::counter!("dispatch_assignments_total").increment(1);
        metrics::histogram!("dispatch_assignment_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use common::Username;

    use super::*;
    use crate::config::DispatchConfig;
    use crate::order::OrderType;
    use crate::store::InMemoryStore;

    fn order(order_type: OrderType) -> Order {
        Order::new("jperez", order_type, &DispatchConfig::default())
    }

    #[tokio::test]
    async fn assigns_the_only_worker() {
        let store = InMemoryStore::new();
        store.register_worker("pepemoto").await.unwrap();
        let assigner = DeliveryAssigner::new(store.clone());

        let mut order = order(OrderType::Individual);
        let winner = assigner.assign_to(&mut order).await.unwrap();

        assert_eq!(winner.username().as_str(), "pepemoto");
        assert_eq!(order.assigned_to(), Some(&Username::from("pepemoto")));
        assert_eq!(order.state(), OrderState::OnDelivery);
        assert_eq!(winner.bag().remaining(), 2);
        assert_eq!(
            store.bag_of(&Username::from("pepemoto")).await.unwrap().remaining(),
            2
        );
    }

    #[tokio::test]
    async fn no_workers_means_no_capacity() {
        let assigner = DeliveryAssigner::new(InMemoryStore::new());
        let mut order = order(OrderType::Individual);

        let result = assigner.assign_to(&mut order).await;
        assert!(matches!(
            result,
            Err(DispatchError::NoCapacityAvailable { size: 1, .. })
        ));
        assert_eq!(order.state(), OrderState::Received);
        assert_eq!(order.assigned_to(), None);
    }

    #[tokio::test]
    async fn family_order_skips_partially_loaded_worker() {
        let store = InMemoryStore::new();
        store.register_worker("pepemoto").await.unwrap();
        store.register_worker("pepeauto").await.unwrap();
        let assigner = DeliveryAssigner::new(store);

        let mut first = order(OrderType::Individual);
        let first_winner = assigner.assign_to(&mut first).await.unwrap();

        let mut family = order(OrderType::Family);
        let family_winner = assigner.assign_to(&mut family).await.unwrap();

        assert_ne!(first_winner.username(), family_winner.username());
        assert_eq!(family_winner.bag().remaining(), 0);
    }

    struct DropEverything;

    impl Filter for DropEverything {
        fn name(&self) -> &'static str {
            "drop_everything"
        }

        fn apply(&self, _candidates: Vec<DeliveryWorker>, _order: &Order) -> Vec<DeliveryWorker> {
            Vec::new()
        }

        fn next_filter(&self) -> Option<&dyn Filter> {
            None
        }
    }

    #[tokio::test]
    async fn broken_filter_is_reported() {
        let store = InMemoryStore::new();
        store.register_worker("pepemoto").await.unwrap();
        let assigner = DeliveryAssigner::with_filter(store, Box::new(DropEverything));

        let mut order = order(OrderType::Individual);
        let result = assigner.assign_to(&mut order).await;
        assert!(matches!(
            result,
            Err(DispatchError::EmptySelection {
                filter: "drop_everything"
            })
        ));
        assert_eq!(order.assigned_to(), None);
    }

    mod counters {
        use std::collections::HashMap;
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::{Arc, Mutex as StdMutex};

        use metrics::{
            Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString,
            Unit,
        };

        use super::*;

        #[derive(Default)]
        struct Tally(AtomicU64);

        impl CounterFn for Tally {
            fn increment(&self, value: u64) {
                self.0.fetch_add(value, Ordering::SeqCst);
            }

            fn absolute(&self, value: u64) {
                self.0.store(value, Ordering::SeqCst);
            }
        }

        #[derive(Default)]
        struct CountingRecorder {
            counters: StdMutex<HashMap<String, Arc<Tally>>>,
        }

        impl CountingRecorder {
            fn count(&self, name: &str) -> u64 {
                self.counters
                    .lock()
                    .unwrap()
                    .get(name)
                    .map_or(0, |tally| tally.0.load(Ordering::SeqCst))
            }
        }

        impl Recorder for CountingRecorder {
            fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
            fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
            fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

            fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
                let tally = Arc::clone(
                    self.counters
                        .lock()
                        .unwrap()
                        .entry(key.name().to_string())
                        .or_default(),
                );
                Counter::from_arc(tally)
            }

            fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
                Gauge::noop()
            }

            fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
                Histogram::noop()
            }
        }

        #[test]
        fn rejected_assignments_are_not_counted_as_assignments() {
            let recorder = CountingRecorder::default();
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            metrics::with_local_recorder(&recorder, || {
                rt.block_on(async {
                    let store = InMemoryStore::new();
                    store.register_worker("pepemoto").await.unwrap();
                    let assigner = DeliveryAssigner::new(store);

                    assigner
                        .assign_to(&mut order(OrderType::Family))
                        .await
                        .unwrap();
                    let rejected = assigner.assign_to(&mut order(OrderType::Individual)).await;
                    assert!(rejected.is_err());
                })
            });

            assert_eq!(recorder.count("dispatch_assignments_total"), 1);
            assert_eq!(recorder.count("dispatch_assignments_rejected_total"), 1);
        }
    }
}
