//! Delivery worker as seen by the assignment engine.

use common::Username;
use serde::{Deserialize, Serialize};

use crate::bag::DeliveryBag;

/// A worker that can be handed orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryWorker {
    username: Username,
    bag: DeliveryBag,
    delivered_count: u32,
}

impl DeliveryWorker {
    /// Creates a worker with an empty default bag and no deliveries.
    pub fn new(username: impl Into<Username>) -> Self {
        Self {
            username: username.into(),
            bag: DeliveryBag::default(),
            delivered_count: 0,
        }
    }

    /// Replaces the worker's bag.
    pub fn with_bag(mut self, bag: DeliveryBag) -> Self {
        self.bag = bag;
        self
    }

    /// Sets how many orders the worker has delivered.
    pub fn with_delivered_count(mut self, delivered_count: u32) -> Self {
        self.delivered_count = delivered_count;
        self
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn bag(&self) -> &DeliveryBag {
        &self.bag
    }

    pub fn bag_mut(&mut self) -> &mut DeliveryBag {
        &mut self.bag
    }

    /// Number of orders this worker has taken to the delivered state.
    pub fn delivered_count(&self) -> u32 {
        self.delivered_count
    }
}
