//! Delivery bag: how much a worker can still carry.

use serde::{Deserialize, Serialize};

use crate::order::Order;

/// Capacity of a bag when none is configured.
pub const DEFAULT_BAG_CAPACITY: u32 = 3;

/// Remaining carrying capacity of one worker.
///
/// Callers check [`DeliveryBag::fits`] before [`DeliveryBag::load`]; the bag
/// itself does not refuse a load that overflows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryBag {
    capacity: u32,
    remaining: i64,
}

impl DeliveryBag {
    /// Creates an empty bag with the given total capacity.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            remaining: i64::from(capacity),
        }
    }

    /// Returns the total capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the capacity still free.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Returns true if an order of size `cost` would still fit.
    pub fn fits(&self, cost: u32) -> bool {
        self.remaining - i64::from(cost) >= 0
    }

    /// Takes `cost` out of the remaining capacity.
    pub fn load(&mut self, cost: u32) {
        self.remaining -= i64::from(cost);
    }

    /// Loads every order in turn.
    pub fn load_orders<'a>(&mut self, orders: impl IntoIterator<Item = &'a Order>) {
        for order in orders {
            self.load(order.size());
        }
    }

    /// Empties the bag.
    pub fn reset(&mut self) {
        self.remaining = i64::from(self.capacity);
    }
}

impl Default for DeliveryBag {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BAG_CAPACITY)
    }
}
