//! Collaborator stores the dispatch engine reads from and writes to.
//!
//! Persistence lives outside this crate; these traits are the narrow
//! surface the engine and service need. [`InMemoryStore`] implements both
//! for tests and single-process use.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{OrderId, Username};
use thiserror::Error;

use crate::bag::DeliveryBag;
use crate::order::Order;
use crate::worker::DeliveryWorker;

/// Errors that can occur when interacting with a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The order does not exist, or does not belong to the asking client.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// No worker is registered under this username.
    #[error("Worker not found: {0}")]
    WorkerNotFound(Username),

    /// A worker with this username already exists.
    #[error("Worker already registered: {0}")]
    WorkerAlreadyRegistered(Username),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Source of the workers orders can be assigned to.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait WorkerStore: Send + Sync {
    /// Capacity of the bags this store hands out to workers.
    fn bag_capacity(&self) -> u32;

    /// Returns every registered worker with its current bag and delivered count.
    async fn list_available(&self) -> Result<Vec<DeliveryWorker>>;

    /// Persists the bag of a worker after an order was loaded into it.
    async fn save_bag(&self, worker: &Username, bag: DeliveryBag) -> Result<()>;
}

/// Persistence for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts or replaces an order.
    ///
    /// A freshly settled commission is given a positive ID, which is
    /// written back into `order`.
    async fn save(&self, order: &mut Order) -> Result<()>;

    /// Loads an order by ID.
    async fn find(&self, order_id: OrderId) -> Result<Order>;

    /// Loads an order by ID, only if it belongs to `client`.
    async fn find_for_user(&self, order_id: OrderId, client: &Username) -> Result<Order>;

    /// Returns true if `client` has placed any order.
    async fn has_orders(&self, client: &Username) -> Result<bool>;

    /// Returns the orders placed on `date`.
    async fn orders_created_on(&self, date: NaiveDate) -> Result<Vec<Order>>;

    /// Returns the orders placed on `date` that have been delivered.
    async fn delivered_orders_created_on(&self, date: NaiveDate) -> Result<Vec<Order>>;

    /// Returns the orders `worker` is carrying right now.
    async fn on_delivery_orders_by(&self, worker: &Username) -> Result<Vec<Order>>;
}
