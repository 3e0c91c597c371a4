//! Dispatch error types.

use common::OrderId;
use thiserror::Error;

use crate::config::ConfigError;
use crate::order::{OrderError, OrderState};
use crate::store::StoreError;

/// Errors that can occur during dispatch operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No worker has room for the order right now.
    #[error("No capacity available for order {order_id} of size {size}")]
    NoCapacityAvailable { order_id: OrderId, size: u32 },

    /// A filter broke its contract and dropped every candidate.
    #[error("Filter '{filter}' returned no candidates")]
    EmptySelection { filter: &'static str },

    /// The order already left the kitchen, so it cannot be dispatched again.
    #[error("Order {order_id} cannot be dispatched while {state}")]
    NotDispatchable { order_id: OrderId, state: OrderState },

    /// The requested state label is not part of the lifecycle.
    #[error("Unrecognized order state: {0}")]
    UnrecognizedState(String),

    /// An error occurred in the order entity.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// An error occurred in a collaborator store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience type alias for dispatch results.
pub type Result<T> = std::result::Result<T, DispatchError>;
