//! Shared identifier types for the delivery dispatch system.

mod types;

pub use types::{CommissionId, OrderId, Username};
