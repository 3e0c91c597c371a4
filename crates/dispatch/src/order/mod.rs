//! Order entity, lifecycle and commission.

mod commission;
mod entity;
mod state;
mod value_objects;
mod weather;

pub use commission::{Commission, CommissionPolicy, EarnedCommission};
pub use entity::{MAX_RATING, MIN_RATING, Order};
pub use state::OrderState;
pub use value_objects::{Money, OrderType};
pub use weather::{FixedWeather, Weather, WeatherSource};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order type label is not on the menu.
    #[error("Unrecognized order type: {0}")]
    UnrecognizedOrderType(String),

    /// The commission was read before the order was delivered.
    #[error("Order not delivered")]
    OrderNotDelivered,
}
