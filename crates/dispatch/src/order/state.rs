//! Order state machine.

use serde::{Deserialize, Serialize};

use super::Weather;

/// The state of an order in its lifecycle.
///
/// State progression driven by external events:
/// ```text
/// Received ──► InPreparation ──► OnDelivery ──► Delivered
///     │              │               │
///     └──────────────┴───────────────┴──► Cancelled
/// ```
///
/// `Invalid` is never reached through a transition. It only appears when
/// an unrecognized label is read back from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrderState {
    /// Order placed by the client.
    #[default]
    Received,

    /// Kitchen is preparing the order.
    InPreparation,

    /// A worker is carrying the order.
    OnDelivery,

    /// Order reached the client (terminal state).
    Delivered {
        /// Weather at the moment of delivery.
        #[serde(default)]
        weather: Weather,
    },

    /// Order was cancelled (terminal state).
    Cancelled,

    /// Unrecognized external label.
    #[serde(other)]
    Invalid,
}

impl OrderState {
    /// Builds a state from its external label.
    ///
    /// `weather` is only captured by the delivered state. The Spanish labels
    /// of the previous system are accepted as aliases. Unknown labels yield
    /// [`OrderState::Invalid`].
    pub fn from_label(label: &str, weather: Weather) -> Self {
        match label {
            "received" | "recibido" => OrderState::Received,
            "in_preparation" | "en_preparacion" => OrderState::InPreparation,
            "on_delivery" | "en_entrega" => OrderState::OnDelivery,
            "delivered" | "entregado" => OrderState::Delivered { weather },
            "cancelled" | "cancelado" => OrderState::Cancelled,
            _ => OrderState::Invalid,
        }
    }

    /// Returns the external label of this state.
    pub fn label(&self) -> &'static str {
        match self {
            OrderState::Received => "received",
            OrderState::InPreparation => "in_preparation",
            OrderState::OnDelivery => "on_delivery",
            OrderState::Delivered { .. } => "delivered",
            OrderState::Cancelled => "cancelled",
            OrderState::Invalid => "invalid",
        }
    }

    /// Returns true if the order has not left the kitchen yet.
    pub fn is_pre_dispatch(&self) -> bool {
        matches!(self, OrderState::Received | OrderState::InPreparation)
    }

    /// Returns true if a worker is carrying the order. Dispatched orders
    /// occupy space in that worker's bag.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, OrderState::OnDelivery)
    }

    /// Returns true if the order was delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self, OrderState::Delivered { .. })
    }

    /// Returns true if the order can be rated in this state.
    pub fn can_rate(&self) -> bool {
        self.is_delivered()
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Delivered { .. } | OrderState::Cancelled)
    }

    /// Returns the weather recorded at delivery, if delivered.
    pub fn weather(&self) -> Option<Weather> {
        match self {
            OrderState::Delivered { weather } => Some(*weather),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
