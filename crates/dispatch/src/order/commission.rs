//! Commission owed to the worker for a delivered order.

use common::CommissionId;
use serde::{Deserialize, Serialize};

use super::{Money, OrderError, Weather};

/// How a commission is computed from the order cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionPolicy {
    /// Fraction of the order cost paid as commission.
    pub rate: f64,

    /// Multiplier applied to `rate` when it rained at delivery time.
    pub rainy_multiplier: f64,
}

impl CommissionPolicy {
    /// Returns the effective rate for the given weather.
    pub fn rate_for(&self, weather: Weather) -> f64 {
        if weather.is_rainy() {
            self.rate * self.rainy_multiplier
        } else {
            self.rate
        }
    }
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            rate: 0.05,
            rainy_multiplier: 1.2,
        }
    }
}

/// A commission that has been earned by delivering an order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarnedCommission {
    id: CommissionId,
    order_cost: Money,
    amount: Money,
    weather: Weather,
}

impl EarnedCommission {
    /// Returns the order cost the amount was computed from.
    pub fn order_cost(&self) -> Money {
        self.order_cost
    }

    /// Returns the commission amount.
    pub fn amount(&self) -> Money {
        self.amount
    }
}

/// Commission attached to an order.
///
/// Orders carry [`Commission::NotDelivered`] until they reach the delivered
/// state. Asking a pending commission for its amount is a sequencing bug
/// in the caller and fails with [`OrderError::OrderNotDelivered`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Commission {
    /// The order has not been delivered yet.
    #[default]
    NotDelivered,

    /// The order was delivered and the commission is settled.
    Earned(EarnedCommission),
}

impl Commission {
    /// Settles the commission for an order of the given cost.
    pub fn settle(order_cost: Money, weather: Weather, policy: &CommissionPolicy) -> Self {
        Commission::Earned(EarnedCommission {
            id: CommissionId::UNSAVED,
            order_cost,
            amount: order_cost.scale(policy.rate_for(weather)),
            weather,
        })
    }

    /// Returns the commission amount.
    pub fn amount(&self) -> Result<Money, OrderError> {
        match self {
            Commission::NotDelivered => Err(OrderError::OrderNotDelivered),
            Commission::Earned(earned) => Ok(earned.amount),
        }
    }

    /// Returns the weather the commission was settled under.
    ///
    /// Pending commissions report the default, non-rainy weather.
    pub fn weather(&self) -> Weather {
        match self {
            Commission::NotDelivered => Weather::default(),
            Commission::Earned(earned) => earned.weather,
        }
    }

    /// Returns the commission ID.
    ///
    /// Pending commissions report [`CommissionId::NOT_DELIVERED`]; settled
    /// ones report [`CommissionId::UNSAVED`] until a store assigns an ID.
    pub fn id(&self) -> CommissionId {
        match self {
            Commission::NotDelivered => CommissionId::NOT_DELIVERED,
            Commission::Earned(earned) => earned.id,
        }
    }

    /// Records the ID a store assigned to this commission.
    ///
    /// Has no effect on a pending commission.
    pub fn set_id(&mut self, id: CommissionId) {
        if let Commission::Earned(earned) = self {
            earned.id = id;
        }
    }

    /// Returns true if the commission has been settled.
    pub fn is_earned(&self) -> bool {
        matches!(self, Commission::Earned(_))
    }
}
