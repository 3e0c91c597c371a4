//! Value objects for the order domain.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::OrderError;

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = $10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from a dollar value.
    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the dollar portion (whole number).
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after dollars).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Scales the amount by a rate, rounding to the nearest cent.
    pub fn scale(&self, rate: f64) -> Money {
        Money {
            cents: (self.cents as f64 * rate).round() as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

/// The menu an order was placed for.
///
/// The type decides how much of a worker's bag the order occupies and
/// what it costs; both come from the configured [`Menu`](crate::config::Menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// A single-person menu.
    Individual,

    /// A menu for two.
    Couple,

    /// The largest menu.
    Family,
}

impl OrderType {
    /// Returns the external label of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Individual => "individual",
            OrderType::Couple => "couple",
            OrderType::Family => "family",
        }
    }
}

impl FromStr for OrderType {
    type Err = OrderError;

    /// Accepts the English labels and the legacy `menu_*` labels stored by
    /// the previous system.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" | "menu_individual" => Ok(OrderType::Individual),
            "couple" => Ok(OrderType::Couple),
            "family" | "menu_familiar" => Ok(OrderType::Family),
            other => Err(OrderError::UnrecognizedOrderType(other.to_string())),
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(1234);
        assert_eq!(money.cents(), 1234);
        assert_eq!(money.dollars(), 12);
        assert_eq!(money.cents_part(), 34);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(1234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1234).to_string(), "-$12.34");
    }

    #[test]
    fn test_money_scale_rounds_to_nearest_cent() {
        assert_eq!(Money::from_dollars(100).scale(0.05).cents(), 500);
        assert_eq!(Money::from_dollars(100).scale(0.05 * 1.2).cents(), 600);
        assert_eq!(Money::from_cents(17550).scale(0.05).cents(), 878);
    }

    #[test]
    fn test_order_type_parses_known_labels() {
        assert_eq!("individual".parse::<OrderType>().unwrap(), OrderType::Individual);
        assert_eq!("couple".parse::<OrderType>().unwrap(), OrderType::Couple);
        assert_eq!("family".parse::<OrderType>().unwrap(), OrderType::Family);
    }

    #[test]
    fn test_order_type_parses_legacy_labels() {
        assert_eq!("menu_individual".parse::<OrderType>().unwrap(), OrderType::Individual);
        assert_eq!("menu_familiar".parse::<OrderType>().unwrap(), OrderType::Family);
    }

    #[test]
    fn test_order_type_rejects_unknown_label() {
        let err = "banquet".parse::<OrderType>().unwrap_err();
        assert!(matches!(err, OrderError::UnrecognizedOrderType(label) if label == "banquet"));
    }

    #[test]
    fn test_order_type_label_roundtrip() {
        for order_type in [OrderType::Individual, OrderType::Couple, OrderType::Family] {
            assert_eq!(order_type.as_str().parse::<OrderType>().unwrap(), order_type);
        }
    }
}
