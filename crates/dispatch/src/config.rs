//! Dispatch configuration loaded from environment variables.

use thiserror::Error;

use crate::order::{CommissionPolicy, Money, OrderType};

/// Size and price of one menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// Bag capacity an order of this menu occupies.
    pub size: u32,
    /// Price charged to the client.
    pub price: Money,
}

/// Every menu on offer, one entry per [`OrderType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub individual: MenuEntry,
    pub couple: MenuEntry,
    pub family: MenuEntry,
}

impl Menu {
    /// Returns the entry for an order type.
    pub fn entry(&self, order_type: OrderType) -> MenuEntry {
        match order_type {
            OrderType::Individual => self.individual,
            OrderType::Couple => self.couple,
            OrderType::Family => self.family,
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            individual: MenuEntry {
                size: 1,
                price: Money::from_dollars(100),
            },
            couple: MenuEntry {
                size: 2,
                price: Money::from_dollars(175),
            },
            family: MenuEntry {
                size: 3,
                price: Money::from_dollars(250),
            },
        }
    }
}

/// Errors raised while loading or checking the configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    /// A menu does not fit in an empty bag, or occupies nothing.
    #[error("Size {size} of {order_type} orders must be between 1 and the bag capacity {capacity}")]
    SizeOutOfRange {
        order_type: OrderType,
        size: u32,
        capacity: u32,
    },

    /// The worker store hands out bags of another capacity than configured.
    #[error("Bag capacity {configured} does not match the store's bag capacity {store}")]
    CapacityMismatch { configured: u32, store: u32 },

    /// Commission rate or multiplier is not a positive number.
    #[error("Commission {field} must be positive, got {value}")]
    NonPositiveCommission { field: &'static str, value: f64 },
}

/// Dispatch configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `DISPATCH_BAG_CAPACITY` — total bag capacity per worker (default: `3`)
/// - `DISPATCH_INDIVIDUAL_SIZE` — size of individual orders (default: `1`)
/// - `DISPATCH_COUPLE_SIZE` — size of couple orders (default: `2`)
/// - `DISPATCH_FAMILY_SIZE` — size of family orders (default: `3`)
/// - `DISPATCH_COMMISSION_RATE` — base commission rate (default: `0.05`)
/// - `DISPATCH_RAINY_MULTIPLIER` — rate multiplier when raining (default: `1.2`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchConfig {
    pub bag_capacity: u32,
    pub menu: Menu,
    pub commission: CommissionPolicy,
}

impl DispatchConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults for unset ones. Set but unparsable values are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut menu = defaults.menu;
        menu.individual.size = parse_or(&lookup, "DISPATCH_INDIVIDUAL_SIZE", menu.individual.size)?;
        menu.couple.size = parse_or(&lookup, "DISPATCH_COUPLE_SIZE", menu.couple.size)?;
        menu.family.size = parse_or(&lookup, "DISPATCH_FAMILY_SIZE", menu.family.size)?;

        let config = Self {
            bag_capacity: parse_or(&lookup, "DISPATCH_BAG_CAPACITY", defaults.bag_capacity)?,
            menu,
            commission: CommissionPolicy {
                rate: parse_or(&lookup, "DISPATCH_COMMISSION_RATE", defaults.commission.rate)?,
                rainy_multiplier: parse_or(
                    &lookup,
                    "DISPATCH_RAINY_MULTIPLIER",
                    defaults.commission.rainy_multiplier,
                )?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that every menu fits an empty bag and the commission is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for order_type in [OrderType::Individual, OrderType::Couple, OrderType::Family] {
            let size = self.menu.entry(order_type).size;
            if size == 0 || size > self.bag_capacity {
                return Err(ConfigError::SizeOutOfRange {
                    order_type,
                    size,
                    capacity: self.bag_capacity,
                });
            }
        }

        if self.commission.rate <= 0.0 {
            return Err(ConfigError::NonPositiveCommission {
                field: "rate",
                value: self.commission.rate,
            });
        }
        if self.commission.rainy_multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveCommission {
                field: "rainy_multiplier",
                value: self.commission.rainy_multiplier,
            });
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            bag_capacity: 3,
            menu: Menu::default(),
            commission: CommissionPolicy::default(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        None => Ok(default),
    }
}
