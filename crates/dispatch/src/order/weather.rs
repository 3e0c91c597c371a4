//! Weather at delivery time.

use serde::{Deserialize, Serialize};

/// Weather conditions recorded when an order is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    /// Raining at delivery time; deliveries earn a surcharge.
    Rainy,

    /// Anything but rain.
    #[default]
    NonRainy,
}

impl Weather {
    /// Returns true if it was raining.
    pub fn is_rainy(&self) -> bool {
        matches!(self, Weather::Rainy)
    }
}

/// Source of the current weather, injected into the dispatch service.
pub trait WeatherSource: Send + Sync {
    /// Returns the weather right now.
    fn current(&self) -> Weather;
}

/// A weather source that always reports the same conditions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWeather(pub Weather);

impl WeatherSource for FixedWeather {
    fn current(&self) -> Weather {
        self.0
    }
}
