//! Capacity-bounded assignment of delivery orders to workers.
//!
//! This crate provides:
//! - `DeliveryBag`, the carrying capacity of one worker
//! - Order entity with its lifecycle state machine and commission
//! - Filter chain ranking candidate workers down to one
//! - `DeliveryAssigner`, the engine binding orders to workers
//! - Store traits with an in-memory implementation, and `DispatchService`

pub mod assigner;
pub mod bag;
pub mod config;
pub mod error;
pub mod filter;
pub mod order;
pub mod service;
pub mod store;
pub mod worker;

pub use assigner::DeliveryAssigner;
pub use bag::{DEFAULT_BAG_CAPACITY, DeliveryBag};
pub use config::{ConfigError, DispatchConfig, Menu, MenuEntry};
pub use error::DispatchError;
pub use filter::{DeliveredCountFilter, Filter, NearestToFullFilter};
pub use order::{
    Commission, CommissionPolicy, EarnedCommission, FixedWeather, MAX_RATING, MIN_RATING, Money,
    Order, OrderError, OrderState, OrderType, Weather, WeatherSource,
};
pub use service::DispatchService;
pub use store::{InMemoryStore, OrderStore, StoreError, WorkerStore};
pub use worker::DeliveryWorker;
