//! Dispatch service providing a simplified API over stores and engine.

use common::{OrderId, Username};

use crate::assigner::DeliveryAssigner;
use crate::config::{ConfigError, DispatchConfig};
use crate::error::{DispatchError, Result};
use crate::filter::Filter;
use crate::order::{Money, Order, OrderState, OrderType, WeatherSource};
use crate::store::{OrderStore, WorkerStore};

/// Service for placing, dispatching and tracking orders.
///
/// Loads orders from the store, runs them through the assignment engine or
/// the lifecycle, and saves them back.
pub struct DispatchService<S, W>
where
    S: WorkerStore + OrderStore + Clone,
    W: WeatherSource,
{
    store: S,
    assigner: DeliveryAssigner<S>,
    weather: W,
    config: DispatchConfig,
}

impl<S, W> DispatchService<S, W>
where
    S: WorkerStore + OrderStore + Clone,
    W: WeatherSource,
{
    /// Creates a new service with the default filter chain.
    ///
    /// The configuration must be valid and its bag capacity must match the
    /// bags `store` hands out.
    pub fn new(store: S, weather: W, config: DispatchConfig) -> Result<Self> {
        check_config(&store, &config)?;
        Ok(Self {
            assigner: DeliveryAssigner::new(store.clone()),
            store,
            weather,
            config,
        })
    }

    /// Creates a new service whose assignment chain starts at `filter`.
    pub fn with_filter(
        store: S,
        weather: W,
        config: DispatchConfig,
        filter: Box<dyn Filter>,
    ) -> Result<Self> {
        check_config(&store, &config)?;
        Ok(Self {
            assigner: DeliveryAssigner::with_filter(store.clone(), filter),
            store,
            weather,
            config,
        })
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Places a new order for `client`.
    #[tracing::instrument(skip(self))]
    pub async fn place_order(&self, client: Username, order_type: OrderType) -> Result<Order> {
        let mut order = Order::new(client, order_type, &self.config);
        self.store.save(&mut order).await?;
        tracing::info!(order_id = %order.id(), "order placed");
        Ok(order)
    }

    /// Places a new order from an external type label.
    pub async fn place_order_by_label(&self, client: Username, label: &str) -> Result<Order> {
        let order_type: OrderType = label.parse()?;
        self.place_order(client, order_type).await
    }

    /// Assigns a stored order to a worker and saves it.
    ///
    /// Only received or in-preparation orders can be dispatched; anything
    /// else fails with [`DispatchError::NotDispatchable`] and no bag is
    /// touched.
    #[tracing::instrument(skip(self))]
    pub async fn dispatch(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.store.find(order_id).await?;
        if !order.state().is_pre_dispatch() {
            tracing::warn!(state = %order.state(), "order cannot be dispatched again");
            return Err(DispatchError::NotDispatchable {
                order_id,
                state: order.state(),
            });
        }
        self.assigner.assign_to(&mut order).await?;
        self.store.save(&mut order).await?;
        Ok(order)
    }

    /// Moves a stored order to the state named by `label`.
    ///
    /// Moving to `on_delivery` goes through the assignment engine. Moving to
    /// `delivered` records the current weather and settles the commission.
    #[tracing::instrument(skip(self))]
    pub async fn advance(&self, order_id: OrderId, label: &str) -> Result<Order> {
        let new_state = OrderState::from_label(label, self.weather.current());
        match new_state {
            OrderState::Invalid => Err(DispatchError::UnrecognizedState(label.to_string())),
            OrderState::OnDelivery => self.dispatch(order_id).await,
            _ => {
                let mut order = self.store.find(order_id).await?;
                order.change_state(new_state);
                self.store.save(&mut order).await?;
                Ok(order)
            }
        }
    }

    /// Rates an order on behalf of the client who placed it.
    ///
    /// Orders of other clients are reported as not found. Ratings out of
    /// range or on undelivered orders are dropped without error.
    #[tracing::instrument(skip(self))]
    pub async fn rate(&self, order_id: OrderId, client: &Username, rating: u8) -> Result<Order> {
        let mut order = self.store.find_for_user(order_id, client).await?;
        order.set_rating(rating);
        self.store.save(&mut order).await?;
        Ok(order)
    }

    /// Returns the commission amount of a delivered order.
    pub async fn commission_of(&self, order_id: OrderId) -> Result<Money> {
        let order = self.store.find(order_id).await?;
        Ok(order.commission().amount()?)
    }
}

fn check_config<S: WorkerStore>(store: &S, config: &DispatchConfig) -> Result<()> {
    config.validate()?;
    if store.bag_capacity() != config.bag_capacity {
        return Err(ConfigError::CapacityMismatch {
            configured: config.bag_capacity,
            store: store.bag_capacity(),
        }
        .into());
    }
    Ok(())
}
