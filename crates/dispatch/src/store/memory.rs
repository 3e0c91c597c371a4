use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{CommissionId, OrderId, Username};
use tokio::sync::RwLock;

use crate::bag::{DEFAULT_BAG_CAPACITY, DeliveryBag};
use crate::config::DispatchConfig;
use crate::order::Order;
use crate::worker::DeliveryWorker;

use super::{OrderStore, Result, StoreError, WorkerStore};

#[derive(Debug, Default)]
struct StoreState {
    bags: BTreeMap<Username, DeliveryBag>,
    orders: HashMap<OrderId, Order>,
    last_commission_id: i64,
}

impl StoreState {
    fn delivered_count(&self, worker: &Username) -> u32 {
        self.orders
            .values()
            .filter(|order| order.is_assigned_to(worker) && order.state().is_delivered())
            .count() as u32
    }

    fn on_delivery_by<'a>(&'a self, worker: &'a Username) -> impl Iterator<Item = &'a Order> {
        self.orders
            .values()
            .filter(move |order| order.is_assigned_to(worker) && order.state().is_dispatched())
    }
}

/// In-memory store for workers and orders.
///
/// Cloning is cheap and every clone shares the same data.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    bag_capacity: u32,
}

impl InMemoryStore {
    /// Creates an empty store whose workers get bags of the default capacity.
    pub fn new() -> Self {
        Self::with_bag_capacity(DEFAULT_BAG_CAPACITY)
    }

    /// Creates an empty store whose workers get bags of `bag_capacity`.
    pub fn with_bag_capacity(bag_capacity: u32) -> Self {
        Self {
            state: Arc::default(),
            bag_capacity,
        }
    }

    /// Creates an empty store whose bags follow the configured capacity.
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::with_bag_capacity(config.bag_capacity)
    }

    /// Registers a worker with an empty bag.
    pub async fn register_worker(&self, username: impl Into<Username>) -> Result<()> {
        let username = username.into();
        let mut state = self.state.write().await;
        if state.bags.contains_key(&username) {
            return Err(StoreError::WorkerAlreadyRegistered(username));
        }
        state
            .bags
            .insert(username, DeliveryBag::with_capacity(self.bag_capacity));
        Ok(())
    }

    /// Rebuilds every bag from scratch: emptied, then loaded with the
    /// orders its worker is currently carrying.
    pub async fn reset_bags(&self) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        for (worker, bag) in state.bags.iter_mut() {
            bag.reset();
            bag.load_orders(
                state
                    .orders
                    .values()
                    .filter(|order| order.is_assigned_to(worker) && order.state().is_dispatched()),
            );
        }
    }

    /// Returns the current bag of a worker.
    pub async fn bag_of(&self, worker: &Username) -> Result<DeliveryBag> {
        self.state
            .read()
            .await
            .bags
            .get(worker)
            .copied()
            .ok_or_else(|| StoreError::WorkerNotFound(worker.clone()))
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkerStore for InMemoryStore {
    fn bag_capacity(&self) -> u32 {
        self.bag_capacity
    }

    async fn list_available(&self) -> Result<Vec<DeliveryWorker>> {
        let state = self.state.read().await;
        Ok(state
            .bags
            .iter()
            .map(|(username, bag)| {
                DeliveryWorker::new(username.clone())
                    .with_bag(*bag)
                    .with_delivered_count(state.delivered_count(username))
            })
            .collect())
    }

    async fn save_bag(&self, worker: &Username, bag: DeliveryBag) -> Result<()> {
        let mut state = self.state.write().await;
        let slot = state
            .bags
            .get_mut(worker)
            .ok_or_else(|| StoreError::WorkerNotFound(worker.clone()))?;
        *slot = bag;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn save(&self, order: &mut Order) -> Result<()> {
        let mut state = self.state.write().await;

        if order.commission().is_earned() && !order.commission().id().is_persisted() {
            state.last_commission_id += 1;
            order.record_commission_id(CommissionId::new(state.last_commission_id));
        }

        state.orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn find(&self, order_id: OrderId) -> Result<Order> {
        self.state
            .read()
            .await
            .orders
            .get(&order_id)
            .cloned()
            .ok_or(StoreError::OrderNotFound(order_id))
    }

    async fn find_for_user(&self, order_id: OrderId, client: &Username) -> Result<Order> {
        let order = self.find(order_id).await?;
        if !order.belongs_to(client) {
            return Err(StoreError::OrderNotFound(order_id));
        }
        Ok(order)
    }

    async fn has_orders(&self, client: &Username) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.orders.values().any(|order| order.belongs_to(client)))
    }

    async fn orders_created_on(&self, date: NaiveDate) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .filter(|order| order.created_on() == date)
            .cloned()
            .collect())
    }

    async fn delivered_orders_created_on(&self, date: NaiveDate) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .filter(|order| order.created_on() == date && order.state().is_delivered())
            .cloned()
            .collect())
    }

    async fn on_delivery_orders_by(&self, worker: &Username) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state.on_delivery_by(worker).cloned().collect())
    }
}
