//! Order entity.

use chrono::{NaiveDate, Utc};
use common::{CommissionId, OrderId, Username};
use serde::{Deserialize, Serialize};

use crate::config::DispatchConfig;

use super::{Commission, CommissionPolicy, Money, OrderError, OrderState, OrderType};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A delivery order placed by a client.
///
/// The lifecycle state is only changed through [`Order::change_state`],
/// which is also where the commission gets settled on delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    id: OrderId,

    /// Client who placed the order.
    client: Username,

    /// Menu the order was placed for.
    order_type: OrderType,

    /// Bag capacity the order occupies.
    size: u32,

    /// Price of the order.
    cost: Money,

    /// Current state of the order.
    state: OrderState,

    /// Client rating, only ever set on delivered orders.
    rating: Option<u8>,

    /// Worker carrying the order.
    assigned_to: Option<Username>,

    /// Commission earned by the carrying worker, settled on delivery.
    commission: Commission,

    /// Policy the commission is settled with.
    commission_policy: CommissionPolicy,

    /// Day the order was placed.
    created_on: NaiveDate,
}

impl Order {
    /// Creates a received order, pricing and sizing it from the configured menu.
    pub fn new(client: impl Into<Username>, order_type: OrderType, config: &DispatchConfig) -> Self {
        let entry = config.menu.entry(order_type);
        Self {
            id: OrderId::new(),
            client: client.into(),
            order_type,
            size: entry.size,
            cost: entry.price,
            state: OrderState::default(),
            rating: None,
            assigned_to: None,
            commission: Commission::default(),
            commission_policy: config.commission,
            created_on: Utc::now().date_naive(),
        }
    }

    /// Creates an order from an external type label.
    ///
    /// Fails with [`OrderError::UnrecognizedOrderType`] for unknown labels.
    pub fn from_label(
        client: impl Into<Username>,
        label: &str,
        config: &DispatchConfig,
    ) -> Result<Self, OrderError> {
        let order_type = label.parse()?;
        Ok(Self::new(client, order_type, config))
    }

    /// Overrides the day the order was placed.
    pub fn with_created_on(mut self, created_on: NaiveDate) -> Self {
        self.created_on = created_on;
        self
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the client who placed the order.
    pub fn client(&self) -> &Username {
        &self.client
    }

    /// Returns true if the order belongs to `client`.
    pub fn belongs_to(&self, client: &Username) -> bool {
        &self.client == client
    }

    /// Returns the order type.
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Returns the bag capacity the order occupies.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the order cost.
    pub fn cost(&self) -> Money {
        self.cost
    }

    /// Returns the current state.
    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Returns the rating, if any.
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// Returns the worker the order is assigned to.
    pub fn assigned_to(&self) -> Option<&Username> {
        self.assigned_to.as_ref()
    }

    /// Returns true if the order is assigned to `worker`.
    pub fn is_assigned_to(&self, worker: &Username) -> bool {
        self.assigned_to.as_ref() == Some(worker)
    }

    /// Returns the commission.
    pub fn commission(&self) -> &Commission {
        &self.commission
    }

    /// Returns the day the order was placed.
    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }
}

// Mutations
impl Order {
    /// Replaces the current state.
    ///
    /// No transition table is enforced here. Entering the delivered state
    /// settles the commission with the weather carried by that state.
    pub fn change_state(&mut self, new_state: OrderState) {
        tracing::debug!(
            order_id = %self.id,
            from = %self.state,
            to = %new_state,
            "order state changed"
        );
        self.state = new_state;

        if let OrderState::Delivered { weather } = new_state
            && !self.commission.is_earned()
        {
            self.commission = Commission::settle(self.cost, weather, &self.commission_policy);
            metrics::counter!("dispatch_commissions_settled_total").increment(1);
            tracing::debug!(
                order_id = %self.id,
                ?weather,
                amount = ?self.commission.amount().ok(),
                "commission settled"
            );
        }
    }

    /// Rates the order.
    ///
    /// Silently ignored unless the order is delivered and the value lies in
    /// `MIN_RATING..=MAX_RATING`.
    pub fn set_rating(&mut self, value: u8) {
        if self.state.can_rate() && (MIN_RATING..=MAX_RATING).contains(&value) {
            self.rating = Some(value);
        }
    }

    /// Binds the order to a worker.
    pub fn assign_to(&mut self, worker: Username) {
        self.assigned_to = Some(worker);
    }

    /// Records the ID a store assigned to the settled commission.
    pub fn record_commission_id(&mut self, id: CommissionId) {
        self.commission.set_id(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Weather;

    fn individual() -> Order {
        Order::new("jperez", OrderType::Individual, &DispatchConfig::default())
    }

    fn delivered() -> Order {
        let mut order = individual();
        order.change_state(OrderState::Delivered {
            weather: Weather::NonRainy,
        });
        order
    }

    #[test]
    fn test_new_order_is_received_and_unassigned() {
        let order = individual();
        assert_eq!(order.state(), OrderState::Received);
        assert_eq!(order.assigned_to(), None);
        assert_eq!(order.rating(), None);
        assert_eq!(order.client().as_str(), "jperez");
    }

    #[test]
    fn test_size_and_cost_come_from_menu() {
        let config = DispatchConfig::default();
        let family = Order::new("jperez", OrderType::Family, &config);
        assert_eq!(family.size(), config.menu.family.size);
        assert_eq!(family.cost(), config.menu.family.price);
        assert!(family.size() > individual().size());
    }

    #[test]
    fn test_from_label_rejects_unknown_type() {
        let result = Order::from_label("jperez", "banquet", &DispatchConfig::default());
        assert!(matches!(result, Err(OrderError::UnrecognizedOrderType(_))));
    }

    #[test]
    fn test_rating_on_delivered_order() {
        let mut order = delivered();
        order.set_rating(3);
        assert_eq!(order.rating(), Some(3));
    }

    #[test]
    fn test_rating_out_of_range_is_ignored() {
        let mut order = delivered();
        order.set_rating(6);
        assert_eq!(order.rating(), None);
        order.set_rating(0);
        assert_eq!(order.rating(), None);
    }

    #[test]
    fn test_rating_before_delivery_is_ignored() {
        let mut order = individual();
        order.set_rating(3);
        assert_eq!(order.rating(), None);

        order.change_state(OrderState::OnDelivery);
        order.set_rating(4);
        assert_eq!(order.rating(), None);
    }

    #[test]
    fn test_invalid_rating_keeps_previous_one() {
        let mut order = delivered();
        order.set_rating(5);
        order.set_rating(9);
        assert_eq!(order.rating(), Some(5));
    }

    #[test]
    fn test_commission_pending_until_delivered() {
        let mut order = individual();
        assert!(matches!(
            order.commission().amount(),
            Err(OrderError::OrderNotDelivered)
        ));
        assert_eq!(order.commission().id(), CommissionId::NOT_DELIVERED);

        order.change_state(OrderState::OnDelivery);
        assert!(!order.commission().is_earned());
    }

    #[test]
    fn test_delivery_settles_commission() {
        let order = delivered();
        let expected = order.cost().scale(0.05);
        assert_eq!(order.commission().amount().unwrap(), expected);
    }

    #[test]
    fn test_rainy_delivery_settles_higher_commission() {
        let mut dry = individual();
        dry.change_state(OrderState::Delivered {
            weather: Weather::NonRainy,
        });
        let mut wet = individual();
        wet.change_state(OrderState::Delivered {
            weather: Weather::Rainy,
        });

        assert!(wet.commission().amount().unwrap() > dry.commission().amount().unwrap());
        assert!(wet.commission().weather().is_rainy());
    }

    #[test]
    fn test_redelivery_keeps_saved_commission() {
        let mut order = delivered();
        order.record_commission_id(CommissionId::new(4));
        order.change_state(OrderState::Delivered {
            weather: Weather::Rainy,
        });
        assert_eq!(order.commission().id().value(), 4);
        assert_eq!(order.commission().weather(), Weather::NonRainy);
    }

    #[test]
    fn test_assign_to_binds_worker() {
        let mut order = individual();
        order.assign_to(Username::from("pepemoto"));
        assert!(order.is_assigned_to(&Username::from("pepemoto")));
        assert!(!order.is_assigned_to(&Username::from("pepeauto")));
    }
}
