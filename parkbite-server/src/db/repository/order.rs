//! Order Repository

use shared::models::{Order, OrderItem};
use shared::order::OrderStatus;

use super::{RepoError, RepoResult};
use crate::db::MemoryStore;

#[derive(Debug, Clone)]
pub struct OrderRepository {
    store: MemoryStore,
}

impl OrderRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Store a new order with its lines
    pub async fn create(&self, order: Order, items: Vec<OrderItem>) -> RepoResult<Order> {
        let tables = self.store.tables();
        if tables.orders.contains_key(&order.id) {
            return Err(RepoError::Duplicate(format!("Order {}", order.id)));
        }
        tables.order_items.insert(order.id.clone(), items);
        tables.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        Ok(self.store.tables().orders.get(id).map(|o| o.clone()))
    }

    /// Orders placed by a user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        Ok(self.collect(|o| o.user_id == user_id))
    }

    /// Orders of a restaurant, newest first, optionally filtered by status
    pub async fn find_by_restaurant(
        &self,
        restaurant_id: &str,
        statuses: Option<&[OrderStatus]>,
    ) -> RepoResult<Vec<Order>> {
        Ok(self.collect(|o| {
            o.restaurant_id == restaurant_id && statuses.is_none_or(|s| s.contains(&o.status))
        }))
    }

    /// Lines of an order
    pub async fn find_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        Ok(self
            .store
            .tables()
            .order_items
            .get(order_id)
            .map(|items| items.clone())
            .unwrap_or_default())
    }

    /// Mutate an order in place while holding its entry lock
    ///
    /// The closure sees the current stored value; returning `Err` leaves it untouched
    /// as long as the closure did not write before failing.
    pub async fn modify<R, E>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Order) -> Result<R, E>,
    ) -> RepoResult<Result<R, E>> {
        let mut order = self
            .store
            .tables()
            .orders
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {}", id)))?;
        Ok(f(order.value_mut()))
    }

    fn collect(&self, filter: impl Fn(&Order) -> bool) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .store
            .tables()
            .orders
            .iter()
            .filter(|o| filter(o.value()))
            .map(|o| o.value().clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        orders
    }
}
