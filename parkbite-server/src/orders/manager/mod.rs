//! OrdersManager - checkout, order queries and manager status changes
//!
//! # Status change flow
//!
//! ```text
//! advance / cancel / set_status(user, order_id, ..)
//!     ├─ 1. Caller must manage a restaurant (ManagerRequired)
//!     ├─ 2. Lock the order entry (OrderNotFound)
//!     ├─ 3. Order must belong to that restaurant (NotAuthorized, unchanged)
//!     ├─ 4. status::apply → Changed | Unchanged | Err (unchanged)
//!     ├─ 5. Changed: write status / estimate / payment settlement
//!     └─ 6. Changed: exactly one notification to the order's owner
//! ```

mod error;
pub use error::*;

use std::sync::Arc;

use shared::message::{BusMessage, OrderCreatedPayload};
use shared::models::{
    CreateOrderRequest, Order, OrderDetail, OrderItem, StatusChangeResponse,
};
use shared::order::{
    OrderStatus, PaymentMethod, PaymentStatus, PricedLine, StatusAction, Transition,
    TrackingView,
};
use shared::util::{generate_order_number, new_id, now_millis};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::db::MemoryStore;
use crate::db::repository::{
    CatalogRepository, MenuItemRepository, OrderRepository, RepoError, Repository,
};
use crate::message::MessageBus;
use crate::notifications::NotificationService;
use crate::payment::{PaymentGateway, PaymentRequest};

/// OrdersManager
///
/// Cheap to clone; all state lives in the shared store.
#[derive(Clone)]
pub struct OrdersManager {
    orders: OrderRepository,
    catalog: CatalogRepository,
    menu_items: MenuItemRepository,
    payments: Arc<dyn PaymentGateway>,
    notifications: NotificationService,
    bus: MessageBus,
    tracking_interval_secs: u64,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("payments", &self.payments)
            .field("tracking_interval_secs", &self.tracking_interval_secs)
            .finish()
    }
}

impl OrdersManager {
    pub fn new(
        store: MemoryStore,
        payments: Arc<dyn PaymentGateway>,
        notifications: NotificationService,
        bus: MessageBus,
        tracking_interval_secs: u64,
    ) -> Self {
        Self {
            orders: OrderRepository::new(store.clone()),
            catalog: CatalogRepository::new(store.clone()),
            menu_items: MenuItemRepository::new(store),
            payments,
            notifications,
            bus,
            tracking_interval_secs,
        }
    }

    // ========================================================================
    // Checkout
    // ========================================================================

    /// Place an order: validate, charge, store, publish
    ///
    /// Submitted totals are stored as-is. A failed payment leaves no order behind.
    pub async fn create_order(
        &self,
        user: &CurrentUser,
        req: CreateOrderRequest,
    ) -> ManagerResult<OrderDetail> {
        user.require_employee()?;
        req.validate()?;

        let restaurant = self
            .catalog
            .find_restaurant(&req.restaurant_id)
            .await?
            .ok_or_else(|| ManagerError::RestaurantNotFound(req.restaurant_id.clone()))?;
        if !restaurant.is_open {
            return Err(ManagerError::RestaurantClosed(restaurant.id));
        }

        for line in &req.items {
            let item = self
                .menu_items
                .find_by_id(&line.menu_item_id)
                .await?
                .filter(|m| m.restaurant_id == restaurant.id)
                .ok_or_else(|| ManagerError::MenuItemNotFound(line.menu_item_id.clone()))?;
            if !item.is_available {
                return Err(ManagerError::MenuItemUnavailable(item.id));
            }
        }

        let delivery_address = non_blank(req.delivery_address);
        if req.order_type.requires_address() && delivery_address.is_none() {
            return Err(ManagerError::DeliveryAddressRequired);
        }

        // 明细在扣款前生成，扣款之后只剩写库
        let order_id = new_id();
        let items: Vec<OrderItem> = req
            .items
            .iter()
            .map(|line| OrderItem {
                id: new_id(),
                order_id: order_id.clone(),
                menu_item_id: line.menu_item_id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                price: line.price,
                total: line.line_total(),
            })
            .collect();

        let receipt = self
            .payments
            .charge(&PaymentRequest {
                user_id: user.id.clone(),
                restaurant_id: restaurant.id.clone(),
                order_type: req.order_type,
                method: req.payment_method,
                amount: req.total,
            })
            .await?;

        let now = now_millis();
        let order = Order {
            id: order_id.clone(),
            order_number: generate_order_number(),
            user_id: user.id.clone(),
            restaurant_id: restaurant.id.clone(),
            order_type: req.order_type,
            status: OrderStatus::Placed,
            subtotal: req.subtotal,
            delivery_charge: req.delivery_charge,
            gst: req.gst,
            total: req.total,
            payment_method: req.payment_method,
            payment_status: receipt.status,
            payment_reference: receipt.reference,
            delivery_address,
            special_instructions: non_blank(req.special_instructions),
            estimated_time: None,
            created_at: now,
            updated_at: now,
        };
        let order = self.orders.create(order, items.clone()).await?;

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            restaurant_id = %order.restaurant_id,
            order_type = %order.order_type,
            total = order.total,
            "Order placed"
        );

        let payload = OrderCreatedPayload {
            order_id: order.id.clone(),
            order_number: order.order_number.clone(),
            restaurant_id: order.restaurant_id.clone(),
            order_type: order.order_type,
            total: order.total,
        };
        match BusMessage::order_created(&payload) {
            Ok(msg) => {
                self.bus.publish(msg);
            }
            Err(e) => tracing::error!(error = %e, order_id = %order.id, "Failed to encode order event"),
        }

        Ok(OrderDetail { order, items })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Order with lines, visible to its owner and the owning manager
    pub async fn get_order(&self, user: &CurrentUser, order_id: &str) -> ManagerResult<OrderDetail> {
        let order = self.visible_order(user, order_id).await?;
        let items = self.orders.find_items(&order.id).await?;
        Ok(OrderDetail { order, items })
    }

    /// Orders placed by the user, newest first
    pub async fn list_for_user(&self, user_id: &str) -> ManagerResult<Vec<Order>> {
        Ok(self.orders.find_by_user(user_id).await?)
    }

    /// Orders of the manager's restaurant, newest first
    pub async fn list_for_restaurant(
        &self,
        user: &CurrentUser,
        statuses: Option<&[OrderStatus]>,
    ) -> ManagerResult<Vec<Order>> {
        let restaurant_id = user.managed_restaurant()?;
        Ok(self
            .orders
            .find_by_restaurant(restaurant_id, statuses)
            .await?)
    }

    pub async fn order_items(&self, user: &CurrentUser, order_id: &str) -> ManagerResult<Vec<OrderItem>> {
        let order = self.visible_order(user, order_id).await?;
        Ok(self.orders.find_items(&order.id).await?)
    }

    /// Tracking view; `elapsed_secs` enables the simulated display status
    pub async fn tracking(
        &self,
        user: &CurrentUser,
        order_id: &str,
        elapsed_secs: Option<u64>,
    ) -> ManagerResult<TrackingView> {
        let order = self.visible_order(user, order_id).await?;
        Ok(TrackingView::build(
            &order.id,
            &order.order_number,
            order.status,
            order.estimated_time.as_deref(),
            elapsed_secs,
            self.tracking_interval_secs,
        ))
    }

    /// Load an order the user may see: owner or owning manager
    pub async fn visible_order(&self, user: &CurrentUser, order_id: &str) -> ManagerResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))?;
        if order.user_id == user.id || user.manages(&order.restaurant_id) {
            Ok(order)
        } else {
            Err(ManagerError::NotAuthorized)
        }
    }

    // ========================================================================
    // Status changes
    // ========================================================================

    /// Move to the next status in the flow
    pub async fn advance(
        &self,
        user: &CurrentUser,
        order_id: &str,
        estimated_time: Option<String>,
    ) -> ManagerResult<StatusChangeResponse> {
        self.change_status(user, order_id, StatusAction::Advance { estimated_time })
            .await
    }

    /// Cancel from any non-terminal status
    pub async fn cancel(&self, user: &CurrentUser, order_id: &str) -> ManagerResult<StatusChangeResponse> {
        self.change_status(user, order_id, StatusAction::Cancel).await
    }

    /// Move to an explicit target status
    pub async fn set_status(
        &self,
        user: &CurrentUser,
        order_id: &str,
        target: &str,
        estimated_time: Option<String>,
    ) -> ManagerResult<StatusChangeResponse> {
        let target = target.parse::<OrderStatus>()?;
        self.change_status(
            user,
            order_id,
            StatusAction::SetStatus {
                target,
                estimated_time,
            },
        )
        .await
    }

    async fn change_status(
        &self,
        user: &CurrentUser,
        order_id: &str,
        action: StatusAction,
    ) -> ManagerResult<StatusChangeResponse> {
        let restaurant_id = user.managed_restaurant()?.to_string();

        let (transition, order) = self
            .orders
            .modify(order_id, |order| {
                if order.restaurant_id != restaurant_id {
                    return Err(ManagerError::NotAuthorized);
                }
                let transition = shared::order::status::apply(order.status, action)?;
                if let Transition::Changed {
                    to, estimated_time, ..
                } = &transition
                {
                    order.status = *to;
                    if estimated_time.is_some() {
                        order.estimated_time = estimated_time.clone();
                    }
                    if *to == OrderStatus::Delivered && order.payment_method == PaymentMethod::Cash {
                        order.payment_status = PaymentStatus::Paid;
                    }
                    order.updated_at = now_millis();
                }
                Ok((transition, order.clone()))
            })
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => ManagerError::OrderNotFound(order_id.to_string()),
                other => other.into(),
            })?
            .inspect_err(|e| {
                tracing::warn!(order_id = %order_id, manager_id = %user.id, error = %e, "Status change rejected");
            })?;

        let previous_status = match transition {
            Transition::Changed { from, to, .. } => {
                tracing::info!(
                    order_id = %order.id,
                    order_number = %order.order_number,
                    from = %from,
                    to = %to,
                    manager_id = %user.id,
                    "Order status changed"
                );
                self.notifications.notify_status_change(&order, from).await?;
                from
            }
            Transition::Unchanged(status) => status,
        };

        Ok(StatusChangeResponse {
            changed: transition.is_changed(),
            previous_status,
            order,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests;
