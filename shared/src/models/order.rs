//! Order Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::order::{OrderPricing, OrderStatus, OrderType, PaymentMethod, PaymentStatus, PricedLine};

/// Order entity
///
/// Totals are stored exactly as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Display number, `ORD-<year>-<4 digits>`
    pub order_number: String,
    pub user_id: String,
    pub restaurant_id: String,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub subtotal: i64,
    pub delivery_charge: i64,
    pub gst: i64,
    pub total: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    /// Gateway transaction reference (electronic payments)
    pub payment_reference: Option<String>,
    pub delivery_address: Option<String>,
    pub special_instructions: Option<String>,
    /// Preparation estimate chosen when the order was confirmed
    pub estimated_time: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn pricing(&self) -> OrderPricing {
        OrderPricing {
            subtotal: self.subtotal,
            delivery_charge: self.delivery_charge,
            gst: self.gst,
            total: self.total,
        }
    }
}

/// Order line, price snapshot at order time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: i64,
    pub total: i64,
}

/// Order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Submitted order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    #[validate(length(min = 1, message = "menu item is required"))]
    pub menu_item_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 99, message = "quantity must be between 1 and 99"))]
    pub quantity: u32,
    #[validate(range(min = 0, max = 100000, message = "price must be between 0 and 100000"))]
    pub price: i64,
}

impl PricedLine for OrderItemInput {
    fn unit_price(&self) -> i64 {
        self.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "restaurant is required"))]
    pub restaurant_id: String,
    pub order_type: OrderType,
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub items: Vec<OrderItemInput>,
    #[validate(range(min = 0))]
    pub subtotal: i64,
    #[validate(range(min = 0))]
    pub delivery_charge: i64,
    #[validate(range(min = 0))]
    pub gst: i64,
    #[validate(range(min = 0))]
    pub total: i64,
    pub payment_method: PaymentMethod,
    #[validate(length(max = 500))]
    pub delivery_address: Option<String>,
    #[validate(length(max = 500))]
    pub special_instructions: Option<String>,
}

/// Advance payload (estimate required when leaving `placed`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceRequest {
    pub estimated_time: Option<String>,
}

/// Set-status payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
    pub estimated_time: Option<String>,
}

/// Order list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    /// Single status, or comma separated list
    pub status: Option<String>,
}

/// Result of a status change request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    pub order: Order,
    /// False when the request was a no-op (same status)
    pub changed: bool,
    pub previous_status: OrderStatus,
}
