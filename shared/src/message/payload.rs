use serde::{Deserialize, Serialize};

use crate::order::{OrderStatus, OrderType};

/// 新订单载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedPayload {
    pub order_id: String,
    pub order_number: String,
    pub restaurant_id: String,
    pub order_type: OrderType,
    pub total: i64,
}

/// 订单状态变更载荷，每次被接受的流转只发一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusChangedPayload {
    pub order_id: String,
    pub order_number: String,
    /// 接收者 (下单用户)
    pub user_id: String,
    pub restaurant_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub estimated_time: Option<String>,
    pub title: String,
    pub message: String,
}

/// 菜品变更类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuChange {
    Created,
    Updated,
    Deleted,
}

/// 菜品变更载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemChangedPayload {
    pub menu_item_id: String,
    pub restaurant_id: String,
    pub change: MenuChange,
}
