//! Notification Model

use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;

/// In-app notification, one per order status transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Recipient (order owner)
    pub user_id: String,
    pub order_id: String,
    pub order_number: String,
    /// Status the order moved into
    pub status: OrderStatus,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: i64,
}

/// Unread counter returned by mark-read operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread: usize,
}
