//! 消息总线消息类型定义
//!
//! 订单创建、状态变更等事件在服务端进程内通过消息总线广播，
//! 载荷以 JSON 序列化，客户端可以用同样的类型解析。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

pub mod payload;
pub use payload::*;

/// 消息总线事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// 新订单 (发给餐厅经理)
    OrderCreated = 0,
    /// 订单状态变更 (发给下单用户)
    OrderStatusChanged = 1,
    /// 菜品变更
    MenuItemChanged = 2,
}

impl TryFrom<u8> for EventType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventType::OrderCreated),
            1 => Ok(EventType::OrderStatusChanged),
            2 => Ok(EventType::MenuItemChanged),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::OrderCreated => write!(f, "order_created"),
            EventType::OrderStatusChanged => write!(f, "order_status_changed"),
            EventType::MenuItemChanged => write!(f, "menu_item_changed"),
        }
    }
}

/// 消息总线消息体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    /// 接收者 (用户 ID 或餐厅 ID)，None 为广播
    pub target: Option<String>,
    pub payload: Vec<u8>,
}

impl BusMessage {
    pub fn new(event_type: EventType, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            target: None,
            payload,
        }
    }

    /// 设置接收者
    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }

    /// 序列化载荷并创建消息
    pub fn from_payload<T: Serialize>(
        event_type: EventType,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event_type, serde_json::to_vec(payload)?))
    }

    /// 创建新订单消息，接收者为餐厅
    pub fn order_created(payload: &OrderCreatedPayload) -> Result<Self, serde_json::Error> {
        Ok(Self::from_payload(EventType::OrderCreated, payload)?.with_target(&payload.restaurant_id))
    }

    /// 创建状态变更消息，接收者为下单用户
    pub fn order_status_changed(
        payload: &OrderStatusChangedPayload,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::from_payload(EventType::OrderStatusChanged, payload)?.with_target(&payload.user_id))
    }

    /// 创建菜品变更消息 (广播)
    pub fn menu_item_changed(payload: &MenuItemChangedPayload) -> Result<Self, serde_json::Error> {
        Self::from_payload(EventType::MenuItemChanged, payload)
    }

    /// 解析载荷为指定类型
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}
