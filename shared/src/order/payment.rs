//! 支付方式与支付状态

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::OrderType;

/// 支付方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
    Wallet,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Card => "card",
            Self::Wallet => "wallet",
            Self::Cash => "cash",
        }
    }

    /// 是否为电子支付 (需经过支付网关)
    pub fn is_electronic(&self) -> bool {
        !matches!(self, Self::Cash)
    }

    /// 订单类型可用的支付方式
    pub fn available_for(order_type: OrderType) -> &'static [PaymentMethod] {
        match order_type {
            OrderType::Delivery | OrderType::Takeaway => &[Self::Upi, Self::Card, Self::Wallet, Self::Cash],
            OrderType::DineIn => &[Self::Upi, Self::Card, Self::Cash],
        }
    }

    pub fn is_available_for(&self, order_type: OrderType) -> bool {
        Self::available_for(order_type).contains(self)
    }

    /// 创建订单时的初始支付状态
    pub fn initial_status(&self) -> PaymentStatus {
        if self.is_electronic() {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 支付状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}
