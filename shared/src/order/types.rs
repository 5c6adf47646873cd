//! 订单类型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 订单类型 (外送 / 堂食 / 自取)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(rename = "dine-in")]
    DineIn,
    #[serde(rename = "takeaway")]
    Takeaway,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::DineIn => "dine-in",
            Self::Takeaway => "takeaway",
        }
    }

    /// 是否需要配送地址
    pub fn requires_address(&self) -> bool {
        matches!(self, Self::Delivery)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
