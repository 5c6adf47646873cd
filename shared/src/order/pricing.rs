//! 订单金额计算
//!
//! 纯函数：`(购物车明细, 订单类型) → OrderPricing`，每次购物车变化都重新计算。
//!
//! - `subtotal = Σ price × quantity`
//! - `deliveryCharge = 25` (仅外送)
//! - `gst = round((subtotal + deliveryCharge) × 5%)`，四舍五入 (远离零)
//! - `total = subtotal + deliveryCharge + gst`
//!
//! 所有金额为整数货币单位，累加一律饱和，不会溢出。

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::OrderType;

/// 外送费
pub const DELIVERY_CHARGE: i64 = 25;

/// GST 税率 (5%)
pub const GST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// 订单金额明细
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPricing {
    pub subtotal: i64,
    pub delivery_charge: i64,
    pub gst: i64,
    pub total: i64,
}

/// 可计价的明细行
pub trait PricedLine {
    /// 单价
    fn unit_price(&self) -> i64;
    /// 数量
    fn quantity(&self) -> u32;

    fn line_total(&self) -> i64 {
        self.unit_price().saturating_mul(i64::from(self.quantity()))
    }
}

impl<T: PricedLine + ?Sized> PricedLine for &T {
    fn unit_price(&self) -> i64 {
        (**self).unit_price()
    }

    fn quantity(&self) -> u32 {
        (**self).quantity()
    }
}

/// 金额计算器
pub struct PricingCalculator;

impl PricingCalculator {
    /// 配送费
    pub fn delivery_charge(order_type: OrderType) -> i64 {
        match order_type {
            OrderType::Delivery => DELIVERY_CHARGE,
            OrderType::DineIn | OrderType::Takeaway => 0,
        }
    }

    /// 对应税基的 GST，四舍五入到整数 (0.5 进位)
    pub fn gst(taxable: i64) -> i64 {
        (Decimal::from(taxable) * GST_RATE)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or_default()
    }

    /// 由小计推出完整金额
    pub fn from_subtotal(subtotal: i64, order_type: OrderType) -> OrderPricing {
        let delivery_charge = Self::delivery_charge(order_type);
        let taxable = subtotal.saturating_add(delivery_charge);
        let gst = Self::gst(taxable);
        OrderPricing {
            subtotal,
            delivery_charge,
            gst,
            total: taxable.saturating_add(gst),
        }
    }

    /// 计算一组明细行的金额
    pub fn calculate<L: PricedLine>(
        lines: impl IntoIterator<Item = L>,
        order_type: OrderType,
    ) -> OrderPricing {
        let subtotal = lines
            .into_iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.line_total()));
        Self::from_subtotal(subtotal, order_type)
    }
}
