//! 订单核心逻辑
//!
//! - [`pricing`]: 金额计算 (小计、配送费、GST、合计)
//! - [`status`]: 订单状态机
//! - [`cart`]: 购物车
//! - [`payment`]: 支付方式与状态
//! - [`tracking`]: 追踪视图与模拟进度

pub mod cart;
pub mod payment;
pub mod pricing;
pub mod status;
pub mod tracking;
pub mod types;

// Re-exports
pub use cart::{Cart, CartError, CartItem, MAX_LINE_QUANTITY};
pub use payment::{PaymentMethod, PaymentStatus};
pub use pricing::{OrderPricing, PricedLine, PricingCalculator};
pub use status::{
    ESTIMATED_TIME_OPTIONS, OrderStatus, STATUS_FLOW, StatusAction, Transition, TransitionError,
};
pub use tracking::{TrackingStep, TrackingView};
pub use types::OrderType;
