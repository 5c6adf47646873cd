//! 订单模块
//!
//! - **manager**: [`OrdersManager`]，下单、查询与经理发起的状态变更
//!
//! # 数据流
//!
//! ```text
//! POST /api/orders → OrdersManager::create_order
//!     ├─ 校验餐厅 / 菜品 / 配送地址
//!     ├─ PaymentGateway::charge (失败则不产生订单)
//!     ├─ OrderRepository::create
//!     └─ MessageBus: OrderCreated
//!
//! advance / cancel / set_status → status::apply (在订单条目锁内)
//!     └─ Changed → NotificationService (收件箱 + OrderStatusChanged)
//! ```

pub mod manager;

pub use manager::{ManagerError, ManagerResult, OrdersManager};

pub use shared::order::{OrderStatus, StatusAction, Transition, TransitionError};
