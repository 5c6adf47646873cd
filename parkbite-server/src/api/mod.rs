//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录与当前用户
//! - [`tech_parks`] - 科技园区与园区内餐厅
//! - [`restaurants`] - 餐厅详情与菜单
//! - [`menu_items`] - 菜品管理 (餐厅经理)
//! - [`orders`] - 下单、订单查询、追踪与状态变更
//! - [`tracking_sessions`] - 服务端追踪会话
//! - [`restaurant_orders`] - 餐厅订单看板 (餐厅经理)
//! - [`notifications`] - 用户通知

pub mod auth;
pub mod health;
pub mod menu_items;
pub mod notifications;
pub mod orders;
pub mod restaurant_orders;
pub mod restaurants;
pub mod tech_parks;
pub mod tracking_sessions;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
