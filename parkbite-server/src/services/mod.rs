//! 服务模块
//!
//! - [`https`]: HTTP 路由组装与中间件

pub mod https;

pub use https::{build_app, build_router};
