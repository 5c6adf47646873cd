//! ParkBite 统一错误系统
//!
//! 服务端所有失败最终都转换成 [`AppError`]，由 axum 渲染为
//! `{ code, message, details? }` 信封，HTTP 状态由 [`ErrorCode`] 决定。
//!
//! | 范围 | 类别 |
//! |------|------|
//! | 0xxx | 通用 (校验、未找到) |
//! | 1xxx | 认证 |
//! | 2xxx | 权限 |
//! | 3xxx | 购物车 |
//! | 4xxx | 订单与状态流转 |
//! | 5xxx | 支付 |
//! | 6xxx | 菜单 |
//! | 7xxx | 园区与餐厅 |
//! | 8xxx | 用户与通知 |
//! | 9xxx | 系统 |
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::missing(ErrorCode::OrderNotFound, "ord-42");
//! assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
//!
//! let body: ApiResponse<()> = err.into();
//! assert_eq!(body.code, Some(4001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
