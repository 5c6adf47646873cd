//! Tracking Session API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tracking-sessions/{sid} | GET | 会话当前的追踪视图 |
//! | /api/tracking-sessions/{sid} | DELETE | 关闭会话 |
//!
//! 会话由 `POST /api/orders/{id}/tracking/sessions` 打开，只有打开者可以访问。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/tracking-sessions/{sid}",
        get(handler::get_view).delete(handler::close),
    )
}
