//! Auth API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/auth/login | POST | 演示账号登录，签发 JWT | 无 |
//! | /api/auth/me | GET | 当前用户 | 登录 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/auth",
        Router::new()
            .route("/login", post(handler::login))
            .route("/me", get(handler::me)),
    )
}
