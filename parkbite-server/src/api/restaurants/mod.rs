//! Restaurant API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/restaurants/{id} | GET | 餐厅详情 | 无 |
//! | /api/restaurants/{id}/menu | GET | 分类菜单 (vegOnly, availableOnly) | 无 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants/{id}", get(handler::get_by_id))
        .route("/api/restaurants/{id}/menu", get(handler::menu))
}
