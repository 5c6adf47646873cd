//! Tech Park API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/tech-parks | GET | 启用中的园区 | 无 |
//! | /api/tech-parks/{id} | GET | 单个园区 | 无 |
//! | /api/tech-parks/{id}/restaurants | GET | 园区内餐厅 | 无 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tech-parks", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/restaurants", get(handler::list_restaurants))
}
