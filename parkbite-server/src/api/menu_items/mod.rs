//! Menu Item API 模块 (餐厅经理)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/menu-items | POST | 在本餐厅创建菜品 |
//! | /api/menu-items/{id} | PUT | 更新本餐厅菜品 |
//! | /api/menu-items/{id} | DELETE | 删除本餐厅菜品 |
//! | /api/menu-items/{id}/availability | PATCH | 切换库存状态 |

mod handler;

use axum::{
    Router, middleware,
    routing::{patch, post, put},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/availability", patch(handler::set_availability))
        .route_layer(middleware::from_fn(require_manager))
}
