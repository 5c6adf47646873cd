//! Order API 模块
//!
//! | 路径 | 方法 | 说明 | 权限 |
//! |------|------|------|------|
//! | /api/orders | POST | 结账下单 | 员工 |
//! | /api/orders | GET | 我的订单 | 登录 |
//! | /api/orders/{id} | GET | 订单详情 | 下单人 / 本餐厅经理 |
//! | /api/orders/{id}/tracking | GET | 追踪视图 (elapsedSecs) | 下单人 / 本餐厅经理 |
//! | /api/orders/{id}/tracking/sessions | POST | 打开服务端追踪会话 | 下单人 / 本餐厅经理 |
//! | /api/orders/{id}/status | PUT | 设置目标状态 | 经理 |
//! | /api/orders/{id}/advance | POST | 推进到下一状态 | 经理 |
//! | /api/orders/{id}/cancel | POST | 取消订单 | 经理 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // 非经理在查找订单之前就被拒绝
    let manager_routes = Router::new()
        .route("/{id}/status", put(handler::set_status))
        .route("/{id}/advance", post(handler::advance))
        .route("/{id}/cancel", post(handler::cancel))
        .route_layer(middleware::from_fn(require_manager));

    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/tracking", get(handler::tracking))
        .route("/{id}/tracking/sessions", post(handler::open_tracking_session))
        .merge(manager_routes)
}
