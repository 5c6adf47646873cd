//! Restaurant Order Board API (餐厅经理)
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/restaurant/orders | GET | 本餐厅订单 (status=placed,confirmed) |

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurant/orders", get(handler::list))
        .route_layer(middleware::from_fn(require_manager))
}
