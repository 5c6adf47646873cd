//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    AdvanceRequest, CreateOrderRequest, Order, OrderDetail, StatusChangeResponse,
    StatusUpdateRequest,
};
use shared::order::TrackingView;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::validate;

/// 追踪查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingQuery {
    /// 追踪页已打开的秒数，提供时返回模拟的显示状态
    pub elapsed_secs: Option<u64>,
}

/// 新建追踪会话的响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSessionResponse {
    pub session_id: String,
    pub tracking: TrackingView,
}

/// POST /api/orders - 结账下单
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.orders.create_order(&user, req).await?;
    Ok(Json(detail))
}

/// GET /api/orders - 我的订单 (最新在前)
pub async fn list(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_for_user(&user.id).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(state.orders.get_order(&user, &id).await?))
}

/// GET /api/orders/{id}/tracking?elapsedSecs=
pub async fn tracking(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<TrackingQuery>,
) -> AppResult<Json<TrackingView>> {
    Ok(Json(
        state.orders.tracking(&user, &id, query.elapsed_secs).await?,
    ))
}

/// POST /api/orders/{id}/tracking/sessions - 打开服务端追踪会话
pub async fn open_tracking_session(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<TrackingSessionResponse>> {
    let order = state.orders.visible_order(&user, &id).await?;
    let session = state.tracking.open(&order, &user.id);
    Ok(Json(TrackingSessionResponse {
        session_id: session.session_id,
        tracking: TrackingView::at_display(
            &order.id,
            &order.order_number,
            order.status,
            session.display_status,
            order.estimated_time.as_deref(),
        ),
    }))
}

/// PUT /api/orders/{id}/status - 设置目标状态
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<StatusChangeResponse>> {
    validate(&req)?;
    let resp = state
        .orders
        .set_status(&user, &id, &req.status, req.estimated_time)
        .await?;
    Ok(Json(resp))
}

/// POST /api/orders/{id}/advance - 推进到下一状态
pub async fn advance(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<AdvanceRequest>,
) -> AppResult<Json<StatusChangeResponse>> {
    let resp = state.orders.advance(&user, &id, req.estimated_time).await?;
    Ok(Json(resp))
}

/// POST /api/orders/{id}/cancel - 取消订单
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<StatusChangeResponse>> {
    Ok(Json(state.orders.cancel(&user, &id).await?))
}
