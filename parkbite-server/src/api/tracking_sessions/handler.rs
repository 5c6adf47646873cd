//! Tracking Session Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::order::TrackingView;
use shared::order::tracking::reconcile;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::tracking::SessionInfo;
use crate::utils::{AppError, AppResult, ErrorCode};

fn owned_session(state: &ServerState, user: &CurrentUser, sid: &str) -> AppResult<SessionInfo> {
    let info = state
        .tracking
        .get(sid)
        .ok_or_else(|| AppError::missing(ErrorCode::NotFound, sid))?;
    if info.opened_by != user.id {
        return Err(AppError::not_authorized());
    }
    Ok(info)
}

/// GET /api/tracking-sessions/{sid}
///
/// 显示状态来自会话，真实状态与预估时间每次从存储读取。
pub async fn get_view(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(sid): Path<String>,
) -> AppResult<Json<TrackingView>> {
    let info = owned_session(&state, &user, &sid)?;
    let order = state.orders.visible_order(&user, &info.order_id).await?;
    Ok(Json(TrackingView::at_display(
        &order.id,
        &order.order_number,
        order.status,
        reconcile(order.status, info.display_status),
        order.estimated_time.as_deref(),
    )))
}

/// DELETE /api/tracking-sessions/{sid}
pub async fn close(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(sid): Path<String>,
) -> AppResult<Json<bool>> {
    owned_session(&state, &user, &sid)?;
    Ok(Json(state.tracking.close(&sid).is_some()))
}
