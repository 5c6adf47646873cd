//! Notification Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Notification, UnreadCount};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/notifications
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    Ok(Json(state.notifications.list(&user.id).await?))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UnreadCount>> {
    let unread = state.notifications.unread_count(&user.id).await?;
    Ok(Json(UnreadCount { unread }))
}

/// POST /api/notifications/{id}/read
///
/// 其他用户的通知按不存在处理
pub async fn mark_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Notification>> {
    Ok(Json(state.notifications.mark_read(&user.id, &id).await?))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UnreadCount>> {
    let unread = state.notifications.mark_all_read(&user.id).await?;
    Ok(Json(UnreadCount { unread }))
}
