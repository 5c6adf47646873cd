//! GET /health - 存活检查 (无需认证)

use std::sync::LazyLock;
use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

static STARTED: LazyLock<Instant> = LazyLock::new(Instant::now);

pub fn router() -> Router<ServerState> {
    // 路由构建时开始计时
    LazyLock::force(&STARTED);
    Router::new().route("/health", get(health))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    Ok,
    /// 已收到停机信号，正在排空请求
    Stopping,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: Liveness,
    version: &'static str,
    environment: String,
    uptime_seconds: u64,
    tracking_sessions: usize,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let status = if state.is_shutting_down() {
        Liveness::Stopping
    } else {
        Liveness::Ok
    };
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        uptime_seconds: STARTED.elapsed().as_secs(),
        tracking_sessions: state.tracking.len(),
    })
}
