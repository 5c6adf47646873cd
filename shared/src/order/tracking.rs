//! 订单追踪视图
//!
//! 追踪页展示的时间线与模拟进度。模拟进度只是显示用的投影：
//! 从打开页面时的状态开始，每个间隔向前推进一步，最多到 `delivered`，
//! 不会修改订单的真实状态，也不会推进已取消的订单。

use serde::{Deserialize, Serialize};

use super::status::{OrderStatus, STATUS_FLOW};

/// 模拟推进的默认间隔 (秒)
pub const DEFAULT_SIMULATION_INTERVAL_SECS: u64 = 30;

/// 时间线中的一步
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStep {
    pub status: OrderStatus,
    pub label: String,
    pub icon: String,
    pub done: bool,
    pub current: bool,
}

/// 追踪视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub order_id: String,
    pub order_number: String,
    /// 存储中的真实状态
    pub status: OrderStatus,
    /// 页面显示的状态 (可能是模拟推进后的状态)
    pub display_status: OrderStatus,
    pub simulated: bool,
    pub label: String,
    pub icon: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub eta_text: String,
    pub steps: Vec<TrackingStep>,
}

impl TrackingView {
    /// 构建追踪视图
    ///
    /// `elapsed_secs` 为页面已打开的秒数，`None` 表示不做模拟。
    pub fn build(
        order_id: &str,
        order_number: &str,
        status: OrderStatus,
        estimated_time: Option<&str>,
        elapsed_secs: Option<u64>,
        interval_secs: u64,
    ) -> Self {
        let display_status = match elapsed_secs {
            Some(elapsed) => simulated_status(status, elapsed, interval_secs),
            None => status,
        };
        Self::at_display(order_id, order_number, status, display_status, estimated_time)
    }

    /// 以给定的显示状态构建视图 (服务端追踪会话使用)
    pub fn at_display(
        order_id: &str,
        order_number: &str,
        status: OrderStatus,
        display_status: OrderStatus,
        estimated_time: Option<&str>,
    ) -> Self {
        Self {
            order_id: order_id.to_string(),
            order_number: order_number.to_string(),
            status,
            display_status,
            simulated: display_status != status,
            label: display_status.label().to_string(),
            icon: display_status.icon().to_string(),
            description: display_status.description().to_string(),
            estimated_time: estimated_time.map(str::to_string),
            eta_text: eta_text(display_status, estimated_time),
            steps: timeline(display_status),
        }
    }
}

/// 模拟状态：从 `start` 开始每 `interval_secs` 秒前进一步，封顶 `delivered`
pub fn simulated_status(start: OrderStatus, elapsed_secs: u64, interval_secs: u64) -> OrderStatus {
    let Some(start_index) = start.flow_index() else {
        return start;
    };
    if interval_secs == 0 {
        return start;
    }
    let steps = usize::try_from(elapsed_secs / interval_secs).unwrap_or(usize::MAX);
    let index = start_index.saturating_add(steps).min(STATUS_FLOW.len() - 1);
    STATUS_FLOW[index]
}

/// 合并真实状态与模拟状态
///
/// 模拟只会领先于真实状态；真实状态追上、超过或被取消时以真实状态为准。
pub fn reconcile(stored: OrderStatus, simulated: OrderStatus) -> OrderStatus {
    match (stored.flow_index(), simulated.flow_index()) {
        (Some(s), Some(d)) if d > s => simulated,
        _ => stored,
    }
}

/// 时间线 (已取消的订单只显示已完成的步骤加上取消)
pub fn timeline(display: OrderStatus) -> Vec<TrackingStep> {
    let step = |status: OrderStatus, done: bool, current: bool| TrackingStep {
        status,
        label: status.label().to_string(),
        icon: status.icon().to_string(),
        done,
        current,
    };

    match display.flow_index() {
        Some(current) => STATUS_FLOW
            .iter()
            .enumerate()
            .map(|(i, s)| step(*s, i <= current, i == current))
            .collect(),
        None => vec![
            step(OrderStatus::Placed, true, false),
            step(OrderStatus::Cancelled, true, true),
        ],
    }
}

/// ETA 文案
pub fn eta_text(status: OrderStatus, estimated_time: Option<&str>) -> String {
    match (status, estimated_time) {
        (OrderStatus::Placed, _) => "Waiting for the restaurant to confirm".to_string(),
        (OrderStatus::Confirmed | OrderStatus::Preparing, Some(eta)) => format!("Ready in {eta}"),
        (OrderStatus::Confirmed | OrderStatus::Preparing, None) => "Preparing soon".to_string(),
        (OrderStatus::Ready, _) => "Ready now".to_string(),
        (OrderStatus::Dispatched, _) => "Arriving soon".to_string(),
        (OrderStatus::Delivered, _) => "Delivered".to_string(),
        (OrderStatus::Cancelled, _) => "Cancelled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_steps_once_per_interval() {
        let start = OrderStatus::Confirmed;
        assert_eq!(simulated_status(start, 0, 30), OrderStatus::Confirmed);
        assert_eq!(simulated_status(start, 29, 30), OrderStatus::Confirmed);
        assert_eq!(simulated_status(start, 30, 30), OrderStatus::Preparing);
        assert_eq!(simulated_status(start, 95, 30), OrderStatus::Dispatched);
    }

    #[test]
    fn test_simulation_caps_at_delivered() {
        assert_eq!(
            simulated_status(OrderStatus::Placed, u64::MAX, 30),
            OrderStatus::Delivered
        );
        assert_eq!(
            simulated_status(OrderStatus::Delivered, 600, 30),
            OrderStatus::Delivered
        );
    }

    #[test]
    fn test_cancelled_never_advances() {
        assert_eq!(
            simulated_status(OrderStatus::Cancelled, 600, 30),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_zero_interval_is_frozen() {
        assert_eq!(simulated_status(OrderStatus::Ready, 600, 0), OrderStatus::Ready);
    }

    #[test]
    fn test_reconcile_prefers_real_progress() {
        assert_eq!(
            reconcile(OrderStatus::Confirmed, OrderStatus::Ready),
            OrderStatus::Ready
        );
        assert_eq!(
            reconcile(OrderStatus::Dispatched, OrderStatus::Ready),
            OrderStatus::Dispatched
        );
        assert_eq!(
            reconcile(OrderStatus::Cancelled, OrderStatus::Ready),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_timeline_marks_current() {
        let steps = timeline(OrderStatus::Preparing);
        assert_eq!(steps.len(), 6);
        assert!(steps[0].done && steps[1].done && steps[2].done);
        assert!(steps[2].current);
        assert!(!steps[3].done);

        let cancelled = timeline(OrderStatus::Cancelled);
        assert_eq!(cancelled.last().unwrap().status, OrderStatus::Cancelled);
    }

    #[test]
    fn test_view_reports_simulation() {
        let view = TrackingView::build(
            "o1",
            "ORD-2025-0001",
            OrderStatus::Confirmed,
            Some("15-20 min"),
            Some(60),
            30,
        );
        assert_eq!(view.status, OrderStatus::Confirmed);
        assert_eq!(view.display_status, OrderStatus::Ready);
        assert!(view.simulated);

        let view = TrackingView::build(
            "o1",
            "ORD-2025-0001",
            OrderStatus::Preparing,
            Some("15-20 min"),
            None,
            30,
        );
        assert!(!view.simulated);
        assert_eq!(view.eta_text, "Ready in 15-20 min");
    }
}
