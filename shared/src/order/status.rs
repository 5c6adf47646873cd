//! 订单状态机
//!
//! # 状态流转
//!
//! ```text
//! placed ──▶ confirmed ──▶ preparing ──▶ ready ──▶ dispatched ──▶ delivered
//!   │            │             │           │           │
//!   └────────────┴─────────────┴───────────┴───────────┴──▶ cancelled
//! ```
//!
//! - 正向流转只能走下一步，不允许跳过
//! - `placed → confirmed` 必须附带备餐时间预估
//! - `delivered` / `cancelled` 为终态
//! - 目标状态等于当前状态时为空操作

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// 备餐时间预估选项 (经理确认订单时选择)
pub const ESTIMATED_TIME_OPTIONS: [&str; 6] = [
    "10-15 min",
    "15-20 min",
    "20-25 min",
    "25-30 min",
    "30-35 min",
    "35-40 min",
];

/// 订单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Placed,
    Confirmed,
    Preparing,
    Ready,
    Dispatched,
    Delivered,
    Cancelled,
}

/// 正向流程 (不含 cancelled)
pub const STATUS_FLOW: [OrderStatus; 6] = [
    OrderStatus::Placed,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Dispatched,
    OrderStatus::Delivered,
];

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Dispatched => "dispatched",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// 是否终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// 在正向流程中的位置，cancelled 返回 None
    pub fn flow_index(&self) -> Option<usize> {
        STATUS_FLOW.iter().position(|s| s == self)
    }

    /// 下一个状态 (查表)，终态返回 None
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Placed => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Dispatched),
            Self::Dispatched => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// 状态标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Confirmed => "Confirmed",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Dispatched => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// 状态图标
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Placed => "📝",
            Self::Confirmed => "✅",
            Self::Preparing => "👨‍🍳",
            Self::Ready => "🍱",
            Self::Dispatched => "🛵",
            Self::Delivered => "🎉",
            Self::Cancelled => "❌",
        }
    }

    /// 状态说明 (追踪页)
    pub fn description(&self) -> &'static str {
        match self {
            Self::Placed => "Waiting for the restaurant to accept your order",
            Self::Confirmed => "The restaurant has accepted your order",
            Self::Preparing => "Your food is being prepared",
            Self::Ready => "Your order is packed and ready",
            Self::Dispatched => "Your order is on its way",
            Self::Delivered => "Enjoy your meal!",
            Self::Cancelled => "This order was cancelled",
        }
    }

    /// 进入该状态时发送给下单用户的通知 (标题, 正文)
    pub fn notification(&self, order_number: &str, estimated_time: Option<&str>) -> (String, String) {
        let body = match self {
            Self::Placed => format!("Order {order_number} has been placed"),
            Self::Confirmed => match estimated_time {
                Some(eta) => format!("Order {order_number} confirmed. Ready in about {eta}"),
                None => format!("Order {order_number} confirmed"),
            },
            Self::Preparing => match estimated_time {
                Some(eta) => format!("Order {order_number} is being prepared. ETA {eta}"),
                None => format!("Order {order_number} is being prepared"),
            },
            Self::Ready => format!("Order {order_number} is ready"),
            Self::Dispatched => format!("Order {order_number} is out for delivery"),
            Self::Delivered => format!("Order {order_number} has been delivered"),
            Self::Cancelled => format!("Order {order_number} has been cancelled"),
        };
        (self.label().to_string(), body)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placed" => Ok(Self::Placed),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "dispatched" => Ok(Self::Dispatched),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(TransitionError::UnknownStatus(other.to_string())),
        }
    }
}

/// 状态流转错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("order is already {0}")]
    Terminal(OrderStatus),

    #[error("cannot move order from {from} to {to}")]
    NotAllowed { from: OrderStatus, to: OrderStatus },

    #[error("preparation time estimate is required to confirm an order")]
    EstimateRequired,

    #[error("'{0}' is not a valid preparation time estimate")]
    InvalidEstimate(String),

    #[error("unknown order status '{0}'")]
    UnknownStatus(String),
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        let message = err.to_string();
        match err {
            TransitionError::Terminal(status) => {
                AppError::with_message(ErrorCode::OrderAlreadyTerminal, message)
                    .with_detail("status", status.as_str())
            }
            TransitionError::NotAllowed { from, to } => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, message)
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
            TransitionError::EstimateRequired => {
                AppError::with_message(ErrorCode::EstimatedTimeRequired, message)
                    .with_detail("fields", serde_json::json!({ "estimatedTime": ["required"] }))
            }
            TransitionError::InvalidEstimate(value) => {
                AppError::with_message(ErrorCode::InvalidEstimatedTime, message)
                    .with_detail("estimatedTime", value)
                    .with_detail("options", ESTIMATED_TIME_OPTIONS.to_vec())
            }
            TransitionError::UnknownStatus(value) => {
                AppError::with_message(ErrorCode::InvalidOrderStatus, message)
                    .with_detail("status", value)
            }
        }
    }
}

/// 经理发起的状态变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusAction {
    /// 推进到下一状态
    Advance { estimated_time: Option<String> },
    /// 取消订单
    Cancel,
    /// 设置为指定目标状态
    SetStatus {
        target: OrderStatus,
        estimated_time: Option<String>,
    },
}

/// 流转结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 状态已改变，需要持久化并通知用户
    Changed {
        from: OrderStatus,
        to: OrderStatus,
        /// 离开 placed 时记录的预估时间
        estimated_time: Option<String>,
    },
    /// 目标等于当前状态，无需任何操作
    Unchanged(OrderStatus),
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// 流转后的状态
    pub fn status(&self) -> OrderStatus {
        match self {
            Self::Changed { to, .. } => *to,
            Self::Unchanged(s) => *s,
        }
    }
}

/// 校验预估时间是否为给定选项之一
pub fn validate_estimate(value: &str) -> Result<String, TransitionError> {
    let trimmed = value.trim();
    ESTIMATED_TIME_OPTIONS
        .iter()
        .find(|opt| **opt == trimmed)
        .map(|opt| opt.to_string())
        .ok_or_else(|| TransitionError::InvalidEstimate(value.to_string()))
}

/// 计算一次状态变更的结果 (纯函数，不修改任何数据)
pub fn apply(current: OrderStatus, action: StatusAction) -> Result<Transition, TransitionError> {
    let (target, estimated_time) = match action {
        StatusAction::Advance { estimated_time } => {
            let target = current.next().ok_or(TransitionError::Terminal(current))?;
            (target, estimated_time)
        }
        StatusAction::Cancel => (OrderStatus::Cancelled, None),
        StatusAction::SetStatus {
            target,
            estimated_time,
        } => (target, estimated_time),
    };

    if target == current {
        return Ok(Transition::Unchanged(current));
    }
    if current.is_terminal() {
        return Err(TransitionError::Terminal(current));
    }

    if target == OrderStatus::Cancelled {
        return Ok(Transition::Changed {
            from: current,
            to: target,
            estimated_time: None,
        });
    }

    if current.next() != Some(target) {
        return Err(TransitionError::NotAllowed {
            from: current,
            to: target,
        });
    }

    let estimated_time = if current == OrderStatus::Placed {
        let raw = estimated_time
            .filter(|s| !s.trim().is_empty())
            .ok_or(TransitionError::EstimateRequired)?;
        Some(validate_estimate(&raw)?)
    } else {
        None
    };

    Ok(Transition::Changed {
        from: current,
        to: target,
        estimated_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(estimate: Option<&str>) -> StatusAction {
        StatusAction::Advance {
            estimated_time: estimate.map(str::to_string),
        }
    }

    #[test]
    fn test_next_is_linear() {
        let mut status = OrderStatus::Placed;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            seen.push(next);
            status = next;
        }
        assert_eq!(seen, STATUS_FLOW.to_vec());
        assert_eq!(OrderStatus::Cancelled.next(), None);
    }

    #[test]
    fn test_placed_requires_estimate() {
        assert_eq!(
            apply(OrderStatus::Placed, advance(None)),
            Err(TransitionError::EstimateRequired)
        );
        assert_eq!(
            apply(OrderStatus::Placed, advance(Some("  "))),
            Err(TransitionError::EstimateRequired)
        );

        let t = apply(OrderStatus::Placed, advance(Some("20-25 min"))).unwrap();
        assert_eq!(
            t,
            Transition::Changed {
                from: OrderStatus::Placed,
                to: OrderStatus::Confirmed,
                estimated_time: Some("20-25 min".to_string()),
            }
        );
    }

    #[test]
    fn test_estimate_must_be_an_offered_option() {
        assert_eq!(
            apply(OrderStatus::Placed, advance(Some("soon"))),
            Err(TransitionError::InvalidEstimate("soon".to_string()))
        );
    }

    #[test]
    fn test_placed_to_preparing_is_rejected() {
        let result = apply(
            OrderStatus::Placed,
            StatusAction::SetStatus {
                target: OrderStatus::Preparing,
                estimated_time: Some("10-15 min".to_string()),
            },
        );
        assert_eq!(
            result,
            Err(TransitionError::NotAllowed {
                from: OrderStatus::Placed,
                to: OrderStatus::Preparing,
            })
        );
    }

    #[test]
    fn test_backwards_is_rejected() {
        let result = apply(
            OrderStatus::Ready,
            StatusAction::SetStatus {
                target: OrderStatus::Confirmed,
                estimated_time: None,
            },
        );
        assert!(matches!(result, Err(TransitionError::NotAllowed { .. })));
    }

    #[test]
    fn test_later_steps_need_no_estimate() {
        let t = apply(OrderStatus::Confirmed, advance(None)).unwrap();
        assert_eq!(t.status(), OrderStatus::Preparing);

        // 后续步骤忽略预估时间
        let t = apply(OrderStatus::Preparing, advance(Some("10-15 min"))).unwrap();
        assert_eq!(
            t,
            Transition::Changed {
                from: OrderStatus::Preparing,
                to: OrderStatus::Ready,
                estimated_time: None,
            }
        );
    }

    #[test]
    fn test_cancel_from_every_non_terminal_state() {
        for status in &STATUS_FLOW[..5] {
            let t = apply(*status, StatusAction::Cancel).unwrap();
            assert_eq!(t.status(), OrderStatus::Cancelled, "from {status}");
        }
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert_eq!(
                apply(terminal, advance(Some("10-15 min"))),
                Err(TransitionError::Terminal(terminal))
            );
            assert!(apply(
                terminal,
                StatusAction::SetStatus {
                    target: OrderStatus::Placed,
                    estimated_time: None,
                }
            )
            .is_err());
        }
        assert_eq!(
            apply(OrderStatus::Delivered, StatusAction::Cancel),
            Err(TransitionError::Terminal(OrderStatus::Delivered))
        );
    }

    #[test]
    fn test_dispatched_cancel_then_advance() {
        let t = apply(OrderStatus::Dispatched, StatusAction::Cancel).unwrap();
        assert_eq!(t.status(), OrderStatus::Cancelled);
        assert!(apply(t.status(), advance(None)).is_err());
    }

    #[test]
    fn test_same_state_is_noop() {
        for status in [
            OrderStatus::Placed,
            OrderStatus::Preparing,
            OrderStatus::Delivered,
        ] {
            let t = apply(
                status,
                StatusAction::SetStatus {
                    target: status,
                    estimated_time: None,
                },
            )
            .unwrap();
            assert_eq!(t, Transition::Unchanged(status));
        }
        assert_eq!(
            apply(OrderStatus::Cancelled, StatusAction::Cancel),
            Ok(Transition::Unchanged(OrderStatus::Cancelled))
        );
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("Dispatched".parse::<OrderStatus>(), Ok(OrderStatus::Dispatched));
        assert_eq!(
            "eaten".parse::<OrderStatus>(),
            Err(TransitionError::UnknownStatus("eaten".to_string()))
        );
    }

    #[test]
    fn test_notification_mentions_eta() {
        let (title, body) = OrderStatus::Preparing.notification("ORD-2025-0042", Some("15-20 min"));
        assert_eq!(title, "Preparing");
        assert!(body.contains("ORD-2025-0042"));
        assert!(body.contains("15-20 min"));
    }

    #[test]
    fn test_transition_error_codes() {
        let err: AppError = TransitionError::EstimateRequired.into();
        assert_eq!(err.code, ErrorCode::EstimatedTimeRequired);

        let err: AppError = TransitionError::Terminal(OrderStatus::Delivered).into();
        assert_eq!(err.code, ErrorCode::OrderAlreadyTerminal);
    }
}
