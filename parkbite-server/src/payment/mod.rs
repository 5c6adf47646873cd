//! 支付网关
//!
//! 没有真实的支付通道。[`SimulatedGateway`] 校验支付方式是否适用于订单类型，
//! 并按配置的概率让电子支付随机失败；现金支付总是成功 (交付时结算)。
//! 支付失败可由用户重试，不会产生订单。

use async_trait::async_trait;
use rand::Rng;
use shared::order::{OrderType, PaymentMethod, PaymentStatus};
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// 支付请求
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub user_id: String,
    pub restaurant_id: String,
    pub order_type: OrderType,
    pub method: PaymentMethod,
    pub amount: i64,
}

/// 支付回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// 交易流水号 (现金支付为 None)
    pub reference: Option<String>,
    pub status: PaymentStatus,
}

/// 支付错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("{method} is not available for {order_type} orders")]
    MethodNotAvailable {
        method: PaymentMethod,
        order_type: OrderType,
    },

    #[error("Payment was declined, please try again")]
    Declined,
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        let message = err.to_string();
        match err {
            PaymentError::MethodNotAvailable { method, order_type } => {
                AppError::with_message(ErrorCode::PaymentInvalidMethod, message)
                    .with_detail("paymentMethod", method.as_str())
                    .with_detail("orderType", order_type.as_str())
            }
            PaymentError::Declined => AppError::with_message(ErrorCode::PaymentFailed, message)
                .with_detail("retryable", true),
        }
    }
}

/// 支付网关接口
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// 模拟支付网关
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    failure_rate: f64,
}

impl SimulatedGateway {
    /// `failure_rate` 为电子支付的失败概率 (0.0 - 1.0)
    pub fn new(failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_finite() {
            failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { failure_rate }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(0.01)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        if !request.method.is_available_for(request.order_type) {
            return Err(PaymentError::MethodNotAvailable {
                method: request.method,
                order_type: request.order_type,
            });
        }

        if !request.method.is_electronic() {
            return Ok(PaymentReceipt {
                reference: None,
                status: request.method.initial_status(),
            });
        }

        let declined = rand::thread_rng().gen_bool(self.failure_rate);
        if declined {
            tracing::warn!(
                user_id = %request.user_id,
                method = %request.method,
                amount = request.amount,
                "Simulated payment declined"
            );
            return Err(PaymentError::Declined);
        }

        Ok(PaymentReceipt {
            reference: Some(format!("TXN-{}", uuid::Uuid::new_v4().simple())),
            status: request.method.initial_status(),
        })
    }
}
