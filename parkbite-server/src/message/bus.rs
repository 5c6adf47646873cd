//! 消息总线核心实现
//!
//! ```text
//! OrdersManager ──▶ publish() ──▶ broadcast::Sender<BusMessage> ──▶ subscribers
//! ```
//!
//! 没有订阅者时发布的消息直接丢弃。

use shared::message::BusMessage;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// 广播通道默认容量
const DEFAULT_CAPACITY: usize = 1024;

/// 消息总线
#[derive(Debug, Clone)]
pub struct MessageBus {
    tx: broadcast::Sender<BusMessage>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl MessageBus {
    /// 创建默认容量的消息总线
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 创建指定容量的消息总线
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 发布消息，返回收到消息的订阅者数量
    pub fn publish(&self, msg: BusMessage) -> usize {
        if self.shutdown_token.is_cancelled() {
            return 0;
        }
        let event_type = msg.event_type;
        match self.tx.send(msg) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!(%event_type, "No subscribers for bus message");
                0
            }
        }
    }

    /// 订阅所有消息
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// 关闭信号令牌 (供后台任务监听)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 停止发布
    pub fn shutdown(&self) {
        self.shutdown_token.cancel();
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
