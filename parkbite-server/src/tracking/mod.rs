//! 订单追踪会话
//!
//! 追踪页打开时在服务端启动一个模拟会话：从打开时的状态开始，
//! 每个间隔把显示状态向前推进一步，直到 `delivered`。
//! 会话只维护显示状态，从不写回订单存储；关闭页面 (或服务器停机)
//! 通过 [`CancellationToken`] 结束计时任务。
//!
//! 客户端离开时不一定会关闭会话，注册表按最后访问时间回收空闲会话
//! (见 [`TrackingSessions::sweep`])。

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use shared::models::Order;
use shared::order::OrderStatus;
use shared::util::new_id;
use tokio::sync::watch;
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;

/// 回收任务的最长检查周期
const REAPER_PERIOD: Duration = Duration::from_secs(60);

/// 单个追踪会话
#[derive(Debug)]
pub struct TrackingSession {
    order_id: String,
    opened_by: String,
    started_from: OrderStatus,
    rx: watch::Receiver<OrderStatus>,
    token: CancellationToken,
    last_access: Instant,
}

impl TrackingSession {
    /// 启动模拟
    ///
    /// 间隔为 0 时显示状态保持不变；已取消或已送达的订单不会推进。
    pub fn start(
        order_id: &str,
        opened_by: &str,
        start: OrderStatus,
        interval: Duration,
        token: CancellationToken,
    ) -> Self {
        let (tx, rx) = watch::channel(start);

        if !interval.is_zero() && start.next().is_some() {
            let task_token = token.clone();
            let order = order_id.to_string();
            tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + interval, interval);
                let mut current = start;
                while let Some(next) = current.next() {
                    tokio::select! {
                        _ = task_token.cancelled() => break,
                        _ = ticker.tick() => {
                            current = next;
                            if tx.send(current).is_err() {
                                break;
                            }
                            tracing::trace!(order_id = %order, status = %current, "Simulated tracking step");
                        }
                    }
                }
            });
        }

        Self {
            order_id: order_id.to_string(),
            opened_by: opened_by.to_string(),
            started_from: start,
            rx,
            token,
            last_access: Instant::now(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn opened_by(&self) -> &str {
        &self.opened_by
    }

    pub fn started_from(&self) -> OrderStatus {
        self.started_from
    }

    /// 当前显示状态
    pub fn display_status(&self) -> OrderStatus {
        *self.rx.borrow()
    }

    /// 订阅显示状态变化
    pub fn subscribe(&self) -> watch::Receiver<OrderStatus> {
        self.rx.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 停止计时，显示状态停在当前值
    pub fn close(&self) {
        self.token.cancel();
    }

    /// 距上次读取的时间
    pub fn idle_for(&self) -> Duration {
        self.last_access.elapsed()
    }

    fn touch(&mut self) {
        self.last_access = Instant::now();
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// 会话快照 (会话本身不可克隆)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub session_id: String,
    pub order_id: String,
    pub opened_by: String,
    pub started_from: OrderStatus,
    pub display_status: OrderStatus,
}

/// 追踪会话注册表
///
/// 每个会话的令牌都是服务器关闭令牌的子令牌。
#[derive(Debug, Clone)]
pub struct TrackingSessions {
    sessions: Arc<DashMap<String, TrackingSession>>,
    shutdown: CancellationToken,
    interval: Duration,
}

impl TrackingSessions {
    pub fn new(interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            shutdown,
            interval,
        }
    }

    /// 为订单打开一个会话，从订单当前的真实状态开始
    pub fn open(&self, order: &Order, opened_by: &str) -> SessionInfo {
        let session_id = new_id();
        let session = TrackingSession::start(
            &order.id,
            opened_by,
            order.status,
            self.interval,
            self.shutdown.child_token(),
        );
        let info = Self::info(&session_id, &session);
        self.sessions.insert(session_id, session);
        tracing::debug!(order_id = %order.id, session_id = %info.session_id, "Tracking session opened");
        info
    }

    /// 读取会话，同时刷新最后访问时间
    pub fn get(&self, session_id: &str) -> Option<SessionInfo> {
        let mut session = self.sessions.get_mut(session_id)?;
        session.touch();
        Some(Self::info(session_id, session.value()))
    }

    /// 关闭并移除会话
    pub fn close(&self, session_id: &str) -> Option<SessionInfo> {
        let (id, session) = self.sessions.remove(session_id)?;
        session.close();
        tracing::debug!(order_id = %session.order_id, session_id = %id, "Tracking session closed");
        Some(Self::info(&id, &session))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// 移除空闲超过 `idle` 的会话，返回移除数量
    ///
    /// 被移除的会话在 drop 时取消计时任务。
    pub fn sweep(&self, idle: Duration) -> usize {
        let mut removed = 0;
        self.sessions.retain(|id, session| {
            let keep = session.idle_for() < idle;
            if !keep {
                removed += 1;
                tracing::debug!(order_id = %session.order_id, session_id = %id, "Tracking session expired");
            }
            keep
        });
        removed
    }

    /// 启动空闲会话回收任务，随关闭令牌退出
    ///
    /// `idle` 为 0 时不启动。
    pub fn spawn_reaper(&self, idle: Duration) {
        if idle.is_zero() {
            return;
        }
        let registry = self.clone();
        let period = idle.min(REAPER_PERIOD);
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = registry.shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = registry.sweep(idle);
                        if removed > 0 {
                            tracing::info!(removed, remaining = registry.len(), "Expired idle tracking sessions");
                        }
                    }
                }
            }
            tracing::debug!("Tracking session reaper stopped");
        });
    }

    /// 关闭所有会话
    pub fn close_all(&self) {
        self.shutdown.cancel();
        self.sessions.clear();
    }

    fn info(session_id: &str, session: &TrackingSession) -> SessionInfo {
        SessionInfo {
            session_id: session_id.to_string(),
            order_id: session.order_id.clone(),
            opened_by: session.opened_by.clone(),
            started_from: session.started_from,
            display_status: session.display_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(20);

    async fn next_change(rx: &mut watch::Receiver<OrderStatus>) -> Option<OrderStatus> {
        match tokio::time::timeout(Duration::from_secs(2), rx.changed()).await {
            Ok(Ok(())) => Some(*rx.borrow_and_update()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_session_advances_to_delivered_and_stops() {
        let session = TrackingSession::start(
            "o1",
            "u1",
            OrderStatus::Ready,
            TICK,
            CancellationToken::new(),
        );
        let mut rx = session.subscribe();
        assert_eq!(next_change(&mut rx).await, Some(OrderStatus::Dispatched));
        assert_eq!(next_change(&mut rx).await, Some(OrderStatus::Delivered));
        // 任务结束后发送端被丢弃
        assert_eq!(next_change(&mut rx).await, None);
        assert_eq!(session.display_status(), OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_cancelled_order_never_advances() {
        let session = TrackingSession::start(
            "o1",
            "u1",
            OrderStatus::Cancelled,
            TICK,
            CancellationToken::new(),
        );
        let mut rx = session.subscribe();
        assert_eq!(next_change(&mut rx).await, None);
        assert_eq!(session.display_status(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_close_freezes_display() {
        let session = TrackingSession::start(
            "o1",
            "u1",
            OrderStatus::Placed,
            Duration::from_secs(3600),
            CancellationToken::new(),
        );
        let mut rx = session.subscribe();
        session.close();
        assert!(session.is_closed());
        assert_eq!(next_change(&mut rx).await, None);
        assert_eq!(session.display_status(), OrderStatus::Placed);
    }

    #[tokio::test]
    async fn test_zero_interval_is_frozen() {
        let session = TrackingSession::start(
            "o1",
            "u1",
            OrderStatus::Confirmed,
            Duration::ZERO,
            CancellationToken::new(),
        );
        assert_eq!(session.display_status(), OrderStatus::Confirmed);
    }

    fn order() -> Order {
        Order {
            id: "o1".to_string(),
            order_number: "ORD-2025-0001".to_string(),
            user_id: "u1".to_string(),
            restaurant_id: "r1".to_string(),
            order_type: shared::order::OrderType::Takeaway,
            status: OrderStatus::Preparing,
            subtotal: 100,
            delivery_charge: 0,
            gst: 5,
            total: 105,
            payment_method: shared::order::PaymentMethod::Cash,
            payment_status: shared::order::PaymentStatus::Pending,
            payment_reference: None,
            delivery_address: None,
            special_instructions: None,
            estimated_time: Some("15-20 min".to_string()),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[tokio::test]
    async fn test_registry_shutdown_cancels_children() {
        let shutdown = CancellationToken::new();
        let registry = TrackingSessions::new(Duration::from_secs(3600), shutdown.clone());
        let order = order();

        let info = registry.open(&order, "u1");
        assert_eq!(info.display_status, OrderStatus::Preparing);
        assert_eq!(registry.get(&info.session_id).unwrap().order_id, "o1");

        let closed = registry.close(&info.session_id).unwrap();
        assert_eq!(closed.started_from, OrderStatus::Preparing);
        assert!(registry.get(&info.session_id).is_none());

        registry.open(&order, "u1");
        registry.close_all();
        assert!(shutdown.is_cancelled());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_session_is_swept() {
        let registry = TrackingSessions::new(Duration::from_secs(3600), CancellationToken::new());
        let abandoned = registry.open(&order(), "u1");
        let mut rx = registry
            .sessions
            .get(&abandoned.session_id)
            .unwrap()
            .subscribe();

        // 刚访问过的会话不会被回收
        assert_eq!(registry.sweep(Duration::from_secs(60)), 0);
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.sweep(Duration::ZERO), 1);
        assert!(registry.is_empty());
        assert!(registry.get(&abandoned.session_id).is_none());
        // 计时任务随会话一起结束
        assert_eq!(next_change(&mut rx).await, None);
    }

    #[tokio::test]
    async fn test_reaper_expires_only_idle_sessions() {
        let shutdown = CancellationToken::new();
        let registry = TrackingSessions::new(Duration::ZERO, shutdown.clone());
        let idle = Duration::from_millis(300);
        registry.spawn_reaper(idle);

        let abandoned = registry.open(&order(), "u1");
        let watched = registry.open(&order(), "u2");

        // 持续读取的会话跨过两个回收周期
        for _ in 0..14 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(registry.get(&watched.session_id).is_some());
        }
        assert!(registry.get(&abandoned.session_id).is_none());
        assert_eq!(registry.len(), 1);

        shutdown.cancel();
    }
}
