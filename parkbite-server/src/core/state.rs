//! Server State
//!
//! 所有处理器共享的状态。内部全部为 Arc / 可廉价克隆的句柄。

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::MemoryStore;
use crate::db::seed::seed_demo_data;
use crate::message::MessageBus;
use crate::notifications::NotificationService;
use crate::orders::OrdersManager;
use crate::payment::{PaymentGateway, SimulatedGateway};
use crate::tracking::TrackingSessions;

/// 服务器状态
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 服务器配置 |
/// | store | 内存存储 |
/// | jwt_service | JWT 认证服务 |
/// | message_bus | 进程内事件总线 |
/// | orders | 订单管理器 |
/// | notifications | 通知服务 |
/// | tracking | 追踪会话注册表 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 内存存储
    pub store: MemoryStore,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 消息总线
    pub message_bus: MessageBus,
    /// 订单管理器
    pub orders: OrdersManager,
    /// 通知服务
    pub notifications: NotificationService,
    /// 追踪会话
    pub tracking: TrackingSessions,
    /// 关闭令牌，追踪会话的令牌都派生自它
    shutdown: CancellationToken,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 代替；测试用它注入自定义支付网关。
    pub fn new(config: Config, store: MemoryStore, payments: Arc<dyn PaymentGateway>) -> Self {
        let shutdown = CancellationToken::new();
        let message_bus = MessageBus::new();
        let notifications = NotificationService::new(store.clone(), message_bus.clone());
        let orders = OrdersManager::new(
            store.clone(),
            payments,
            notifications.clone(),
            message_bus.clone(),
            config.tracking_interval_secs,
        );
        let tracking = TrackingSessions::new(
            Duration::from_secs(config.tracking_interval_secs),
            shutdown.child_token(),
        );
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config,
            store,
            jwt_service,
            message_bus,
            orders,
            notifications,
            tracking,
            shutdown,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建内存存储
    /// 2. 按配置的失败率创建模拟支付网关
    /// 3. 组装各服务
    /// 4. 启动追踪会话回收任务
    /// 5. 写入演示数据 (SEED_DEMO_DATA)
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let store = MemoryStore::new();
        let gateway = SimulatedGateway::new(config.payment_failure_rate);
        tracing::info!(
            failure_rate = gateway.failure_rate(),
            "Simulated payment gateway ready"
        );
        let state = Self::new(config.clone(), store, Arc::new(gateway));
        state
            .tracking
            .spawn_reaper(Duration::from_secs(config.tracking_session_idle_secs));

        if config.seed_demo_data {
            seed_demo_data(&state.store)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed demo data: {}", e))?;
        }

        Ok(state)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 停止后台任务 (追踪会话、消息总线)
    pub fn shutdown(&self) {
        self.tracking.close_all();
        self.message_bus.shutdown();
        self.shutdown.cancel();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
