//! ParkBite Server - 科技园区订餐服务
//!
//! # 架构概述
//!
//! - **存储** (`db`): 基于 DashMap 的内存存储，按实体划分 Repository
//! - **认证** (`auth`): JWT + Argon2 认证，员工 / 餐厅经理两种角色
//! - **订单** (`orders`): 订单创建与状态机驱动的状态流转
//! - **支付** (`payment`): 模拟支付网关
//! - **消息总线** (`message`): 进程内事件广播
//! - **通知** (`notifications`): 用户通知收件箱
//! - **追踪** (`tracking`): 订单追踪的模拟进度
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! parkbite-server/src/
//! ├── core/           # 配置、状态、服务器
//! ├── auth/           # JWT 认证、密码、中间件
//! ├── api/            # HTTP 路由和处理器
//! ├── db/             # 内存存储与 Repository
//! ├── orders/         # 订单管理
//! ├── payment/        # 支付网关
//! ├── message/        # 消息总线
//! ├── notifications/  # 通知服务
//! ├── tracking/       # 追踪会话
//! ├── services/       # HTTP 服务
//! └── utils/          # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod message;
pub mod notifications;
pub mod orders;
pub mod payment;
pub mod services;
pub mod tracking;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use message::MessageBus;
pub use orders::OrdersManager;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env 并初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_json, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____             __   ____  _ __
   / __ \____ ______/ /__/ __ )(_) /____
  / /_/ / __ `/ ___/ //_/ __  / / __/ _ \
 / ____/ /_/ / /  / ,< / /_/ / / /_/  __/
/_/    \__,_/_/  /_/|_/_____/_/\__/\___/
    "#
    );
}
