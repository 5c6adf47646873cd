use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | PAYMENT_FAILURE_RATE | 0.01 | 电子支付的模拟失败率 |
/// | TRACKING_INTERVAL_SECS | 30 | 追踪页模拟推进间隔(秒) |
/// | TRACKING_SESSION_IDLE_SECS | 600 | 追踪会话空闲回收时间(秒)，0 表示不回收 |
/// | SEED_DEMO_DATA | true | 启动时写入演示数据 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
///
/// JWT 相关变量见 [`JwtConfig`]，日志变量 (LOG_LEVEL / LOG_JSON / LOG_DIR)
/// 在 [`crate::setup_environment`] 中读取。
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 PAYMENT_FAILURE_RATE=0 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 电子支付模拟失败率 (0.0 - 1.0)
    pub payment_failure_rate: f64,
    /// 追踪模拟推进间隔 (秒)
    pub tracking_interval_secs: u64,
    /// 追踪会话空闲多久后回收 (秒)
    pub tracking_session_idle_secs: u64,
    /// 是否写入演示数据
    pub seed_demo_data: bool,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            payment_failure_rate: std::env::var("PAYMENT_FAILURE_RATE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .map(|r| r.clamp(0.0, 1.0))
                .unwrap_or(0.01),
            tracking_interval_secs: std::env::var("TRACKING_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(shared::order::tracking::DEFAULT_SIMULATION_INTERVAL_SECS),
            tracking_session_idle_secs: std::env::var("TRACKING_SESSION_IDLE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, payment_failure_rate: f64) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.payment_failure_rate = payment_failure_rate.clamp(0.0, 1.0);
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_clamp_failure_rate() {
        let config = Config::with_overrides(0, 5.0);
        assert_eq!(config.http_port, 0);
        assert_eq!(config.payment_failure_rate, 1.0);
    }
}
