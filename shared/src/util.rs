use chrono::Datelike;
use rand::Rng;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 生成资源 ID (UUID v4 字符串)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 当前 UTC 年份
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// 生成订单号 `ORD-<年份>-<4 位随机数>`
///
/// 随机后缀不做唯一性检查。
pub fn generate_order_number() -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("ORD-{}-{:04}", current_year(), suffix)
}
