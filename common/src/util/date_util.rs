/// 当前时间（Unix 毫秒）
pub fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
