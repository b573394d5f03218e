// time_utils.rs
//
// 提供時間轉換相關的工具函數：
// 1. DateTime<Utc> 與毫秒時間戳之間的轉換
// 2. 序列檔中時間字串的解析與格式化

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// 序列檔輸出使用的時間格式（毫秒精度）
pub const DATETIME_FORMAT_MS: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// 無時區的可接受時間格式，依序嘗試
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

//
// 基礎時間轉換函數
//

/// 將 DateTime<Utc> 轉換為毫秒時間戳
pub fn datetime_to_timestamp_ms(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// 將毫秒時間戳轉換為 DateTime<Utc>
///
/// 超出 chrono 可表示範圍時回傳 `DateTime::<Utc>::MIN_UTC`。
pub fn timestamp_ms_to_datetime(ts: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ts)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

//
// 文字格式
//

/// 解析時間字串
///
/// 先嘗試 RFC 3339，再依序嘗試無時區格式（視為 UTC）。
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// 以毫秒精度格式化時間
pub fn format_datetime_ms(dt: &DateTime<Utc>) -> String {
    dt.format(DATETIME_FORMAT_MS).to_string()
}
