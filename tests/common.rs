#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tick_correlation::domain_types::{TickPoint, TickSeries};
use tick_correlation::utils::format_datetime_ms;

/// 測試資料的起始時間（交易時段內）
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap()
}

/// 由 (毫秒偏移, 價格) 建立序列
pub fn tick_series(symbol: &str, ticks: &[(i64, f64)]) -> TickSeries {
    let t0 = base_time();
    let points = ticks
        .iter()
        .map(|&(ms, price)| TickPoint::new(t0 + Duration::milliseconds(ms), price))
        .collect();
    TickSeries::from_points(symbol, None, points)
}

/// 寫出清洗後序列檔 `<dir>/<symbol>_transformed.csv`
pub fn write_clean_series(dir: &Path, symbol: &str, ticks: &[(i64, f64)]) {
    let t0 = base_time();
    let mut content = String::from("datetime,instrument,last\n");
    for &(ms, price) in ticks {
        let timestamp = t0 + Duration::milliseconds(ms);
        content.push_str(&format!("{},{},{}\n", format_datetime_ms(&timestamp), symbol, price));
    }
    fs::write(dir.join(format!("{}_transformed.csv", symbol)), content).unwrap();
}

/// 一小時內不規則的 Tick，價格為平滑波動加上小幅跳動
pub fn irregular_ticks(seed: u64, count: usize) -> Vec<(i64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut offset = 0i64;
    (0..count)
        .map(|i| {
            offset += rng.random_range(0..2_000i64);
            let jitter = rng.random_range(0.0..0.1f64);
            (offset, 20.0 + (i as f64 * 0.05).sin() + jitter)
        })
        .collect()
}
