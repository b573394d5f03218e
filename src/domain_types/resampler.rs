//! Tick 序列重採樣
//!
//! 將不規則時間戳的序列映射到固定寬度的時間網格上：
//! 每個左閉區間取最後一筆成交價，空區間沿用上一個區間的值，
//! 第一筆觀測之前的區間不輸出。非有限價格（NaN、inf）視為缺值，不參與取值與補值。

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use super::data_point::TickPoint;
use super::frequency::Frequency;
use super::time_series::TickSeries;
use crate::utils::time_utils::{datetime_to_timestamp_ms, timestamp_ms_to_datetime};

/// 提供重採樣核心功能的結構
pub struct Resampler;

impl Resampler {
    /// 對序列進行重採樣
    ///
    /// 輸出的時間戳唯一且嚴格遞增；相同輸入必得相同輸出。
    pub fn resample(series: &TickSeries, frequency: Frequency) -> TickSeries {
        let points = Self::sorted_points(series);

        let data = if frequency.is_regridded() {
            Self::bucket_last_forward_fill(&points, frequency.milliseconds())
        } else {
            Self::dedup_last(&points)
        };

        TickSeries::from_points(series.symbol.clone(), Some(frequency), data)
    }

    /// 合併相同時間戳，保留原始順序中最後一筆有限價格
    pub fn dedup_last(points: &[TickPoint]) -> Vec<TickPoint> {
        let mut deduped: Vec<TickPoint> = Vec::with_capacity(points.len());
        for point in points.iter().filter(|point| point.price.is_finite()) {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => last.price = point.price,
                _ => deduped.push(*point),
            }
        }
        deduped
    }

    /// 區間起點（以 Unix epoch 對齊）
    pub fn bucket_start(timestamp: DateTime<Utc>, width_ms: i64) -> i64 {
        datetime_to_timestamp_ms(&timestamp).div_euclid(width_ms) * width_ms
    }

    fn bucket_last_forward_fill(points: &[TickPoint], width_ms: i64) -> Vec<TickPoint> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Vec::new();
        };

        let first_bucket = Self::bucket_start(first.timestamp, width_ms);
        let last_bucket = Self::bucket_start(last.timestamp, width_ms);
        let capacity = ((last_bucket - first_bucket) / width_ms + 1) as usize;
        let mut output = Vec::with_capacity(capacity);

        // 網格涵蓋所有觀測的時間範圍，尚無有限價格的區間不輸出
        let mut cursor = 0;
        let mut carried: Option<f64> = None;
        let mut bucket = first_bucket;
        while bucket <= last_bucket {
            let next_bucket = bucket + width_ms;
            while cursor < points.len()
                && datetime_to_timestamp_ms(&points[cursor].timestamp) < next_bucket
            {
                let price = points[cursor].price;
                if price.is_finite() {
                    carried = Some(price);
                }
                cursor += 1;
            }
            if let Some(price) = carried {
                output.push(TickPoint::new(timestamp_ms_to_datetime(bucket), price));
            }
            bucket = next_bucket;
        }

        output
    }

    // 上游若未排序則以穩定排序補救，維持「原始順序最後一筆」的決勝規則
    fn sorted_points(series: &TickSeries) -> Cow<'_, [TickPoint]> {
        if series.is_sorted() {
            Cow::Borrowed(series.data.as_slice())
        } else {
            let mut points = series.data.clone();
            points.sort_by_key(|point| point.timestamp);
            Cow::Owned(points)
        }
    }
}
