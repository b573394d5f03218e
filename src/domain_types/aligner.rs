//! 兩條序列的時間對齊
//!
//! 以時間戳做內部連接，任一側缺值（非有限數值）的列整列丟棄，
//! 不做外部連接後補值。

use std::cmp::Ordering;

use super::data_point::{AlignedRow, TickPoint};
use super::resampler::Resampler;
use super::time_series::{AlignedPair, TickSeries};

/// 序列對齊器
pub struct PairAligner;

impl PairAligner {
    /// 對齊兩條序列
    ///
    /// 輸入理應已是唯一且排序的時間戳；若非如此，先以穩定排序
    /// 與「最後一筆」合併重複時間戳後再連接，不視為錯誤。
    pub fn align(series_a: &TickSeries, series_b: &TickSeries) -> AlignedPair {
        let left = Self::unique_points(series_a);
        let right = Self::unique_points(series_b);

        let mut rows = Vec::with_capacity(left.len().min(right.len()));
        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            let (a, b) = (&left[i], &right[j]);
            match a.timestamp.cmp(&b.timestamp) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    if a.price.is_finite() && b.price.is_finite() {
                        rows.push(AlignedRow {
                            timestamp: a.timestamp,
                            value_a: a.price,
                            value_b: b.price,
                        });
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        AlignedPair::new(rows)
    }

    fn unique_points(series: &TickSeries) -> Vec<TickPoint> {
        if series.is_strictly_increasing() {
            return series.data.clone();
        }
        let mut points = series.data.clone();
        points.sort_by_key(|point| point.timestamp);
        Resampler::dedup_last(&points)
    }
}
