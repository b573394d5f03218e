use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain_types::data_point::{AlignedRow, TickPoint};
use crate::domain_types::Frequency;

/// 時間序列資料結構
///
/// `frequency` 為 `None` 表示原始（未重採樣）序列。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeries<T> {
    pub symbol: String,
    pub frequency: Option<Frequency>,
    pub data: Vec<T>,
}

/// 原始或重採樣後的 Tick 序列
pub type TickSeries = TimeSeries<TickPoint>;

impl<T> TimeSeries<T> {
    /// 創建新的時間序列
    pub fn new(symbol: impl Into<String>, frequency: Option<Frequency>) -> Self {
        Self {
            symbol: symbol.into(),
            frequency,
            data: Vec::new(),
        }
    }

    /// 獲取數據點數量
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 檢查是否為空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 為時間序列數據點定義時間戳訪問特徵
pub trait HasTimestamp {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl HasTimestamp for TickPoint {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl<T> TimeSeries<T>
where
    T: HasTimestamp,
{
    /// 由既有數據點建立序列
    pub fn from_points(symbol: impl Into<String>, frequency: Option<Frequency>, points: Vec<T>) -> Self {
        let mut series = Self::new(symbol, frequency);
        series.data = points;
        series
    }

    /// 時間戳是否非遞減
    pub fn is_sorted(&self) -> bool {
        self.data
            .windows(2)
            .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
    }

    /// 時間戳是否嚴格遞增（即無重複）
    pub fn is_strictly_increasing(&self) -> bool {
        self.data
            .windows(2)
            .all(|pair| pair[0].timestamp() < pair[1].timestamp())
    }

    /// 依時間穩定排序，相同時間戳保留原始順序
    pub fn sort_by_time(&mut self) {
        self.data.sort_by_key(HasTimestamp::timestamp);
    }

    /// 獲取時間戳數組
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.data.iter().map(HasTimestamp::timestamp).collect()
    }
}

impl TimeSeries<TickPoint> {
    /// 獲取價格數組
    pub fn prices(&self) -> Vec<f64> {
        self.data.iter().map(|point| point.price).collect()
    }
}

/// 兩條重採樣序列在共同時間點上的交集
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlignedPair {
    pub rows: Vec<AlignedRow>,
}

impl AlignedPair {
    pub fn new(rows: Vec<AlignedRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 第一個商品的價格欄
    pub fn values_a(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.value_a).collect()
    }

    /// 第二個商品的價格欄
    pub fn values_b(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.value_b).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_from_points_keeps_input_order() {
        let series = TickSeries::from_points(
            "PETR4",
            None,
            vec![
                TickPoint::new(base_time() + Duration::seconds(5), 10.0),
                TickPoint::new(base_time(), 11.0),
                TickPoint::new(base_time() + Duration::seconds(2), 12.0),
            ],
        );

        assert_eq!(series.len(), 3);
        assert_eq!(series.prices(), vec![10.0, 11.0, 12.0]);
        assert!(!series.is_sorted());
    }

    #[test]
    fn test_sort_by_time_is_stable() {
        let t = base_time();
        let mut series = TickSeries::from_points(
            "VALE3",
            None,
            vec![
                TickPoint::new(t + Duration::seconds(1), 1.0),
                TickPoint::new(t, 2.0),
                TickPoint::new(t + Duration::seconds(1), 3.0),
                TickPoint::new(t, 4.0),
            ],
        );
        series.sort_by_time();

        assert!(series.is_sorted());
        assert!(!series.is_strictly_increasing());
        assert_eq!(series.prices(), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_empty_series_is_sorted() {
        let series = TickSeries::new("ITUB4", None);
        assert!(series.is_empty());
        assert!(series.timestamps().is_empty());
        assert!(series.is_sorted());
        assert!(series.is_strictly_increasing());
    }
}
