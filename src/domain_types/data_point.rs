use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tick 數據點結構
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TickPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl TickPoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// 對齊後的一列：同一時間點上兩個商品的價格
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlignedRow {
    pub timestamp: DateTime<Utc>,
    pub value_a: f64,
    pub value_b: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tick_point_creation() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let point = TickPoint::new(timestamp, 12.5);

        assert_eq!(point.timestamp, timestamp);
        assert_eq!(point.price, 12.5);
    }
}
