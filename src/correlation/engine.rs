use std::time::{Duration, Instant};

use tracing::debug;

use super::method::CorrelationMethod;
use super::statistics::{kendall_tau_b, pearson, spearman};
use super::MIN_OBSERVATIONS;
use crate::domain_types::AlignedPair;

/// 帶耗時的相關係數
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedCorrelation {
    /// `None` 表示統計量未定義（資料不足或分母為零）
    pub value: Option<f64>,
    pub elapsed: Duration,
}

/// 相關係數計算引擎
pub struct CorrelationEngine;

impl CorrelationEngine {
    /// 對對齊後的兩欄計算指定的統計量
    ///
    /// 對齊筆數少於 2 時回傳 `None`，不視為錯誤。
    pub fn correlate(pair: &AlignedPair, method: CorrelationMethod) -> Option<f64> {
        if pair.len() < MIN_OBSERVATIONS {
            debug!("對齊後只有 {} 筆資料，無法計算 {}", pair.len(), method);
            return None;
        }

        let (a, b) = (pair.values_a(), pair.values_b());
        match method {
            CorrelationMethod::Pearson => pearson(&a, &b),
            CorrelationMethod::Spearman => spearman(&a, &b),
            CorrelationMethod::Kendall => kendall_tau_b(&a, &b),
        }
    }

    /// 計算並量測耗時
    ///
    /// `started` 應為整個作業開始載入資料的時間點，
    /// 回傳的耗時涵蓋載入到統計量計算完成的整段區間。
    pub fn correlate_timed(
        pair: &AlignedPair,
        method: CorrelationMethod,
        started: Instant,
    ) -> TimedCorrelation {
        let value = Self::correlate(pair, method);
        TimedCorrelation {
            value,
            elapsed: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::AlignedRow;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use rstest::rstest;

    fn pair(values: &[(f64, f64)]) -> AlignedPair {
        let t0 = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
        AlignedPair::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &(a, b))| AlignedRow {
                    timestamp: t0 + ChronoDuration::seconds(i as i64),
                    value_a: a,
                    value_b: b,
                })
                .collect(),
        )
    }

    #[rstest]
    #[case(CorrelationMethod::Pearson)]
    #[case(CorrelationMethod::Spearman)]
    #[case(CorrelationMethod::Kendall)]
    fn test_insufficient_rows_are_undefined(#[case] method: CorrelationMethod) {
        assert_eq!(CorrelationEngine::correlate(&pair(&[]), method), None);
        assert_eq!(CorrelationEngine::correlate(&pair(&[(1.0, 2.0)]), method), None);
    }

    #[rstest]
    #[case(CorrelationMethod::Pearson)]
    #[case(CorrelationMethod::Spearman)]
    #[case(CorrelationMethod::Kendall)]
    fn test_identical_columns_correlate_perfectly(#[case] method: CorrelationMethod) {
        let values = pair(&[(10.0, 10.0), (12.0, 12.0), (11.0, 11.0)]);
        let value = CorrelationEngine::correlate(&values, method).unwrap();
        assert!((value - 1.0).abs() < 1e-12, "{} 得到 {}", method, value);
    }

    #[test]
    fn test_timed_correlation_measures_from_start() {
        let started = Instant::now();
        std::thread::sleep(Duration::from_millis(5));
        let timed = CorrelationEngine::correlate_timed(
            &pair(&[(1.0, 2.0), (2.0, 1.0)]),
            CorrelationMethod::Pearson,
            started,
        );

        assert!(timed.elapsed >= Duration::from_millis(5));
        assert!((timed.value.unwrap() + 1.0).abs() < 1e-12);
    }
}
