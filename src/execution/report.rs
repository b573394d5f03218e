//! 批次執行摘要

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::results::CorrelationResult;
use crate::monitor::JobOutcome;

/// 批次摘要
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    /// 讀到的工作項目數（含被拒絕的）
    pub total: usize,
    /// 得到有定義相關係數的作業數
    pub successful: usize,
    /// 寫入空值的作業數（含管線錯誤）
    pub null_values: usize,
    /// 其中因管線錯誤而寫入空值的作業數
    pub failed: usize,
    /// 格式錯誤而未執行的工作項目數
    pub rejected: usize,
    /// 各方法的成功數
    pub per_method: BTreeMap<String, usize>,
    pub total_seconds: f64,
    value_sum: f64,
    min_value: Option<f64>,
    max_value: Option<f64>,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記錄一個已寫入結果表的作業
    pub fn record(&mut self, result: &CorrelationResult, outcome: JobOutcome) {
        self.total += 1;
        self.total_seconds += result.execution_seconds;

        match result.correlation_value {
            Some(value) => {
                self.successful += 1;
                *self.per_method.entry(result.method.to_string()).or_insert(0) += 1;
                self.value_sum += value;
                self.min_value = Some(self.min_value.map_or(value, |min| min.min(value)));
                self.max_value = Some(self.max_value.map_or(value, |max| max.max(value)));
            }
            None => {
                self.null_values += 1;
                if outcome == JobOutcome::Failed {
                    self.failed += 1;
                }
            }
        }
    }

    /// 記錄一筆被拒絕的工作項目
    pub fn record_rejected(&mut self) {
        self.total += 1;
        self.rejected += 1;
    }

    /// 實際執行的作業數
    pub fn executed(&self) -> usize {
        self.successful + self.null_values
    }

    pub fn mean_seconds(&self) -> Option<f64> {
        match self.executed() {
            0 => None,
            n => Some(self.total_seconds / n as f64),
        }
    }

    pub fn mean_value(&self) -> Option<f64> {
        match self.successful {
            0 => None,
            n => Some(self.value_sum / n as f64),
        }
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// 輸出摘要日誌
    pub fn log(&self) {
        info!(
            "批次完成: 共 {} 筆, 成功 {} 筆, 空值 {} 筆 (錯誤 {} 筆), 拒絕 {} 筆",
            self.total, self.successful, self.null_values, self.failed, self.rejected
        );
        for (method, count) in &self.per_method {
            info!("  {}: {} 筆成功", method, count);
        }
        if let Some(mean) = self.mean_seconds() {
            info!("  執行時間: 平均 {:.4}s, 合計 {:.4}s", mean, self.total_seconds);
        }
        if let (Some(mean), Some(min), Some(max)) = (self.mean_value(), self.min_value, self.max_value) {
            info!("  相關係數: 平均 {:.4}, 最小 {:.4}, 最大 {:.4}", mean, min, max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::CorrelationMethod;
    use crate::domain_types::Frequency;

    fn result(method: CorrelationMethod, value: Option<f64>, seconds: f64) -> CorrelationResult {
        CorrelationResult {
            instrument_a: "A".into(),
            instrument_b: "B".into(),
            period_label: "1Year".into(),
            frequency: Frequency::Hour,
            method,
            repeat: 1,
            correlation_value: value,
            execution_seconds: seconds,
        }
    }

    #[test]
    fn test_summary_counts_and_stats() {
        let mut summary = BatchSummary::new();
        summary.record(&result(CorrelationMethod::Pearson, Some(0.5), 1.0), JobOutcome::Correlated);
        summary.record(&result(CorrelationMethod::Pearson, Some(-0.25), 2.0), JobOutcome::Correlated);
        summary.record(&result(CorrelationMethod::Kendall, Some(1.0), 0.5), JobOutcome::Correlated);
        summary.record(&result(CorrelationMethod::Spearman, None, 0.5), JobOutcome::Undefined);
        summary.record(&result(CorrelationMethod::Spearman, None, 0.0), JobOutcome::Failed);
        summary.record_rejected();

        assert_eq!(summary.total, 6);
        assert_eq!(summary.successful, 3);
        assert_eq!(summary.null_values, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.executed(), 5);
        assert_eq!(summary.per_method.get("pearson"), Some(&2));
        assert_eq!(summary.per_method.get("kendall"), Some(&1));
        assert_eq!(summary.per_method.get("spearman"), None);

        assert!((summary.mean_seconds().unwrap() - 0.8).abs() < 1e-12);
        assert!((summary.mean_value().unwrap() - 1.25 / 3.0).abs() < 1e-12);
        assert_eq!(summary.min_value(), Some(-0.25));
        assert_eq!(summary.max_value(), Some(1.0));
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::new();
        assert_eq!(summary.mean_seconds(), None);
        assert_eq!(summary.mean_value(), None);
        summary.log();
    }
}
