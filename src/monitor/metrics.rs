use metrics::{counter, histogram};
use std::time::Duration;

use crate::correlation::CorrelationMethod;
use crate::domain_types::Frequency;

/// 監控指標命名空間
pub const METRIC_NAMESPACE: &str = "correlation";

/// 作業結果類別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// 得到有定義的相關係數
    Correlated,
    /// 統計量未定義（資料不足或分母為零）
    Undefined,
    /// 管線錯誤，寫入空值
    Failed,
}

impl JobOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobOutcome::Correlated => "ok",
            JobOutcome::Undefined => "null",
            JobOutcome::Failed => "error",
        }
    }
}

/// 作業指標記錄器
///
/// 只透過 `metrics` 門面記錄，是否匯出由宿主程式安裝的 recorder 決定。
pub struct JobMetrics;

impl JobMetrics {
    /// 記錄一個完成的作業
    pub fn record_job(
        method: CorrelationMethod,
        frequency: Frequency,
        outcome: JobOutcome,
        elapsed: Duration,
    ) {
        counter!(
            format!("{}.jobs", METRIC_NAMESPACE),
            "outcome" => outcome.as_str(),
            "method" => method.as_str(),
            "frequency" => frequency.code()
        )
        .increment(1);

        histogram!(
            format!("{}.job_seconds", METRIC_NAMESPACE),
            "method" => method.as_str(),
            "frequency" => frequency.code()
        )
        .record(elapsed.as_secs_f64());
    }

    /// 記錄一筆無法解析的工作項目
    pub fn record_rejected() {
        counter!(format!("{}.jobs", METRIC_NAMESPACE), "outcome" => "rejected").increment(1);
    }

    /// 記錄預處理的檔案數
    pub fn record_preprocess(processed: usize, failed: usize) {
        counter!(format!("{}.preprocess_files", METRIC_NAMESPACE), "status" => "ok")
            .increment(processed as u64);
        counter!(format!("{}.preprocess_files", METRIC_NAMESPACE), "status" => "error")
            .increment(failed as u64);
    }
}
