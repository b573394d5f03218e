//! 作業執行器
//!
//! 單一作業內的錯誤（找不到序列、計算失敗）在作業邊界被攔下，
//! 記錄日誌後以空值寫入結果表；格式錯誤的工作項目不執行、不寫入。
//! 只有結果表無法寫入時才中止批次。

use std::path::Path;
use std::time::Instant;

use tracing::{error, info, warn};

use super::error::{PipelineError, PipelineResult};
use super::job::CorrelationJob;
use super::pipeline::CorrelationPipeline;
use super::report::BatchSummary;
use super::results::{CorrelationResult, ResultsWriter};
use crate::data_ingestion::SeriesSource;
use crate::monitor::{JobMetrics, JobOutcome};

/// 依序執行作業的執行器
pub struct JobRunner<S: SeriesSource> {
    source: S,
}

impl<S: SeriesSource> JobRunner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 執行單一作業，不會失敗
    pub fn run_job(&self, job: &CorrelationJob) -> CorrelationResult {
        self.evaluate(job).0
    }

    /// 執行作業並附加到結果表
    pub fn run_and_append(
        &self,
        job: &CorrelationJob,
        writer: &mut ResultsWriter,
    ) -> PipelineResult<(CorrelationResult, JobOutcome)> {
        let (result, outcome) = self.evaluate(job);
        writer
            .append(&result)
            .map_err(|e| PipelineError::Output(format!("{}: {}", writer.path().display(), e)))?;
        info!(
            "完成: correlation={}, time={:.4}s, 寫入 {}",
            format_value(result.correlation_value),
            result.execution_seconds,
            writer.path().display()
        );
        Ok((result, outcome))
    }

    /// 解析並執行一行工作項目
    ///
    /// 格式錯誤時回傳 `PipelineError::Format`，不寫入結果表。
    pub fn run_line(&self, line: &str, writer: &mut ResultsWriter) -> PipelineResult<CorrelationResult> {
        let job = CorrelationJob::parse_record(line).inspect_err(|e| {
            warn!("拒絕工作項目 {:?}: {}", line.trim(), e);
            JobMetrics::record_rejected();
        })?;
        self.run_and_append(&job, writer).map(|(result, _)| result)
    }

    /// 依序執行多行工作項目，空白行略過
    pub fn run_records<I, T>(&self, records: I, writer: &mut ResultsWriter) -> PipelineResult<BatchSummary>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut summary = BatchSummary::new();
        for line in records {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            self.run_batch_item(line, writer, &mut summary)?;
        }
        summary.log();
        Ok(summary)
    }

    /// 執行 CSV 工作項目檔（含標題列），每列重組為一行工作項目後解析
    pub fn run_batch<P: AsRef<Path>>(&self, path: P, writer: &mut ResultsWriter) -> PipelineResult<BatchSummary> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::NotFound(path.display().to_string()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| PipelineError::Computation(e.to_string()))?;

        let mut summary = BatchSummary::new();
        for (index, record) in reader.records().enumerate() {
            match record {
                Ok(record) => {
                    let line = record.iter().collect::<Vec<_>>().join(",");
                    info!("[{}] {}", index + 1, line);
                    self.run_batch_item(&line, writer, &mut summary)?;
                }
                Err(e) => {
                    warn!("無法讀取第 {} 筆工作項目: {}", index + 1, e);
                    JobMetrics::record_rejected();
                    summary.record_rejected();
                }
            }
        }

        summary.log();
        Ok(summary)
    }

    fn run_batch_item(&self, line: &str, writer: &mut ResultsWriter, summary: &mut BatchSummary) -> PipelineResult<()> {
        let job = match CorrelationJob::parse_record(line) {
            Ok(job) => job,
            Err(e) => {
                warn!("拒絕工作項目 {:?}: {}", line, e);
                JobMetrics::record_rejected();
                summary.record_rejected();
                return Ok(());
            }
        };

        let (result, outcome) = self.run_and_append(&job, writer)?;
        summary.record(&result, outcome);
        Ok(())
    }

    fn evaluate(&self, job: &CorrelationJob) -> (CorrelationResult, JobOutcome) {
        info!("開始: {}", job.to_record());
        let started = Instant::now();

        let (value, elapsed, outcome) = match CorrelationPipeline::new(&self.source).run(job, started) {
            Ok(run) => {
                let outcome = if run.value.is_some() {
                    JobOutcome::Correlated
                } else {
                    JobOutcome::Undefined
                };
                (run.value, run.elapsed, outcome)
            }
            Err(e) => {
                error!("作業 {} 失敗 ({}): {}", job.to_record(), e.kind(), e);
                (None, started.elapsed(), JobOutcome::Failed)
            }
        };

        JobMetrics::record_job(job.method, job.frequency, outcome, elapsed);
        (CorrelationResult::new(job, value, elapsed.as_secs_f64()), outcome)
    }
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| format!("{:.6}", v))
}
