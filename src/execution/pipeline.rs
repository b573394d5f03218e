//! 載入 → 重採樣 → 對齊 → 計算

use std::time::{Duration, Instant};

use tracing::debug;

use super::error::PipelineResult;
use super::job::CorrelationJob;
use crate::correlation::CorrelationEngine;
use crate::data_ingestion::SeriesSource;
use crate::domain_types::{AlignedPair, PairAligner, Resampler};

/// 管線執行結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOutcome {
    pub value: Option<f64>,
    /// 從開始載入到統計量算完的時間
    pub elapsed: Duration,
    pub aligned_rows: usize,
}

/// 單一作業的計算管線
pub struct CorrelationPipeline<'a, S: SeriesSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: SeriesSource + ?Sized> CorrelationPipeline<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// 載入兩個商品並對齊到作業指定的頻率
    pub fn align(&self, job: &CorrelationJob) -> PipelineResult<AlignedPair> {
        let series_a = self.source.load(&job.instrument_a)?;
        let series_b = self.source.load(&job.instrument_b)?;
        debug!(
            "載入完成: {}={} 筆, {}={} 筆",
            job.instrument_a,
            series_a.len(),
            job.instrument_b,
            series_b.len()
        );

        let resampled_a = Resampler::resample(&series_a, job.frequency);
        let resampled_b = Resampler::resample(&series_b, job.frequency);
        debug!(
            "重採樣 {}: {} 筆 / {} 筆",
            job.frequency,
            resampled_a.len(),
            resampled_b.len()
        );

        let pair = PairAligner::align(&resampled_a, &resampled_b);
        debug!("對齊後 {} 筆", pair.len());
        Ok(pair)
    }

    /// 執行整條管線
    ///
    /// `started` 為計時起點，由呼叫端在載入前取得。
    pub fn run(&self, job: &CorrelationJob, started: Instant) -> PipelineResult<PipelineOutcome> {
        let pair = self.align(job)?;
        let timed = CorrelationEngine::correlate_timed(&pair, job.method, started);

        Ok(PipelineOutcome {
            value: timed.value,
            elapsed: timed.elapsed,
            aligned_rows: pair.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::CorrelationMethod;
    use crate::data_ingestion::InMemorySeriesSource;
    use crate::domain_types::{Frequency, TickPoint, TickSeries};
    use crate::execution::PipelineError;
    use assert_matches::assert_matches;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    fn series(symbol: &str, offsets_ms: &[i64], prices: &[f64]) -> TickSeries {
        let t0 = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let points = offsets_ms
            .iter()
            .zip(prices)
            .map(|(&ms, &price)| TickPoint::new(t0 + ChronoDuration::milliseconds(ms), price))
            .collect();
        TickSeries::from_points(symbol, None, points)
    }

    fn job(frequency: Frequency, method: CorrelationMethod) -> CorrelationJob {
        CorrelationJob {
            instrument_a: "AAA".into(),
            instrument_b: "BBB".into(),
            period_label: "1Day".into(),
            frequency,
            method,
            repeat: 1,
        }
    }

    #[test]
    fn test_run_second_frequency() {
        let source = InMemorySeriesSource::new()
            .with_series(series("AAA", &[0, 400, 1_200, 2_500], &[1.0, 2.0, 3.0, 4.0]))
            .with_series(series("BBB", &[100, 1_900, 2_100], &[10.0, 30.0, 40.0]));

        let pipeline = CorrelationPipeline::new(&source);
        let outcome = pipeline
            .run(&job(Frequency::Second, CorrelationMethod::Pearson), Instant::now())
            .unwrap();

        // AAA 每秒: 2, 3, 4；BBB 每秒: 10, 30, 40
        assert_eq!(outcome.aligned_rows, 3);
        let value = outcome.value.unwrap();
        assert!(value > 0.9 && value <= 1.0);
    }

    #[test]
    fn test_missing_instrument_is_not_found() {
        let source = InMemorySeriesSource::new().with_series(series("AAA", &[0, 1], &[1.0, 2.0]));
        let pipeline = CorrelationPipeline::new(&source);

        let result = pipeline.run(&job(Frequency::Millisecond, CorrelationMethod::Kendall), Instant::now());
        assert_matches!(result, Err(PipelineError::NotFound(_)));
    }
}
