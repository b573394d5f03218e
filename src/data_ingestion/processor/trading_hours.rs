//! 原始 Tick 檔的交易時段過濾與補值
//!
//! 原始檔（`<商品代碼>_ticks.csv`）至少包含 `time_msc`（毫秒時間戳）
//! 與 `last`（成交價，可能為空）兩欄。處理步驟：
//!
//! 1. 只保留 UTC 小時落在 `[start_hour, end_hour)` 的 Tick
//! 2. 缺值先向前補、再向後補
//! 3. 輸出 `<商品代碼>_transformed.csv`，欄位為 `datetime,instrument,last`

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::csv_io::reader::{column_index, parse_optional_price};
use super::csv_io::{CsvError, CsvReader, CsvResult};
use super::data_loader::DEFAULT_SERIES_SUFFIX;
use crate::domain_types::ColumnName;
use crate::utils::{format_datetime_ms, timestamp_ms_to_datetime};

/// 原始 Tick 檔的後綴
pub const RAW_TICKS_SUFFIX: &str = "_ticks.csv";

/// 原始 Tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTick {
    pub timestamp: DateTime<Utc>,
    pub last: Option<f64>,
}

#[derive(Debug, Serialize)]
struct CleanRow<'a> {
    datetime: String,
    instrument: &'a str,
    last: f64,
}

/// 單一檔案的處理結果
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessedFile {
    pub symbol: String,
    pub output_path: PathBuf,
    pub rows: usize,
}

/// 整個目錄的處理結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessReport {
    pub processed: Vec<PreprocessedFile>,
    pub failed: Vec<(PathBuf, String)>,
}

/// 交易時段過濾器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingHoursFilter {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for TradingHoursFilter {
    fn default() -> Self {
        Self {
            start_hour: 10,
            end_hour: 17,
        }
    }
}

impl TradingHoursFilter {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self { start_hour, end_hour }
    }

    /// 是否落在交易時段內（左閉右開）
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let hour = timestamp.hour();
        hour >= self.start_hour && hour < self.end_hour
    }

    /// 過濾後補值，回傳 (時間, 價格)
    ///
    /// 整段都沒有價格時回傳空集合。
    pub fn apply(&self, ticks: &[RawTick]) -> Vec<(DateTime<Utc>, f64)> {
        let in_session: Vec<&RawTick> = ticks.iter().filter(|tick| self.contains(&tick.timestamp)).collect();
        let prices: Vec<Option<f64>> = in_session.iter().map(|tick| tick.last).collect();

        match fill_forward_backward(&prices) {
            Some(filled) => in_session
                .iter()
                .zip(filled)
                .map(|(tick, price)| (tick.timestamp, price))
                .collect(),
            None => Vec::new(),
        }
    }

    /// 讀取原始檔
    pub fn read_raw_ticks(&self, path: &Path) -> CsvResult<Vec<RawTick>> {
        let mut reader = CsvReader::default().open(path)?;
        let headers = reader.headers()?.clone();
        let time_idx = column_index(&headers, ColumnName::TIME_MSC)?;
        let last_idx = column_index(&headers, ColumnName::LAST)?;

        let mut ticks = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |pos| pos.line());

            let raw_time = record.get(time_idx).unwrap_or_default();
            let millis = raw_time
                .parse::<i64>()
                .map_err(|_| CsvError::TimestampParseError {
                    line,
                    value: raw_time.to_string(),
                })?;

            let raw_last = record.get(last_idx).unwrap_or_default();
            let last = parse_optional_price(raw_last).map_err(|_| CsvError::NumberParseError {
                line,
                column: ColumnName::LAST.to_string(),
                value: raw_last.to_string(),
            })?;

            ticks.push(RawTick {
                timestamp: timestamp_ms_to_datetime(millis),
                last,
            });
        }

        Ok(ticks)
    }

    /// 處理單一原始檔並寫出清洗後的序列檔
    pub fn preprocess_file(&self, raw_path: &Path, output_dir: &Path) -> CsvResult<PreprocessedFile> {
        let symbol = symbol_from_raw_path(raw_path);
        let ticks = self.read_raw_ticks(raw_path)?;
        let cleaned = self.apply(&ticks);

        fs::create_dir_all(output_dir)?;
        let output_path = output_dir.join(format!("{}{}", symbol, DEFAULT_SERIES_SUFFIX));
        let mut writer = csv::Writer::from_path(&output_path)?;
        if cleaned.is_empty() {
            writer.write_record([ColumnName::DATETIME, ColumnName::INSTRUMENT, ColumnName::LAST])?;
        }
        for (timestamp, price) in &cleaned {
            writer.serialize(CleanRow {
                datetime: format_datetime_ms(timestamp),
                instrument: &symbol,
                last: *price,
            })?;
        }
        writer.flush()?;

        info!("{}: 保留 {} / {} 筆", symbol, cleaned.len(), ticks.len());
        Ok(PreprocessedFile {
            symbol,
            output_path,
            rows: cleaned.len(),
        })
    }

    /// 處理目錄下所有 `*.csv` 原始檔，單一檔案失敗不影響其他檔案
    pub fn preprocess_dir(&self, raw_dir: &Path, output_dir: &Path) -> CsvResult<PreprocessReport> {
        let pattern = raw_dir.join("*.csv");
        let pattern = pattern.to_string_lossy();
        let mut paths: Vec<PathBuf> = glob::glob(&pattern)
            .map_err(|e| CsvError::NotFound(format!("{}: {}", pattern, e)))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("無法讀取路徑: {}", e);
                    None
                }
            })
            .collect();
        paths.sort();

        info!("找到 {} 個原始檔", paths.len());
        let mut report = PreprocessReport::default();
        for (i, path) in paths.iter().enumerate() {
            match self.preprocess_file(path, output_dir) {
                Ok(file) => report.processed.push(file),
                Err(e) => {
                    error!("處理 {} 失敗: {}", path.display(), e);
                    report.failed.push((path.clone(), e.to_string()));
                }
            }
            if (i + 1) % 10 == 0 {
                info!("已處理 {}/{} 個檔案", i + 1, paths.len());
            }
        }

        info!(
            "完成: 成功 {} 個, 失敗 {} 個, 輸出至 {}",
            report.processed.len(),
            report.failed.len(),
            output_dir.display()
        );
        Ok(report)
    }
}

/// 由原始檔名取出商品代碼：`ABEV3_ticks.csv` -> `ABEV3`
pub fn symbol_from_raw_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(RAW_TICKS_SUFFIX) {
        Some(symbol) => symbol.to_string(),
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(name),
    }
}

/// 先向前、再向後補值；全部缺值時回傳 `None`
pub fn fill_forward_backward(values: &[Option<f64>]) -> Option<Vec<f64>> {
    let first_known = values.iter().flatten().copied().next()?;

    let mut carried = first_known;
    Some(
        values
            .iter()
            .map(|value| {
                if let Some(v) = value {
                    carried = *v;
                }
                carried
            })
            .collect(),
    )
}
