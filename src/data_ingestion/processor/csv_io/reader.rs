//! CSV 檔案讀取器

use super::error::{CsvError, CsvResult};
use crate::domain_types::{ColumnName, TickPoint, TickSeries};
use crate::utils::parse_datetime;
use std::fs::File;
use std::io::Read;
use std::num::ParseFloatError;
use std::path::Path;
use tracing::debug;

/// CSV 讀取器配置
#[derive(Debug, Clone, PartialEq)]
pub struct CsvReaderConfig {
    /// 分隔符
    pub separator: u8,
    /// 時間欄位名稱
    pub timestamp_column: String,
    /// 價格欄位名稱
    pub price_column: String,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            separator: b',',
            timestamp_column: ColumnName::DATETIME.to_string(),
            price_column: ColumnName::LAST.to_string(),
        }
    }
}

/// CSV 檔案讀取器
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvReaderConfig,
}

impl CsvReader {
    /// 創建新的 CSV 讀取器
    pub fn new(config: CsvReaderConfig) -> Self {
        Self { config }
    }

    /// 設定分隔符
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.config.separator = separator;
        self
    }

    /// 設定時間欄位名稱
    pub fn with_timestamp_column(mut self, column: impl Into<String>) -> Self {
        self.config.timestamp_column = column.into();
        self
    }

    /// 設定價格欄位名稱
    pub fn with_price_column(mut self, column: impl Into<String>) -> Self {
        self.config.price_column = column.into();
        self
    }

    pub fn config(&self) -> &CsvReaderConfig {
        &self.config
    }

    /// 開啟檔案並建立 csv 讀取器，檔案不存在時回傳 `NotFound`
    pub fn open<P: AsRef<Path>>(&self, path: P) -> CsvResult<csv::Reader<File>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CsvError::NotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        Ok(self.builder().from_reader(file))
    }

    /// 從檔案路徑讀取 Tick 序列
    ///
    /// 回傳的序列依時間穩定排序，重複時間戳保留不合併。
    pub fn read_ticks<P: AsRef<Path>>(&self, path: P, symbol: &str) -> CsvResult<TickSeries> {
        let reader = self.open(path)?;
        self.collect_ticks(reader, symbol)
    }

    /// 從任意來源讀取 Tick 序列
    pub fn read_ticks_from<R: Read>(&self, source: R, symbol: &str) -> CsvResult<TickSeries> {
        let reader = self.builder().from_reader(source);
        self.collect_ticks(reader, symbol)
    }

    /// 從字串讀取 Tick 序列
    pub fn read_ticks_str(&self, data: &str, symbol: &str) -> CsvResult<TickSeries> {
        self.read_ticks_from(data.as_bytes(), symbol)
    }

    fn builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.config.separator)
            .trim(csv::Trim::All);
        builder
    }

    fn collect_ticks<R: Read>(&self, mut reader: csv::Reader<R>, symbol: &str) -> CsvResult<TickSeries> {
        let headers = reader.headers()?.clone();
        let time_idx = column_index(&headers, &self.config.timestamp_column)?;
        let price_idx = column_index(&headers, &self.config.price_column)?;

        let mut points = Vec::new();
        let mut missing = 0usize;
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |pos| pos.line());

            let raw_time = record.get(time_idx).unwrap_or_default();
            let timestamp = parse_datetime(raw_time).ok_or_else(|| CsvError::TimestampParseError {
                line,
                value: raw_time.to_string(),
            })?;

            let raw_price = record.get(price_idx).unwrap_or_default();
            let price = parse_optional_price(raw_price).map_err(|_| CsvError::NumberParseError {
                line,
                column: self.config.price_column.clone(),
                value: raw_price.to_string(),
            })?;
            if price.is_none() {
                missing += 1;
            }

            // 缺值保留時間戳，由重採樣略過
            points.push(TickPoint::new(timestamp, price.unwrap_or(f64::NAN)));
        }

        if missing > 0 {
            debug!("{} 有 {} 筆缺值的 Tick", symbol, missing);
        }

        let mut series = TickSeries::from_points(symbol, None, points);
        series.sort_by_time();
        Ok(series)
    }
}

/// 解析價格欄，空字串與非有限值（NaN、inf）視為缺值
pub fn parse_optional_price(raw: &str) -> Result<Option<f64>, ParseFloatError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let price = raw.parse::<f64>()?;
    Ok(price.is_finite().then_some(price))
}

/// 依標題名稱找出欄位位置
pub fn column_index(headers: &csv::StringRecord, name: &str) -> CsvResult<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
}
