use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::csv_io::{CsvError, CsvReader, CsvReaderConfig, CsvResult};
use crate::domain_types::TickSeries;

/// 清洗後序列檔的預設後綴
pub const DEFAULT_SERIES_SUFFIX: &str = "_transformed.csv";

/// 商品序列來源
///
/// 回傳的序列依時間穩定排序，重複時間戳不合併。
pub trait SeriesSource {
    fn load(&self, symbol: &str) -> CsvResult<TickSeries>;
}

/// 載入器配置
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// 清洗後序列檔所在目錄
    pub data_dir: PathBuf,
    /// 檔名後綴，檔名為 `<商品代碼><後綴>`
    pub file_suffix: String,
    pub reader: CsvReaderConfig,
}

impl LoaderConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_suffix: DEFAULT_SERIES_SUFFIX.to_string(),
            reader: CsvReaderConfig::default(),
        }
    }
}

/// 從磁碟載入清洗後的商品序列
#[derive(Debug, Clone)]
pub struct DataLoader {
    config: LoaderConfig,
    reader: CsvReader,
}

impl DataLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let reader = CsvReader::new(config.reader.clone());
        Self { config, reader }
    }

    /// 商品對應的序列檔路徑
    pub fn series_path(&self, symbol: &str) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}{}", symbol, self.config.file_suffix))
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }
}

impl SeriesSource for DataLoader {
    fn load(&self, symbol: &str) -> CsvResult<TickSeries> {
        let path = self.series_path(symbol);
        let series = self.reader.read_ticks(&path, symbol)?;
        debug!("載入 {} 共 {} 筆 ({})", symbol, series.len(), path.display());
        Ok(series)
    }
}

/// 記憶體中的序列來源
#[derive(Debug, Clone, Default)]
pub struct InMemorySeriesSource {
    series: BTreeMap<String, TickSeries>,
}

impl InMemorySeriesSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入序列（以序列的商品代碼為鍵）
    pub fn with_series(mut self, series: TickSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: TickSeries) {
        self.series.insert(series.symbol.clone(), series);
    }
}

impl SeriesSource for InMemorySeriesSource {
    fn load(&self, symbol: &str) -> CsvResult<TickSeries> {
        let mut series = self
            .series
            .get(symbol)
            .cloned()
            .ok_or_else(|| CsvError::NotFound(format!("memory://{}", symbol)))?;
        series.sort_by_time();
        Ok(series)
    }
}
