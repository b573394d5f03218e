use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::validation::{ValidationError, ValidationUtils, Validator};
use crate::data_ingestion::{LoaderConfig, TradingHoursFilter};

/// 可用的日誌級別
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
/// 可用的日誌格式
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// 整體配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub data: DataConfig,
    pub output: OutputConfig,
    pub preprocess: PreprocessConfig,
    pub log: LogConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        self.data.validate()?;
        self.output.validate()?;
        self.preprocess.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

impl ApplicationConfig {
    /// 序列載入器配置
    pub fn loader_config(&self) -> LoaderConfig {
        let mut loader = LoaderConfig::new(&self.data.clean_dir);
        loader.file_suffix = self.data.file_suffix.clone();
        loader
    }

    /// 交易時段過濾器
    pub fn trading_hours(&self) -> TradingHoursFilter {
        TradingHoursFilter::new(self.preprocess.start_hour, self.preprocess.end_hour)
    }
}

/// 資料目錄配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// 清洗後序列檔目錄
    pub clean_dir: PathBuf,
    /// 原始 Tick 檔目錄
    pub raw_dir: PathBuf,
    /// 序列檔名後綴
    pub file_suffix: String,
}

impl Validator for DataConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.clean_dir.to_string_lossy(), "data.clean_dir")?;
        ValidationUtils::not_empty(&self.raw_dir.to_string_lossy(), "data.raw_dir")?;
        ValidationUtils::not_empty(&self.file_suffix, "data.file_suffix")?;

        Ok(())
    }
}

/// 輸出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub results_file: PathBuf,
}

impl Validator for OutputConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::not_empty(&self.results_file.to_string_lossy(), "output.results_file")
    }
}

/// 預處理配置，交易時段為 UTC 小時的左閉右開區間
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Validator for PreprocessConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::in_range(self.start_hour, 0, 23, "preprocess.start_hour")?;
        ValidationUtils::in_range(self.end_hour, self.start_hour + 1, 24, "preprocess.end_hour")?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
    /// 額外寫入的日誌檔，未設定時只輸出到 stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(&self.level.to_lowercase(), &LOG_LEVELS, "log.level")?;
        ValidationUtils::one_of(&self.format.to_lowercase(), &LOG_FORMATS, "log.format")?;

        Ok(())
    }
}
