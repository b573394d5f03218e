//! CSV 處理錯誤定義

use thiserror::Error;

/// CSV 處理錯誤類型
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("找不到序列檔: {0}")]
    NotFound(String),

    #[error("檔案讀取錯誤: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 解析錯誤: {0}")]
    ParseError(#[from] csv::Error),

    #[error("缺少必要欄位: {0}")]
    MissingColumn(String),

    #[error("時間戳解析錯誤: 第 {line} 行, 值 '{value}'")]
    TimestampParseError { line: u64, value: String },

    #[error("數值解析錯誤: 第 {line} 行, 欄位 {column}, 值 '{value}'")]
    NumberParseError {
        line: u64,
        column: String,
        value: String,
    },
}

/// CSV 處理結果類型
pub type CsvResult<T> = Result<T, CsvError>;
