//! 基本領域類型定義

use thiserror::Error;

/// 領域錯誤類型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("無效的頻率: {0}")]
    InvalidFrequency(String),

    #[error("無效的相關係數方法: {0}")]
    InvalidCorrelationMethod(String),
}

/// 標準列名定義
pub struct ColumnName;

impl ColumnName {
    // 清洗後序列檔
    pub const DATETIME: &'static str = "datetime"; // 可解析的時間字串
    pub const INSTRUMENT: &'static str = "instrument"; // 商品代碼
    pub const LAST: &'static str = "last"; // 最新成交價

    // 原始 Tick 檔
    pub const TIME_MSC: &'static str = "time_msc"; // 以毫秒為單位的 i64 時間戳
}
