use thiserror::Error;

use crate::data_ingestion::CsvError;
use crate::domain_types::DomainError;

/// 單一作業的錯誤
#[derive(Error, Debug)]
pub enum PipelineError {
    /// 找不到商品的序列檔
    #[error("找不到序列: {0}")]
    NotFound(String),

    /// 工作項目格式錯誤
    #[error("工作項目格式錯誤: {0}")]
    Format(String),

    /// 其他計算過程中的錯誤
    #[error("計算錯誤: {0}")]
    Computation(String),

    /// 結果表無法寫入
    #[error("結果寫入失敗: {0}")]
    Output(String),
}

impl PipelineError {
    /// 指標標籤用的錯誤類別
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NotFound(_) => "not_found",
            PipelineError::Format(_) => "format",
            PipelineError::Computation(_) => "computation",
            PipelineError::Output(_) => "output",
        }
    }
}

impl From<CsvError> for PipelineError {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::NotFound(path) => PipelineError::NotFound(path),
            other => PipelineError::Computation(other.to_string()),
        }
    }
}

impl From<DomainError> for PipelineError {
    fn from(err: DomainError) -> Self {
        PipelineError::Format(err.to_string())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_csv_error_mapping() {
        let missing: PipelineError = CsvError::NotFound("/clean/X_transformed.csv".into()).into();
        assert_matches!(missing, PipelineError::NotFound(path) if path.ends_with("X_transformed.csv"));

        let column: PipelineError = CsvError::MissingColumn("last".into()).into();
        assert_matches!(column, PipelineError::Computation(_));
    }

    #[test]
    fn test_domain_error_is_format() {
        let err: PipelineError = DomainError::InvalidFrequency("2W".into()).into();
        assert_matches!(err, PipelineError::Format(_));
        assert_eq!(err.kind(), "format");
    }
}
