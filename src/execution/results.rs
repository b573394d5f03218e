//! 只增不改的結果表

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::job::CorrelationJob;
use crate::correlation::CorrelationMethod;
use crate::data_ingestion::{CsvError, CsvResult};
use crate::domain_types::Frequency;

/// 結果表的一列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub instrument_a: String,
    pub instrument_b: String,
    pub period_label: String,
    pub frequency: Frequency,
    pub method: CorrelationMethod,
    pub repeat: u32,
    /// 統計量未定義時為空欄位
    pub correlation_value: Option<f64>,
    pub execution_seconds: f64,
}

impl CorrelationResult {
    pub fn new(job: &CorrelationJob, correlation_value: Option<f64>, execution_seconds: f64) -> Self {
        Self {
            instrument_a: job.instrument_a.clone(),
            instrument_b: job.instrument_b.clone(),
            period_label: job.period_label.clone(),
            frequency: job.frequency,
            method: job.method,
            repeat: job.repeat,
            correlation_value,
            execution_seconds,
        }
    }
}

/// 結果表寫入器
///
/// 以附加模式開啟；檔案不存在或為空時先寫標題列，每寫一列立即 flush。
pub struct ResultsWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows_written: usize,
}

impl ResultsWriter {
    pub fn open<P: AsRef<Path>>(path: P) -> CsvResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let needs_header = fs::metadata(&path).map(|meta| meta.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        Ok(Self {
            path,
            writer,
            rows_written: 0,
        })
    }

    /// 附加一列
    pub fn append(&mut self, result: &CorrelationResult) -> CsvResult<()> {
        self.writer.serialize(result)?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 本次開啟後寫入的列數
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

/// 讀回整張結果表
pub fn read_results<P: AsRef<Path>>(path: P) -> CsvResult<Vec<CorrelationResult>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CsvError::NotFound(path.display().to_string()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .map(|row| row.map_err(CsvError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(value: Option<f64>, repeat: u32) -> CorrelationResult {
        CorrelationResult {
            instrument_a: "CPLE6".into(),
            instrument_b: "ITSA4".into(),
            period_label: "1Year".into(),
            frequency: Frequency::Millisecond,
            method: CorrelationMethod::Spearman,
            repeat,
            correlation_value: value,
            execution_seconds: 0.25,
        }
    }

    #[test]
    fn test_header_written_once_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("results.csv");

        let mut writer = ResultsWriter::open(&path).unwrap();
        writer.append(&sample(Some(0.5), 1)).unwrap();
        drop(writer);

        let mut writer = ResultsWriter::open(&path).unwrap();
        writer.append(&sample(None, 2)).unwrap();
        assert_eq!(writer.rows_written(), 1);
        drop(writer);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "instrument_a,instrument_b,period_label,frequency,method,repeat,correlation_value,execution_seconds",
                "CPLE6,ITSA4,1Year,millisecond,spearman,1,0.5,0.25",
                "CPLE6,ITSA4,1Year,millisecond,spearman,2,,0.25",
            ]
        );

        let rows = read_results(&path).unwrap();
        assert_eq!(rows, vec![sample(Some(0.5), 1), sample(None, 2)]);
    }

    #[test]
    fn test_empty_file_gets_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        fs::write(&path, "").unwrap();

        let mut writer = ResultsWriter::open(&path).unwrap();
        writer.append(&sample(Some(-1.0), 3)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("instrument_a,"));
        assert_eq!(content.lines().count(), 2);
    }
}
