// monitor/logger.rs - 日誌初始化

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::monitor::{MonitorError, MonitorResult};

/// 建立日誌過濾器，`RUST_LOG` 優先於配置的級別
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_lowercase()))
}

/// 拆出日誌檔的目錄與檔名
pub fn log_file_parts(path: &Path) -> MonitorResult<(PathBuf, PathBuf)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| MonitorError::LoggerError(format!("無效的日誌檔路徑: {}", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}

/// 初始化全域日誌
///
/// 有設定日誌檔時同時寫入 stderr 與檔案，回傳的 guard 必須存活到程式結束，
/// 否則緩衝中的日誌會遺失。
pub fn init_logging(config: &LogConfig) -> MonitorResult<Option<WorkerGuard>> {
    let filter = build_filter(&config.level);

    let (writer, guard) = match &config.file {
        Some(path) => {
            let (dir, file_name) = log_file_parts(path)?;
            fs::create_dir_all(&dir)
                .map_err(|e| MonitorError::LoggerError(format!("無法建立日誌目錄: {}", e)))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(std::io::stderr.and(non_blocking)), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    let result = match config.format.to_lowercase().as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };
    result.map_err(|e| MonitorError::InitializationError(format!("設置日誌系統失敗: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_file_parts() {
        let (dir, name) = log_file_parts(Path::new("/var/log/correlation.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, PathBuf::from("correlation.log"));

        let (dir, name) = log_file_parts(Path::new("run.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, PathBuf::from("run.log"));
    }

    #[test]
    fn test_log_file_parts_rejects_root() {
        assert_matches!(log_file_parts(Path::new("/")), Err(MonitorError::LoggerError(_)));
    }
}
