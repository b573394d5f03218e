use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::ApplicationConfig;

/// 選擇環境的變數名
pub const ENV_VAR: &str = "CORRELATION_ENV";
/// 覆蓋配置目錄的變數名
pub const CONFIG_DIR_VAR: &str = "CONFIG_DIR";
/// 環境變數覆蓋的前綴，例如 `CORRELATION__LOG__LEVEL=debug`
pub const ENV_PREFIX: &str = "CORRELATION";

/// 環境類型枚舉
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// 從環境變數取得當前環境設定
    pub fn from_env() -> Self {
        Self::parse(&env::var(ENV_VAR).unwrap_or_else(|_| "development".into()))
    }

    /// 未知值一律視為開發環境
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// 轉換為配置文件名
    pub fn as_filename(&self) -> &'static str {
        match self {
            Environment::Development => "development.toml",
            Environment::Production => "production.toml",
        }
    }
}

/// 配置加載器
///
/// 優先順序由低到高：內建預設值、`<配置目錄>/<環境>.toml`（可不存在）、環境變數。
pub struct ConfigLoader;

impl ConfigLoader {
    /// 載入指定環境的配置，`config_dir` 為 `None` 時取 `CONFIG_DIR` 或 `config`
    pub fn load(env: Environment, config_dir: Option<&Path>) -> Result<Config, ConfigError> {
        let config_dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from(env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| "config".into())),
        };
        let config_path = config_dir.join(env.as_filename());
        debug!("配置檔: {}", config_path.display());

        Self::with_defaults(Config::builder())?
            .add_source(File::from(config_path).required(false))
            .add_source(
                ConfigEnvironment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("data.clean_dir", "clean_dataset/instrument_series")?
            .set_default("data.raw_dir", "dataset")?
            .set_default("data.file_suffix", "_transformed.csv")?
            .set_default("output.results_file", "correlation_results.csv")?
            .set_default("preprocess.start_hour", 10)?
            .set_default("preprocess.end_hour", 17)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")
    }
}

impl ApplicationConfig {
    /// 從環境變數指定的環境加載配置
    pub fn load_from_env(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        debug!("從環境加載配置: {:?}", env);
        Self::load(env, config_dir)
    }

    /// 從指定環境加載配置（只反序列化，驗證由呼叫端決定）
    pub fn load(env: Environment, config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        ConfigLoader::load(env, config_dir)?.try_deserialize()
    }
}
