use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::info;

use tick_correlation::config::{ApplicationConfig, Validator};
use tick_correlation::data_ingestion::{DataLoader, SeriesSource};
use tick_correlation::execution::{CorrelationJob, JobRunner, ResultsWriter};
use tick_correlation::monitor::{init_logging, JobMetrics};

/// `--test` 使用的內建工作項目
const TEST_RECORD: &str = "CPLE6,ITSA4,1Year,millisecond,spearman,8";

#[derive(Parser, Debug)]
#[command(
    name = "tick_correlation",
    version,
    about = "計算兩個商品 Tick 價格在指定頻率與方法下的相關係數並記錄耗時"
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["record", "test", "batch", "preprocess"])
))]
struct Cli {
    /// 工作項目：商品A,商品B,期間,頻率,方法,重複編號
    record: Option<String>,

    /// 執行內建的測試工作項目
    #[arg(long)]
    test: bool,

    /// 依序執行 CSV 工作項目檔
    #[arg(long, value_name = "FILE")]
    batch: Option<PathBuf>,

    /// 對原始 Tick 檔做交易時段過濾與補值
    #[arg(long)]
    preprocess: bool,

    /// 清洗後序列檔目錄
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// 原始 Tick 檔目錄
    #[arg(long, value_name = "DIR")]
    raw_dir: Option<PathBuf>,

    /// 結果表路徑
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// 配置檔目錄
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

impl Cli {
    /// 命令列參數優先於配置檔
    fn apply_overrides(&self, config: &mut ApplicationConfig) {
        if let Some(dir) = &self.data_dir {
            config.data.clean_dir = dir.clone();
        }
        if let Some(dir) = &self.raw_dir {
            config.data.raw_dir = dir.clone();
        }
        if let Some(file) = &self.output {
            config.output.results_file = file.clone();
        }
    }

    fn single_record(&self) -> Option<String> {
        if self.test {
            Some(TEST_RECORD.to_string())
        } else {
            self.record.clone()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app_config =
        ApplicationConfig::load_from_env(cli.config_dir.as_deref()).context("無法加載應用程序配置")?;
    cli.apply_overrides(&mut app_config);
    app_config.validate().context("配置驗證失敗")?;

    // guard 需存活到程式結束
    let _log_guard = init_logging(&app_config.log).context("無法初始化日誌系統")?;

    if cli.preprocess {
        return run_preprocess(&app_config);
    }

    let runner = JobRunner::new(DataLoader::new(app_config.loader_config()));
    let results_file = &app_config.output.results_file;

    if let Some(batch) = &cli.batch {
        let mut writer = open_results(results_file)?;
        runner
            .run_batch(batch, &mut writer)
            .with_context(|| format!("批次執行失敗: {}", batch.display()))?;
        return Ok(());
    }

    if let Some(record) = cli.single_record() {
        run_single(&runner, &record, results_file)?;
    }

    Ok(())
}

fn open_results(path: &Path) -> Result<ResultsWriter> {
    ResultsWriter::open(path).with_context(|| format!("無法開啟結果表: {}", path.display()))
}

/// 單一作業：工作項目格式錯誤時不建立結果表
fn run_single<S: SeriesSource>(runner: &JobRunner<S>, record: &str, results_file: &Path) -> Result<()> {
    let job = CorrelationJob::parse_record(record)
        .inspect_err(|_| JobMetrics::record_rejected())
        .with_context(|| format!("無法解析工作項目: {}", record))?;

    let mut writer = open_results(results_file)?;
    runner
        .run_and_append(&job, &mut writer)
        .with_context(|| format!("無法執行工作項目: {}", record))?;

    Ok(())
}

fn run_preprocess(app_config: &ApplicationConfig) -> Result<()> {
    let filter = app_config.trading_hours();
    info!(
        "預處理 {} -> {} (UTC {}:00-{}:00)",
        app_config.data.raw_dir.display(),
        app_config.data.clean_dir.display(),
        filter.start_hour,
        filter.end_hour
    );

    let report = filter
        .preprocess_dir(&app_config.data.raw_dir, &app_config.data.clean_dir)
        .context("預處理失敗")?;
    JobMetrics::record_preprocess(report.processed.len(), report.failed.len());

    Ok(())
}
