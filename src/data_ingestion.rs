//! 資料匯入模組
//!
//! 負責原始 Tick 檔的交易時段過濾與補值，以及清洗後序列檔的載入。

pub mod processor;

pub use processor::{
    CsvError, CsvReader, CsvReaderConfig, CsvResult, DataLoader, InMemorySeriesSource,
    LoaderConfig, PreprocessReport, PreprocessedFile, RawTick, SeriesSource, TradingHoursFilter,
    DEFAULT_SERIES_SUFFIX,
};
