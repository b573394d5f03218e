pub mod csv_io;
pub mod data_loader;
pub mod trading_hours;

pub use csv_io::{CsvError, CsvReader, CsvReaderConfig, CsvResult};
pub use data_loader::{DataLoader, InMemorySeriesSource, LoaderConfig, SeriesSource, DEFAULT_SERIES_SUFFIX};
pub use trading_hours::{PreprocessReport, PreprocessedFile, RawTick, TradingHoursFilter};
