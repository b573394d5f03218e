pub mod data_point;
pub mod types;
pub mod frequency;
pub mod time_series;
pub mod resampler;
pub mod aligner;

pub use data_point::{AlignedRow, TickPoint};
pub use types::{ColumnName, DomainError};
pub use frequency::Frequency;
pub use time_series::{AlignedPair, HasTimestamp, TickSeries, TimeSeries};
pub use resampler::Resampler;
pub use aligner::PairAligner;
