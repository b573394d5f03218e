//! 相關係數計算模組
//!
//! 提供 Pearson、Spearman 與 Kendall 三種統計量，作用於對齊後的兩欄價格。

pub mod engine;
pub mod method;
pub mod statistics;

pub use engine::CorrelationEngine;
pub use method::CorrelationMethod;
pub use statistics::{kendall_tau_b, pearson, rank_average, spearman};

/// 計算相關係數所需的最少對齊筆數
pub const MIN_OBSERVATIONS: usize = 2;
