// 模組定義
pub mod config;
pub mod correlation;
pub mod data_ingestion;
pub mod domain_types;
pub mod execution;
pub mod monitor;
pub mod utils;
