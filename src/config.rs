/// 配置管理模組
///
/// 本模組負責加載與驗證系統配置，配置以參數傳入各元件，不使用全域實例。
// 宣告子模組
pub mod loader;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, Environment};
pub use types::*;
pub use validation::{ValidationError, ValidationUtils, Validator};
