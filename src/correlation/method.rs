use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain_types::DomainError;

/// 相關係數計算方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// 線性相關
    Pearson,
    /// 等級相關
    Spearman,
    /// 一致性相關 (tau-b)
    Kendall,
}

impl CorrelationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationMethod::Pearson => "pearson",
            CorrelationMethod::Spearman => "spearman",
            CorrelationMethod::Kendall => "kendall",
        }
    }

    pub fn all() -> [CorrelationMethod; 3] {
        [
            CorrelationMethod::Pearson,
            CorrelationMethod::Kendall,
            CorrelationMethod::Spearman,
        ]
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pearson" => Ok(CorrelationMethod::Pearson),
            "spearman" => Ok(CorrelationMethod::Spearman),
            "kendall" => Ok(CorrelationMethod::Kendall),
            _ => Err(DomainError::InvalidCorrelationMethod(s.trim().to_string())),
        }
    }
}
