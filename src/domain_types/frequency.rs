//! 重採樣頻率定義
//!
//! 由細到粗依序為：原始毫秒、秒、分鐘、小時、日。
//! 原始毫秒模式不建立新的時間網格，只合併重複時間戳。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::types::DomainError;

/// 數據頻率定義
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl Frequency {
    /// 獲取頻率的毫秒數（即每個區間的寬度）
    pub fn milliseconds(&self) -> i64 {
        match self {
            Frequency::Millisecond => 1,
            Frequency::Second => 1_000,
            Frequency::Minute => 60_000,
            Frequency::Hour => 3_600_000,
            Frequency::Day => 86_400_000,
        }
    }

    /// 是否需要建立固定寬度的時間網格
    pub fn is_regridded(&self) -> bool {
        !matches!(self, Frequency::Millisecond)
    }

    /// 工作項與結果表使用的代碼
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Millisecond => "millisecond",
            Frequency::Second => "second",
            Frequency::Minute => "minute",
            Frequency::Hour => "hour",
            Frequency::Day => "day",
        }
    }

    /// 獲取所有頻率列表（由細到粗）
    pub fn all() -> Vec<Frequency> {
        vec![
            Frequency::Millisecond,
            Frequency::Second,
            Frequency::Minute,
            Frequency::Hour,
            Frequency::Day,
        ]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    /// 同時接受文字代碼與 pandas 別名（1ms、1S、1T、1H、1D）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let freq = match trimmed {
            "1ms" => Frequency::Millisecond,
            "1S" | "1s" => Frequency::Second,
            "1T" | "1min" => Frequency::Minute,
            "1H" | "1h" => Frequency::Hour,
            "1D" | "1d" => Frequency::Day,
            other => match other.to_lowercase().as_str() {
                "millisecond" | "ms" => Frequency::Millisecond,
                "second" => Frequency::Second,
                "minute" => Frequency::Minute,
                "hour" => Frequency::Hour,
                "day" => Frequency::Day,
                _ => return Err(DomainError::InvalidFrequency(trimmed.to_string())),
            },
        };
        Ok(freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_widths() {
        assert_eq!(Frequency::Second.milliseconds(), 1_000);
        assert_eq!(Frequency::Minute.milliseconds(), 60_000);
        assert_eq!(Frequency::Hour.milliseconds(), 3_600_000);
        assert_eq!(Frequency::Day.milliseconds(), 86_400_000);
    }

    #[test]
    fn test_frequency_parse_codes_and_aliases() {
        assert_eq!("millisecond".parse::<Frequency>().unwrap(), Frequency::Millisecond);
        assert_eq!("1ms".parse::<Frequency>().unwrap(), Frequency::Millisecond);
        assert_eq!("Second".parse::<Frequency>().unwrap(), Frequency::Second);
        assert_eq!("1S".parse::<Frequency>().unwrap(), Frequency::Second);
        assert_eq!("1T".parse::<Frequency>().unwrap(), Frequency::Minute);
        assert_eq!(" hour ".parse::<Frequency>().unwrap(), Frequency::Hour);
        assert_eq!("1D".parse::<Frequency>().unwrap(), Frequency::Day);
    }

    #[test]
    fn test_frequency_parse_rejects_unknown() {
        assert_eq!(
            "week".parse::<Frequency>(),
            Err(DomainError::InvalidFrequency("week".to_string()))
        );
    }

    #[test]
    fn test_frequency_order_is_fine_to_coarse() {
        let all = Frequency::all();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.windows(2).all(|w| w[0].milliseconds() < w[1].milliseconds()));
        assert!(!Frequency::Millisecond.is_regridded());
        assert!(Frequency::Day.is_regridded());
    }

    #[test]
    fn test_frequency_display_round_trips_code() {
        for freq in Frequency::all() {
            assert_eq!(freq.to_string().parse::<Frequency>().unwrap(), freq);
        }
    }
}
