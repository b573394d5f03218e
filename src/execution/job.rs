//! 工作項目
//!
//! 一筆工作項目是以逗號分隔的六個欄位：
//! `商品A,商品B,期間標籤,頻率,相關係數方法,重複編號`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use crate::correlation::CorrelationMethod;
use crate::domain_types::Frequency;

/// 工作項目欄位數
pub const JOB_FIELD_COUNT: usize = 6;

/// 一次相關係數作業
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationJob {
    pub instrument_a: String,
    pub instrument_b: String,
    /// 不解讀，原樣寫入結果
    pub period_label: String,
    pub frequency: Frequency,
    pub method: CorrelationMethod,
    pub repeat: u32,
}

impl CorrelationJob {
    /// 解析一行工作項目
    pub fn parse_record(line: &str) -> PipelineResult<Self> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        Self::from_fields(&fields)
    }

    /// 由已切好的欄位建立作業，欄位前後空白會被去除
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> PipelineResult<Self> {
        if fields.len() != JOB_FIELD_COUNT {
            return Err(PipelineError::Format(format!(
                "需要 {} 個欄位，實際為 {} 個",
                JOB_FIELD_COUNT,
                fields.len()
            )));
        }

        let field = |i: usize| fields[i].as_ref().trim();

        let instrument_a = required(field(0), "instrument_a")?;
        let instrument_b = required(field(1), "instrument_b")?;
        let frequency = Frequency::from_str(field(3))?;
        let method = CorrelationMethod::from_str(field(4))?;
        let repeat = parse_repeat(field(5))?;

        Ok(Self {
            instrument_a,
            instrument_b,
            period_label: field(2).to_string(),
            frequency,
            method,
            repeat,
        })
    }

    /// 還原成工作項目字串
    pub fn to_record(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.instrument_a,
            self.instrument_b,
            self.period_label,
            self.frequency.code(),
            self.method,
            self.repeat
        )
    }
}

impl fmt::Display for CorrelationJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {} {} {} #{}",
            self.instrument_a, self.instrument_b, self.period_label, self.frequency, self.method, self.repeat
        )
    }
}

impl FromStr for CorrelationJob {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_record(s)
    }
}

fn required(value: &str, name: &str) -> PipelineResult<String> {
    if value.is_empty() {
        return Err(PipelineError::Format(format!("{} 不可為空", name)));
    }
    Ok(value.to_string())
}

fn parse_repeat(value: &str) -> PipelineResult<u32> {
    match value.parse::<u32>() {
        Ok(repeat) if repeat > 0 => Ok(repeat),
        _ => Err(PipelineError::Format(format!("無效的重複編號: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[test]
    fn test_parse_record() {
        let job = CorrelationJob::parse_record("CPLE6,ITSA4,1Year,millisecond,spearman,8").unwrap();

        assert_eq!(job.instrument_a, "CPLE6");
        assert_eq!(job.instrument_b, "ITSA4");
        assert_eq!(job.period_label, "1Year");
        assert_eq!(job.frequency, Frequency::Millisecond);
        assert_eq!(job.method, CorrelationMethod::Spearman);
        assert_eq!(job.repeat, 8);
    }

    #[test]
    fn test_parse_trims_fields_and_accepts_aliases() {
        let job = CorrelationJob::parse_record(" VALE3 , PETR4 ,6Months, 1T , Kendall , 2\n").unwrap();

        assert_eq!(job.instrument_a, "VALE3");
        assert_eq!(job.frequency, Frequency::Minute);
        assert_eq!(job.method, CorrelationMethod::Kendall);
        assert_eq!(job.to_record(), "VALE3,PETR4,6Months,minute,kendall,2");
    }

    #[rstest]
    #[case("CPLE6,ITSA4,1Year,millisecond,spearman")]
    #[case("CPLE6,ITSA4,1Year,millisecond,spearman,8,extra")]
    #[case("")]
    #[case("CPLE6,ITSA4,1Year,weekly,spearman,8")]
    #[case("CPLE6,ITSA4,1Year,second,cosine,8")]
    #[case("CPLE6,ITSA4,1Year,second,pearson,0")]
    #[case("CPLE6,ITSA4,1Year,second,pearson,-1")]
    #[case("CPLE6,ITSA4,1Year,second,pearson,1.5")]
    #[case(",ITSA4,1Year,second,pearson,1")]
    fn test_malformed_records_are_format_errors(#[case] line: &str) {
        assert_matches!(CorrelationJob::parse_record(line), Err(PipelineError::Format(_)));
    }

    #[test]
    fn test_empty_period_label_is_allowed() {
        let job: CorrelationJob = "A,B,,day,pearson,1".parse().unwrap();
        assert_eq!(job.period_label, "");
        assert_eq!(job.to_string(), "A/B  day pearson #1");
    }
}
