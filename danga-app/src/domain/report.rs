use danga_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_REPORT_REASON_LENGTH: usize = 5;
pub const MAX_REPORT_REASON_LENGTH: usize = 300;

/// What a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTarget {
    Post,
    Comment,
}

impl ReportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    /// Korean noun used in headings such as "댓글 신고".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Post => "게시글",
            Self::Comment => "댓글",
        }
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportTarget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            _ => Err(AppError::Validation(
                "신고 대상 타입이 올바르지 않습니다.".to_string(),
            )),
        }
    }
}

/// Trims the reason and checks its length. Returns the trimmed reason.
pub fn validate_report_reason(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if length < MIN_REPORT_REASON_LENGTH {
        return Err(AppError::Validation(format!(
            "신고 사유는 최소 {}자 이상 입력해주세요.",
            MIN_REPORT_REASON_LENGTH
        )));
    }

    if length > MAX_REPORT_REASON_LENGTH {
        return Err(AppError::Validation(format!(
            "신고 사유는 최대 {}자까지 입력할 수 있습니다.",
            MAX_REPORT_REASON_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_is_trimmed() {
        assert_eq!(validate_report_reason("  광고 게시물입니다  ").unwrap(), "광고 게시물입니다");
    }

    #[test]
    fn test_reason_length_counts_characters_after_trim() {
        assert!(validate_report_reason("   욕설    ").is_err());
        assert!(validate_report_reason("욕설비방글").is_ok());

        let longest = "가".repeat(MAX_REPORT_REASON_LENGTH);
        assert!(validate_report_reason(&longest).is_ok());

        let err = validate_report_reason(&format!("{}가", longest)).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("신고 사유는 최대 300자까지 입력할 수 있습니다.".to_string())
        );
    }

    #[test]
    fn test_short_reason_message() {
        let err = validate_report_reason("스팸").unwrap_err();
        assert_eq!(err.message(), "신고 사유는 최소 5자 이상 입력해주세요.");
    }

    #[test]
    fn test_target_parses_lowercase_names_only() {
        assert_eq!("post".parse::<ReportTarget>().unwrap(), ReportTarget::Post);
        assert_eq!("comment".parse::<ReportTarget>().unwrap(), ReportTarget::Comment);
        assert!(matches!("Post".parse::<ReportTarget>(), Err(AppError::Validation(_))));
        assert!("user".parse::<ReportTarget>().is_err());
        assert_eq!(ReportTarget::Comment.label(), "댓글");
    }
}
