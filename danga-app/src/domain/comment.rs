use danga_errors::AppError;
use serde::{Deserialize, Serialize};

pub const MAX_COMMENT_LENGTH: usize = 500;

/// Shown wherever an author has no resolved nickname.
pub const ANONYMOUS_LABEL: &str = "익명";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: uuid::Uuid,
    pub post_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub body: String,
    pub parent_id: Option<uuid::Uuid>,
    pub depth: i16,
    pub reply_to_user_id: Option<uuid::Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub author_label: Option<String>,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn display_label(&self) -> &str {
        self.author_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(ANONYMOUS_LABEL)
    }

    pub fn with_author_label(mut self, label: Option<String>) -> Self {
        self.author_label = label;
        self
    }
}

/// Trims the body and checks it is between 1 and `MAX_COMMENT_LENGTH`
/// characters. Returns the trimmed body on success.
pub fn validate_comment_body(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(AppError::Validation("댓글 내용을 입력해주세요.".to_string()));
    }

    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::Validation(format!(
            "댓글은 최대 {}자까지 입력할 수 있습니다.",
            MAX_COMMENT_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// Mention prefix placed in a freshly opened reply form.
pub fn reply_prefill(author_label: Option<&str>) -> String {
    let nickname = author_label
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(ANONYMOUS_LABEL);
    format!("@{} ", nickname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_body() {
        assert_eq!(validate_comment_body("  멋져요  ").unwrap(), "멋져요");
    }

    #[test]
    fn test_validate_rejects_blank() {
        assert!(matches!(
            validate_comment_body(" \n\t "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        let at_limit = "가".repeat(MAX_COMMENT_LENGTH);
        assert!(validate_comment_body(&at_limit).is_ok());

        let over_limit = "가".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(validate_comment_body(&over_limit).is_err());
    }

    #[test]
    fn test_validate_limit_applies_after_trimming() {
        let padded = format!("   {}   ", "a".repeat(MAX_COMMENT_LENGTH));
        assert!(validate_comment_body(&padded).is_ok());
    }

    #[test]
    fn test_reply_prefill() {
        assert_eq!(reply_prefill(Some("minji")), "@minji ");
        assert_eq!(reply_prefill(Some("  ")), "@익명 ");
        assert_eq!(reply_prefill(None), "@익명 ");
    }
}
