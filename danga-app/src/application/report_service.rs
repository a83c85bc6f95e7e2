use crate::domain::{validate_report_reason, ReportTarget};
use crate::infrastructure::db::{db_error, CommentRepository, PostRepository, ReportRepository};
use danga_errors::AppError;
use uuid::Uuid;

const TARGET_MISSING: &str = "신고 대상을 찾을 수 없습니다.";
const ALREADY_REPORTED: &str = "이미 신고했습니다.";
const REPORT_FAILED: &str = "신고 접수에 실패했습니다. 잠시 후 다시 시도해주세요.";

/// Maps whether the insert wrote a row to the caller-facing result.
pub fn filing_outcome(inserted: bool) -> Result<(), AppError> {
    if inserted {
        Ok(())
    } else {
        Err(AppError::Conflict(ALREADY_REPORTED.to_string()))
    }
}

#[derive(Clone)]
pub struct ReportService {
    reports: ReportRepository,
    posts: PostRepository,
    comments: CommentRepository,
}

impl ReportService {
    pub fn new(reports: ReportRepository, posts: PostRepository, comments: CommentRepository) -> Self {
        Self {
            reports,
            posts,
            comments,
        }
    }

    pub async fn create(
        &self,
        reporter_id: Uuid,
        target: ReportTarget,
        target_id: Uuid,
        raw_reason: &str,
    ) -> Result<(), AppError> {
        let reason = validate_report_reason(raw_reason)?;

        if !self.target_exists(target, target_id).await? {
            return Err(AppError::NotFound(TARGET_MISSING.to_string()));
        }

        let inserted = self
            .reports
            .create(target, target_id, reporter_id, reason)
            .await
            .map_err(db_error("reports.insert", REPORT_FAILED))?;

        filing_outcome(inserted)?;

        tracing::info!(%target, %target_id, %reporter_id, "report filed");
        Ok(())
    }

    async fn target_exists(&self, target: ReportTarget, target_id: Uuid) -> Result<bool, AppError> {
        match target {
            ReportTarget::Post => Ok(self
                .posts
                .find_live(target_id)
                .await
                .map_err(db_error("posts.find", REPORT_FAILED))?
                .is_some()),
            ReportTarget::Comment => Ok(self
                .comments
                .find_by_id(target_id)
                .await
                .map_err(db_error("comments.find", REPORT_FAILED))?
                .is_some_and(|comment| comment.is_active())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_report_is_a_conflict() {
        assert_eq!(filing_outcome(true), Ok(()));
        assert_eq!(
            filing_outcome(false),
            Err(AppError::Conflict("이미 신고했습니다.".to_string()))
        );
    }
}
