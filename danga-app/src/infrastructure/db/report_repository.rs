use super::entities::{report, Report};
use crate::domain::ReportTarget;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Status of a report nobody has looked at yet.
const OPEN_STATUS: &str = "open";

#[derive(Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files an open report. Returns false when this reporter already
    /// reported the same target.
    pub async fn create(
        &self,
        target: ReportTarget,
        target_id: Uuid,
        reporter_id: Uuid,
        reason: String,
    ) -> Result<bool, DbErr> {
        let active = report::ActiveModel {
            id: Set(Uuid::new_v4()),
            target_type: Set(target.as_str().to_string()),
            target_id: Set(target_id),
            reporter_id: Set(reporter_id),
            reason: Set(reason),
            status: Set(OPEN_STATUS.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let inserted = Report::insert(active)
            .on_conflict(
                OnConflict::columns([
                    report::Column::TargetType,
                    report::Column::TargetId,
                    report::Column::ReporterId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted > 0)
    }
}
