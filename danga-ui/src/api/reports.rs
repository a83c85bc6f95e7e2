use async_trait::async_trait;
use danga_app::application::ReportGateway;
use danga_app::domain::ReportTarget;
use danga_errors::AppError;
use leptos::prelude::*;
use server_fn::ServerFnError;
use uuid::Uuid;

use super::into_app_error;

#[server(CreateReportFn, "/api", endpoint = "reports_create")]
pub async fn create_report(
    target_type: String,
    target_id: String,
    reason: String,
) -> Result<(), ServerFnError> {
    use super::session::require_user;
    use danga_app::infrastructure::security::parse_resource_id;
    use danga_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let user_id = require_user("로그인 후 신고할 수 있습니다.").await?;
    let target = target_type.parse::<ReportTarget>()?;
    let target_id = parse_resource_id(&target_id, "신고 대상 ID")?;

    ctx.rate_limiter.check(user_id).map_err(AppError::from)?;

    Ok(ctx.reports.create(user_id, target, target_id, &reason).await?)
}

/// Report form gateway over the report server function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerReports;

#[async_trait(?Send)]
impl ReportGateway for ServerReports {
    async fn create_report(
        &self,
        target: ReportTarget,
        target_id: Uuid,
        reason: String,
    ) -> Result<(), AppError> {
        create_report(target.as_str().to_string(), target_id.to_string(), reason)
            .await
            .map_err(into_app_error)
    }
}
