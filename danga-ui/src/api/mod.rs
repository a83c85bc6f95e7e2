//! Server functions backing the pages, plus the gateway adapters that let
//! the interaction controllers call them.

mod comments;
mod posts;
mod reports;
mod votes;

pub use comments::{create_comment, delete_comment, CreateCommentFn, DeleteCommentFn, ServerComments};
pub use posts::{get_feed, get_post_detail, get_viewer, GetFeedFn, GetPostDetailFn, GetViewerFn};
pub use reports::{create_report, CreateReportFn, ServerReports};
pub use votes::{create_vote, delete_vote, CreateVoteFn, DeleteVoteFn, ServerVotes};

use danga_errors::AppError;
use server_fn::ServerFnError;

/// Session key holding the signed-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Recovers the typed error a server function failed with. Anything that is
/// not a server-side failure means no answer arrived.
pub fn into_app_error(err: ServerFnError) -> AppError {
    match err {
        ServerFnError::ServerError(message) => message.parse().unwrap_or_else(|never| match never {}),
        other => AppError::Network(other.to_string()),
    }
}

#[cfg(feature = "ssr")]
pub(crate) mod session {
    use super::USER_ID_KEY;
    use axum::http::request::Parts;
    use danga_errors::AppError;
    use leptos::prelude::use_context;
    use tower_sessions::Session;
    use uuid::Uuid;

    pub async fn current_user_id() -> Option<Uuid> {
        let parts = use_context::<Parts>()?;
        let session = parts.extensions.get::<Session>().cloned()?;

        match session.get::<Uuid>(USER_ID_KEY).await {
            Ok(user_id) => user_id,
            Err(e) => {
                tracing::warn!("Failed to read session: {}", e);
                None
            }
        }
    }

    pub async fn require_user(sign_in_message: &str) -> Result<Uuid, AppError> {
        current_user_id()
            .await
            .ok_or_else(|| AppError::Unauthorized(sign_in_message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_keeps_its_category() {
        let sent = AppError::Forbidden("본인 댓글만 삭제할 수 있습니다.".to_string());
        let received = into_app_error(ServerFnError::ServerError(sent.to_string()));
        assert_eq!(received, sent);
    }

    #[test]
    fn test_transport_failure_becomes_network() {
        let received = into_app_error(ServerFnError::Request("connection refused".to_string()));
        assert!(received.is_transport());
    }
}
