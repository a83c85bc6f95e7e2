use async_trait::async_trait;
use danga_app::application::VoteGateway;
use danga_app::domain::VoteSummary;
use danga_errors::AppError;
use leptos::prelude::*;
use server_fn::ServerFnError;
use uuid::Uuid;

use super::into_app_error;

#[server(CreateVoteFn, "/api", endpoint = "votes_create")]
pub async fn create_vote(post_id: String) -> Result<VoteSummary, ServerFnError> {
    use super::session::require_user;
    use danga_app::application::VOTE_SIGN_IN_MESSAGE;
    use danga_app::infrastructure::security::parse_resource_id;
    use danga_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let user_id = require_user(VOTE_SIGN_IN_MESSAGE).await?;
    let post_id = parse_resource_id(&post_id, "게시글 ID")?;

    ctx.rate_limiter.check(user_id).map_err(AppError::from)?;

    Ok(ctx.votes.like(user_id, post_id).await?)
}

#[server(DeleteVoteFn, "/api", endpoint = "votes_delete")]
pub async fn delete_vote(post_id: String) -> Result<VoteSummary, ServerFnError> {
    use super::session::require_user;
    use danga_app::application::VOTE_SIGN_IN_MESSAGE;
    use danga_app::infrastructure::security::parse_resource_id;
    use danga_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let user_id = require_user(VOTE_SIGN_IN_MESSAGE).await?;
    let post_id = parse_resource_id(&post_id, "게시글 ID")?;

    ctx.rate_limiter.check(user_id).map_err(AppError::from)?;

    Ok(ctx.votes.unlike(user_id, post_id).await?)
}

/// Like button gateway over the vote server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerVotes;

#[async_trait(?Send)]
impl VoteGateway for ServerVotes {
    async fn create_vote(&self, post_id: Uuid) -> Result<VoteSummary, AppError> {
        create_vote(post_id.to_string()).await.map_err(into_app_error)
    }

    async fn delete_vote(&self, post_id: Uuid) -> Result<VoteSummary, AppError> {
        delete_vote(post_id.to_string()).await.map_err(into_app_error)
    }
}
