use async_trait::async_trait;
use danga_app::application::CommentGateway;
use danga_app::domain::Comment;
use danga_errors::AppError;
use leptos::prelude::*;
use server_fn::ServerFnError;
use uuid::Uuid;

use super::into_app_error;

#[server(CreateCommentFn, "/api", endpoint = "comments_create")]
pub async fn create_comment(
    post_id: String,
    body: String,
    parent_id: Option<String>,
) -> Result<Comment, ServerFnError> {
    use super::session::require_user;
    use danga_app::application::COMMENT_SIGN_IN_MESSAGE;
    use danga_app::infrastructure::security::parse_resource_id;
    use danga_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let user_id = require_user(COMMENT_SIGN_IN_MESSAGE).await?;
    let post_id = parse_resource_id(&post_id, "게시글 ID")?;
    let parent_id = parent_id
        .as_deref()
        .map(|raw| parse_resource_id(raw, "댓글 ID"))
        .transpose()?;

    ctx.rate_limiter.check(user_id).map_err(AppError::from)?;

    Ok(ctx.comments.create(user_id, post_id, &body, parent_id).await?)
}

#[server(DeleteCommentFn, "/api", endpoint = "comments_delete")]
pub async fn delete_comment(comment_id: String) -> Result<(), ServerFnError> {
    use super::session::require_user;
    use danga_app::application::DELETE_SIGN_IN_MESSAGE;
    use danga_app::infrastructure::security::parse_resource_id;
    use danga_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let user_id = require_user(DELETE_SIGN_IN_MESSAGE).await?;
    let comment_id = parse_resource_id(&comment_id, "댓글 ID")?;

    ctx.rate_limiter.check(user_id).map_err(AppError::from)?;

    Ok(ctx.comments.delete(user_id, comment_id).await?)
}

/// Comment section gateway over the comment server functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerComments;

#[async_trait(?Send)]
impl CommentGateway for ServerComments {
    async fn create_comment(
        &self,
        post_id: Uuid,
        body: String,
        parent_id: Option<Uuid>,
    ) -> Result<Comment, AppError> {
        create_comment(post_id.to_string(), body, parent_id.map(|id| id.to_string()))
            .await
            .map_err(into_app_error)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), AppError> {
        delete_comment(comment_id.to_string())
            .await
            .map_err(into_app_error)
    }
}
