use danga_app::domain::{PostCard, PostDetail, Viewer};
use leptos::prelude::*;
use server_fn::ServerFnError;

#[server(GetViewerFn, "/api", endpoint = "viewer")]
pub async fn get_viewer() -> Result<Option<Viewer>, ServerFnError> {
    use super::session::current_user_id;
    use danga_app::AppContext;

    let Some(user_id) = current_user_id().await else {
        return Ok(None);
    };

    let ctx = expect_context::<AppContext>();
    let profile = ctx.profiles.find_by_id(user_id).await.map_err(|e| {
        tracing::error!("get_viewer: profile lookup failed: {}", e);
        ServerFnError::new("사용자 정보를 불러오지 못했습니다.")
    })?;

    Ok(Some(Viewer {
        id: user_id,
        label: profile.and_then(|p| p.nickname),
    }))
}

#[server(GetFeedFn, "/api", endpoint = "feed")]
pub async fn get_feed() -> Result<Vec<PostCard>, ServerFnError> {
    use super::session::current_user_id;
    use danga_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let viewer_id = current_user_id().await;

    Ok(ctx.posts.feed(viewer_id).await?)
}

#[server(GetPostDetailFn, "/api", endpoint = "post_detail")]
pub async fn get_post_detail(post_id: String) -> Result<PostDetail, ServerFnError> {
    use super::session::current_user_id;
    use danga_app::infrastructure::security::parse_resource_id;
    use danga_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let post_id = parse_resource_id(&post_id, "게시글 ID")?;
    let viewer_id = current_user_id().await;

    Ok(ctx.posts.detail(viewer_id, post_id).await?)
}
