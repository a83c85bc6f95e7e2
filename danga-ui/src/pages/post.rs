use danga_app::domain::{PostCard, PostDetail, ReportTarget, Viewer, ANONYMOUS_LABEL};
use danga_errors::AppError;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api::{get_post_detail, get_viewer, into_app_error};
use crate::components::{
    use_sign_in_prompt, CommentSection, ErrorDisplay, LoadingSpinner, LoginPrompt, ReportButton,
    VoteButton,
};

#[component]
pub fn PostPage() -> impl IntoView {
    let params = use_params_map();
    let post_id = move || params.read().get("id").unwrap_or_default();

    let (sign_in, on_sign_in) = use_sign_in_prompt();

    let page = Resource::new(post_id, |id| async move {
        let viewer = get_viewer().await.map_err(into_app_error)?;
        let detail = get_post_detail(id).await.map_err(into_app_error)?;
        Ok::<_, AppError>((viewer, detail))
    });

    view! {
        <a href="/" class="back-link">"← 피드로"</a>

        <Suspense fallback=move || view! { <LoadingSpinner label="게시글을 불러오는 중..."/> }>
            {move || page.get().map(|result| match result {
                Ok((viewer, detail)) => view! { <PostView viewer=viewer detail=detail on_sign_in=on_sign_in/> }.into_any(),
                Err(AppError::NotFound(message)) => view! {
                    <ErrorDisplay title="게시글이 없어요" message=message/>
                }.into_any(),
                Err(e) => view! {
                    <ErrorDisplay
                        message=e.user_message().to_string()
                        on_retry=Callback::new(move |_| page.refetch())
                    />
                }.into_any(),
            })}
        </Suspense>

        <LoginPrompt message=sign_in/>
    }
}

#[component]
fn PostView(viewer: Option<Viewer>, detail: PostDetail, on_sign_in: Callback<String>) -> impl IntoView {
    let PostDetail { post, comments } = detail;
    let PostCard { id, caption, image_url, author_label, votes, .. } = post;
    let alt = caption.clone().unwrap_or_default();
    let is_logged_in = viewer.is_some();

    view! {
        <article class="post">
            <img class="post__image" src=image_url alt=alt/>
            <div class="post__body">
                <span class="post__author">
                    {author_label.unwrap_or_else(|| ANONYMOUS_LABEL.to_string())}
                </span>
                {caption.map(|caption| view! { <p class="post__caption">{caption}</p> })}
                <VoteButton
                    post_id=id
                    initial=votes
                    is_logged_in=is_logged_in
                    on_sign_in=on_sign_in
                />
                <ReportButton
                    target=ReportTarget::Post
                    target_id=id
                    is_logged_in=is_logged_in
                    on_sign_in=on_sign_in
                />
            </div>
        </article>

        <CommentSection
            post_id=id
            comments=comments
            viewer=viewer
            on_sign_in=on_sign_in
        />
    }
}
