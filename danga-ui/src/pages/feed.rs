use danga_app::domain::{PostCard, Viewer, ANONYMOUS_LABEL};
use danga_errors::AppError;
use leptos::prelude::*;

use crate::api::{get_feed, get_viewer, into_app_error};
use crate::components::{use_sign_in_prompt, ErrorDisplay, LoadingSpinner, LoginPrompt, VoteButton};

#[component]
pub fn FeedPage() -> impl IntoView {
    let (sign_in, on_sign_in) = use_sign_in_prompt();

    let page = Resource::new(
        || (),
        |_| async move {
            let viewer = get_viewer().await.map_err(into_app_error)?;
            let posts = get_feed().await.map_err(into_app_error)?;
            Ok::<_, AppError>((viewer, posts))
        },
    );

    view! {
        <div class="hero">
            <h1 class="hero__title">"오늘의 코디"</h1>
            <p class="hero__subtitle">"마음에 드는 코디에 좋아요를 눌러주세요"</p>
        </div>

        <Suspense fallback=move || view! { <LoadingSpinner/> }>
            {move || page.get().map(|result| match result {
                Ok((viewer, posts)) => view! { <FeedGrid viewer=viewer posts=posts on_sign_in=on_sign_in/> }.into_any(),
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
fn FeedGrid(viewer: Option<Viewer>, posts: Vec<PostCard>, on_sign_in: Callback<String>) -> impl IntoView {
    if posts.is_empty() {
        return view! { <p class="feed__empty">"아직 올라온 코디가 없어요."</p> }.into_any();
    }

    let is_logged_in = viewer.is_some();

    view! {
        <ul class="feed">
            {posts.into_iter().map(|post| {
                let PostCard { id, caption, image_url, author_label, votes, .. } = post;
                let alt = caption.clone().unwrap_or_default();
                view! {
                    <li class="post-card">
                        <a href=format!("/p/{}", id) class="post-card__link">
                            <img class="post-card__image" src=image_url alt=alt/>
                        </a>
                        <div class="post-card__body">
                            <span class="post-card__author">
                                {author_label.unwrap_or_else(|| ANONYMOUS_LABEL.to_string())}
                            </span>
                            {caption.map(|caption| view! { <p class="post-card__caption">{caption}</p> })}
                            <VoteButton
                                post_id=id
                                initial=votes
                                is_logged_in=is_logged_in
                                on_sign_in=on_sign_in
                            />
                        </div>
                    </li>
                }
            }).collect::<Vec<_>>()}
        </ul>
    }.into_any()
}
