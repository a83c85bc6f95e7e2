use danga_app::application::{CommentBoard, CommentBoardState, SignInPrompt};
use danga_app::domain::{Comment, ReportTarget, SortOrder, Thread, Viewer, MAX_COMMENT_LENGTH};
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::api::ServerComments;
use crate::components::ReportButton;
use crate::SignalCell;

type BoardCell = SignalCell<CommentBoardState>;

fn board(
    post_id: Uuid,
    state: BoardCell,
    on_sign_in: Callback<String>,
) -> CommentBoard<ServerComments, impl SignInPrompt, BoardCell> {
    let prompt = move |message: &str| on_sign_in.run(message.to_string());
    CommentBoard::new(post_id, ServerComments, prompt, state)
}

fn format_time(comment: &Comment) -> String {
    comment.created_at.format("%Y.%m.%d %H:%M").to_string()
}

#[component]
pub fn CommentSection(
    post_id: Uuid,
    comments: Vec<Comment>,
    viewer: Option<Viewer>,
    #[prop(into)] on_sign_in: Callback<String>,
) -> impl IntoView {
    let viewer_id = viewer.as_ref().map(|v| v.id);
    let state: BoardCell = SignalCell(RwSignal::new(CommentBoardState::new(
        comments,
        viewer.is_some(),
        viewer.and_then(|v| v.label),
    )));

    let threads = Memo::new(move |_| state.0.with(|s| s.threads()));
    let submitting = move || state.0.with(|s| s.is_submitting_top_level());
    let locked = move || state.0.with(|s| s.has_pending_submission());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let board = board(post_id, state, on_sign_in);
        spawn_local(async move { board.submit_draft().await });
    };

    let on_sort = move |ev: leptos::ev::Event| {
        let order = match event_target_value(&ev).as_str() {
            "latest" => SortOrder::Latest,
            _ => SortOrder::Oldest,
        };
        state.0.update(|s| s.set_sort_order(order));
    };

    view! {
        <section class="comments">
            <header class="comments__header">
                <h2 class="comments__title">
                    "댓글 " <span class="comments__count">{move || state.0.with(|s| s.visible_count())}</span>
                </h2>
                <select class="comments__sort" prop:disabled=locked on:change=on_sort>
                    <option value="oldest" selected=move || state.0.with(|s| s.sort_order() == SortOrder::Oldest)>
                        "오래된순"
                    </option>
                    <option value="latest" selected=move || state.0.with(|s| s.sort_order() == SortOrder::Latest)>
                        "최신순"
                    </option>
                </select>
            </header>

            {move || state.0.with(|s| s.notice().cloned()).map(|notice| view! {
                <p
                    class="comments__notice"
                    class=("comments__notice--error", notice.is_error)
                    role="status"
                >
                    {notice.text}
                </p>
            })}

            <form class="comment-form" on:submit=on_submit>
                <textarea
                    class="comment-form__input"
                    placeholder="코디에 대한 생각을 남겨주세요"
                    maxlength=MAX_COMMENT_LENGTH
                    prop:value=move || state.0.with(|s| s.draft().to_string())
                    on:input=move |ev| state.0.update(|s| s.set_draft(event_target_value(&ev)))
                    prop:disabled=submitting
                ></textarea>
                <button type="submit" class="comment-form__button" prop:disabled=locked>
                    {move || if submitting() { "등록 중..." } else { "등록" }}
                </button>
            </form>

            {move || {
                let threads = threads.get();
                if threads.is_empty() {
                    view! { <p class="comments__empty">"첫 댓글을 남겨보세요."</p> }.into_any()
                } else {
                    view! {
                        <ul class="comments__list">
                            {threads.into_iter().map(|thread| view! {
                                <CommentThread
                                    thread=thread
                                    post_id=post_id
                                    viewer_id=viewer_id
                                    state=state
                                    on_sign_in=on_sign_in
                                />
                            }).collect::<Vec<_>>()}
                        </ul>
                    }.into_any()
                }
            }}
        </section>
    }
}

#[component]
fn CommentThread(
    thread: Thread,
    post_id: Uuid,
    viewer_id: Option<Uuid>,
    state: BoardCell,
    on_sign_in: Callback<String>,
) -> impl IntoView {
    let parent = thread.parent;
    let parent_id = parent.id;

    let toggle_parent = parent.clone();
    let on_toggle_reply = move |_| {
        state.0.update(|s| s.toggle_reply_form(&toggle_parent));
    };

    let reply_parent = StoredValue::new(parent.clone());
    let on_reply = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let board = board(post_id, state, on_sign_in);
        let parent = reply_parent.get_value();
        spawn_local(async move { board.submit_reply_draft(&parent).await });
    };
    let reply_submitting = move || state.0.with(|s| s.is_reply_submitting(parent_id));

    view! {
        <li class="comment-thread">
            <CommentItem
                comment=parent
                post_id=post_id
                viewer_id=viewer_id
                state=state
                on_sign_in=on_sign_in
            />
            <button
                type="button"
                class="comment-thread__reply-toggle"
                prop:disabled=move || state.0.with(|s| s.has_pending_submission())
                on:click=on_toggle_reply
            >
                {move || if state.0.with(|s| s.is_reply_form_open(parent_id)) { "답글 취소" } else { "답글 달기" }}
            </button>

            {(!thread.replies.is_empty()).then(|| view! {
                <ul class="comment-thread__replies">
                    {thread.replies.into_iter().map(|reply| view! {
                        <li class="comment-thread__reply">
                            <CommentItem
                                comment=reply
                                post_id=post_id
                                viewer_id=viewer_id
                                state=state
                                on_sign_in=on_sign_in
                            />
                        </li>
                    }).collect::<Vec<_>>()}
                </ul>
            })}

            <Show when=move || state.0.with(|s| s.is_reply_form_open(parent_id))>
                <form class="comment-form comment-form--reply" on:submit=on_reply>
                    <textarea
                        class="comment-form__input"
                        maxlength=MAX_COMMENT_LENGTH
                        prop:value=move || state.0.with(|s| s.reply_draft().to_string())
                        on:input=move |ev| state.0.update(|s| s.set_reply_draft(event_target_value(&ev)))
                        prop:disabled=reply_submitting
                    ></textarea>
                    <button type="submit" class="comment-form__button" prop:disabled=reply_submitting>
                        {move || if reply_submitting() { "등록 중..." } else { "답글 등록" }}
                    </button>
                </form>
            </Show>
        </li>
    }
}

#[component]
fn CommentItem(
    comment: Comment,
    post_id: Uuid,
    viewer_id: Option<Uuid>,
    state: BoardCell,
    on_sign_in: Callback<String>,
) -> impl IntoView {
    let comment_id = comment.id;
    let is_mine = viewer_id == Some(comment.user_id);
    let deleting = move || state.0.with(|s| s.is_deleting(comment_id));

    let on_delete = move |_| {
        let board = board(post_id, state, on_sign_in);
        spawn_local(async move { board.remove(comment_id).await });
    };

    view! {
        <article class="comment" class=("comment--reply", !comment.is_top_level())>
            <header class="comment__meta">
                <span class="comment__author">{comment.display_label().to_string()}</span>
                <time class="comment__time" datetime=comment.created_at.to_rfc3339()>
                    {format_time(&comment)}
                </time>
            </header>
            <p class="comment__body">{comment.body.clone()}</p>
            {is_mine.then(|| view! {
                <button
                    type="button"
                    class="comment__delete"
                    prop:disabled=move || state.0.with(|s| s.is_remove_locked(comment_id))
                    on:click=on_delete
                >
                    {move || if deleting() { "삭제 중..." } else { "삭제" }}
                </button>
            })}
            {(!is_mine).then(|| view! {
                <ReportButton
                    target=ReportTarget::Comment
                    target_id=comment_id
                    is_logged_in=viewer_id.is_some()
                    on_sign_in=on_sign_in
                />
            })}
        </article>
    }
}
