use danga_app::application::{VoteController, VoteState};
use danga_app::domain::VoteSummary;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::api::ServerVotes;
use crate::SignalCell;

#[component]
pub fn VoteButton(
    post_id: Uuid,
    initial: VoteSummary,
    is_logged_in: bool,
    #[prop(into)] on_sign_in: Callback<String>,
) -> impl IntoView {
    let state = SignalCell(RwSignal::new(VoteState::new(
        initial.count,
        initial.liked_by_me,
        is_logged_in,
    )));

    let on_click = move |_| {
        let prompt = move |message: &str| on_sign_in.run(message.to_string());
        let controller = VoteController::new(post_id, ServerVotes, prompt, state);
        spawn_local(async move { controller.toggle().await });
    };

    let liked = move || state.0.with(|s| s.liked_by_me);
    let pending = move || state.0.with(|s| s.is_pending);

    view! {
        <div class="vote">
            <button
                type="button"
                class="vote__button"
                class=("vote__button--liked", liked)
                aria-pressed=move || liked().to_string()
                aria-label=move || if liked() { "좋아요 취소" } else { "좋아요" }
                prop:disabled=pending
                on:click=on_click
            >
                <span class="vote__icon">{move || if liked() { "♥" } else { "♡" }}</span>
                <span class="vote__count">{move || state.0.with(|s| s.count)}</span>
            </button>
            {move || state.0.with(|s| s.message.clone()).map(|message| view! {
                <p class="vote__message" role="status">{message}</p>
            })}
        </div>
    }
}
