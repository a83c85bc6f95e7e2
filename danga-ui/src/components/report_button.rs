use danga_app::application::{ReportController, ReportFormState};
use danga_app::domain::{ReportTarget, MAX_REPORT_REASON_LENGTH};
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::api::ServerReports;
use crate::SignalCell;

/// "신고" button that unfolds a reason form for one post or comment.
#[component]
pub fn ReportButton(
    target: ReportTarget,
    target_id: Uuid,
    is_logged_in: bool,
    #[prop(into)] on_sign_in: Callback<String>,
) -> impl IntoView {
    let state = SignalCell(RwSignal::new(ReportFormState::new(is_logged_in)));

    let is_open = move || state.0.with(|s| s.is_open());
    let submitting = move || state.0.with(|s| s.is_submitting());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let prompt = move |message: &str| on_sign_in.run(message.to_string());
        let controller = ReportController::new(target, target_id, ServerReports, prompt, state);
        spawn_local(async move { controller.submit().await });
    };

    view! {
        <div class="report">
            <button
                type="button"
                class="report__toggle"
                prop:disabled=submitting
                on:click=move |_| state.0.update(|s| if s.is_open() { s.close() } else { s.open() })
            >
                "신고"
            </button>

            <Show when=is_open>
                <form class="report__form" on:submit=on_submit>
                    <p class="report__title">{format!("{} 신고", target.label())}</p>
                    <textarea
                        class="report__input"
                        placeholder="예: 욕설/비방, 광고성 게시물, 부적절한 콘텐츠 등"
                        maxlength=MAX_REPORT_REASON_LENGTH
                        prop:value=move || state.0.with(|s| s.reason().to_string())
                        on:input=move |ev| state.0.update(|s| s.set_reason(event_target_value(&ev)))
                        prop:disabled=submitting
                    ></textarea>
                    <p class="report__counter">
                        {move || state.0.with(|s| s.reason().trim().chars().count())}
                        "/" {MAX_REPORT_REASON_LENGTH}
                    </p>
                    <div class="report__actions">
                        <button
                            type="button"
                            class="report__cancel"
                            prop:disabled=submitting
                            on:click=move |_| state.0.update(|s| s.close())
                        >
                            "취소"
                        </button>
                        <button type="submit" class="report__submit" prop:disabled=submitting>
                            {move || if submitting() { "신고 중..." } else { "신고 접수" }}
                        </button>
                    </div>
                </form>
            </Show>

            {move || state.0.with(|s| s.notice().cloned()).map(|notice| view! {
                <p
                    class="report__notice"
                    class=("report__notice--error", notice.is_error)
                    role="status"
                >
                    {notice.text}
                </p>
            })}
        </div>
    }
}
