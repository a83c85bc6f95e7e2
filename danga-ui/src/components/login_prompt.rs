use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_query_map};

/// Query parameter the sign-in callback uses to report a failure.
const AUTH_MESSAGE_PARAM: &str = "authMessage";

/// Sign-in link that brings the user back to `path` afterwards.
fn login_href(path: &str) -> String {
    format!("/auth/login?next={}", urlencoding::encode(path))
}

/// Page-level sign-in prompt state. Starts open when the page was reached
/// through a failed sign-in.
pub fn use_sign_in_prompt() -> (RwSignal<Option<String>>, Callback<String>) {
    let query = use_query_map();
    let message = RwSignal::new(query.with_untracked(|q| q.get(AUTH_MESSAGE_PARAM)));
    let open = Callback::new(move |text: String| message.set(Some(text)));
    (message, open)
}

/// Sign-in affordance raised by the like button, the comment section and
/// the report forms. `message` holds the text of the last request; `None`
/// hides the prompt.
#[component]
pub fn LoginPrompt(message: RwSignal<Option<String>>) -> impl IntoView {
    let location = use_location();
    let close = move |_| message.set(None);

    view! {
        <Show when=move || message.with(Option::is_some)>
            <div class="login-prompt" role="dialog" aria-modal="true">
                <div class="login-prompt__backdrop" on:click=close></div>
                <div class="login-prompt__panel">
                    <p class="login-prompt__title">"로그인이 필요해요"</p>
                    <p class="login-prompt__message">
                        {move || message.get().unwrap_or_default()}
                    </p>
                    <a
                        href=move || location.pathname.with(|path| login_href(path))
                        rel="external"
                        class="login-prompt__button"
                    >
                        "Google로 로그인"
                    </a>
                    <button type="button" class="login-prompt__close" on:click=close>
                        "닫기"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_href_carries_current_path() {
        assert_eq!(login_href("/p/42"), "/auth/login?next=%2Fp%2F42");
        assert_eq!(login_href("/"), "/auth/login?next=%2F");
    }
}
