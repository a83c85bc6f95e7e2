use leptos::prelude::*;

/// Full-width failure block for page-level loads.
#[component]
pub fn ErrorDisplay(
    #[prop(into)] message: String,
    #[prop(into, optional)] title: Option<String>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let title = title.unwrap_or_else(|| "문제가 생겼어요".to_string());

    view! {
        <section class="error" role="alert">
            <h2 class="error__title">{title}</h2>
            <p class="error__message">{message}</p>
            {on_retry.map(|retry| view! {
                <button type="button" class="error__retry" on:click=move |_| retry.run(())>
                    "다시 시도"
                </button>
            })}
        </section>
    }
}
