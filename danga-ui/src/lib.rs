pub mod api;
pub mod components;
pub mod pages;
mod signal_cell;

pub use signal_cell::SignalCell;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use pages::{FeedPage, PostPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="단가 | 오늘의 코디"/>
        <Meta name="description" content="코디 사진을 올리고 좋아요와 한 줄 코멘트를 받아보세요"/>
        <Stylesheet id="leptos" href="/pkg/danga.css"/>

        <Router>
            <main class="container">
                <Routes fallback=|| "페이지를 찾을 수 없습니다">
                    <Route path=path!("/") view=FeedPage/>
                    <Route path=path!("/p/:id") view=PostPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
