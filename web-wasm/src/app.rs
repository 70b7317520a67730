//! メインアプリケーションコンポーネント
//!
//! セッションストアとAPIクライアントをコンテキストで全ページへ渡し、
//! ブラウザ履歴のパスからページを切り替える。

use gloo::history::{BrowserHistory, History};
use leptos::prelude::*;
use plate_detect_common::{Route, SessionStore};

use crate::components::navbar::{NavLink, Navbar};
use crate::pages::{about::AboutPage, detail::DetailPage, history::HistoryPage, home::HomePage};
use crate::storage::LocalStorageSlot;
use crate::transport::{build_client, PickedFile};

/// アプリ全体で共有するセッションストア
pub type WebStore = SessionStore<PickedFile, LocalStorageSlot>;
pub type StoreSignal = RwSignal<WebStore, LocalStorage>;

pub fn use_store() -> StoreSignal {
    expect_context::<StoreSignal>()
}

/// ページ遷移（履歴に積む）
pub fn navigate(route: &Route) {
    BrowserHistory::new().push(route.path());
}

#[component]
pub fn App() -> impl IntoView {
    // 起動時に一度だけ復元
    let store: StoreSignal = RwSignal::new_local(SessionStore::restore(LocalStorageSlot));
    provide_context(store);
    provide_context(build_client());

    let history = BrowserHistory::new();
    let location = RwSignal::new(Route::from_path(history.location().path()));
    let listener = history.listen({
        let history = history.clone();
        move || location.set(Route::from_path(history.location().path()))
    });
    let _listener = StoredValue::new_local(listener);
    let route = Memo::new(move |_| location.get());

    view! {
        <div class="app">
            <Navbar route=route />
            <main class="container">
                {move || match route.get() {
                    Route::Home => view! { <HomePage /> }.into_any(),
                    Route::History => view! { <HistoryPage /> }.into_any(),
                    Route::About => view! { <AboutPage /> }.into_any(),
                    Route::Detail(id) => view! { <DetailPage id=id /> }.into_any(),
                    Route::NotFound => view! { <NotFound /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"Page not found"</h2>
            <NavLink to=Route::Home>"Back to Home"</NavLink>
        </div>
    }
}
