//! ナビゲーションバー

use leptos::prelude::*;
use plate_detect_common::Route;

use crate::app::navigate;

/// ページ遷移リンク（再読み込みせずに履歴へ積む）
#[component]
pub fn NavLink(
    to: Route,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let href = to.path();
    view! {
        <a
            href=href
            class=class
            on:click=move |ev| {
                ev.prevent_default();
                navigate(&to);
            }
        >
            {children()}
        </a>
    }
}

#[component]
pub fn Navbar(route: Memo<Route>) -> impl IntoView {
    view! {
        <nav class="navbar">
            <NavLink to=Route::Home class="navbar-brand">"Plate Detection"</NavLink>
            <ul class="navbar-links">
                {Route::nav_items()
                    .into_iter()
                    .map(|(item, label)| {
                        let is_active = {
                            let item = item.clone();
                            move || route.get() == item
                        };
                        view! {
                            <li class:active=is_active>
                                <NavLink to=item>{label}</NavLink>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
