use leptos::prelude::*;

#[component]
pub fn ErrorBanner(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert">
            <strong>"Error: "</strong>
            {message}
        </div>
    }
}
