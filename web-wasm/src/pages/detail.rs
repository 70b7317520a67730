//! 検出結果の詳細ページ

use leptos::prelude::*;
use leptos::task::spawn_local;
use plate_detect_common::{DetectionId, DetectionRecord, FetchState, Route, DETAIL_LOAD_FAILED};

use crate::components::{
    detection_result::DetectionResult, error_banner::ErrorBanner,
    loading_spinner::LoadingSpinner, navbar::NavLink,
};
use crate::transport::WebClient;

#[component]
pub fn DetailPage(id: DetectionId) -> impl IntoView {
    let client = expect_context::<WebClient>();
    let state = RwSignal::new(FetchState::<DetectionRecord>::Loading);

    spawn_local(async move {
        let result = client.get_detection(&id).await;
        let _ = state.try_set(FetchState::from_result(result, DETAIL_LOAD_FAILED));
    });

    view! {
        <div class="detail-page">
            <NavLink to=Route::History class="back-link">"← Back to History"</NavLink>
            <h1>"Detection Details"</h1>
            {move || match state.get() {
                FetchState::Loading => view! { <LoadingSpinner /> }.into_any(),
                FetchState::Failed(message) => view! { <ErrorBanner message=message /> }.into_any(),
                FetchState::Loaded(record) => view! { <DetectionResult record=record /> }.into_any(),
            }}
        </div>
    }
}
