//! 検出履歴ページ

use leptos::prelude::*;
use leptos::task::spawn_local;
use plate_detect_common::{DetectionRecord, FetchState, Route, HISTORY_LOAD_FAILED};

use crate::components::{
    detection_result::format_date, error_banner::ErrorBanner, image_preview::ImagePreview,
    loading_spinner::LoadingSpinner, navbar::NavLink,
};
use crate::transport::{PickedFile, WebClient};

#[component]
pub fn HistoryPage() -> impl IntoView {
    let client = expect_context::<WebClient>();
    let state = RwSignal::new(FetchState::<Vec<DetectionRecord>>::Loading);

    spawn_local(async move {
        let result = client.get_detections().await;
        // 画面を離れた後の応答は捨てる
        let _ = state.try_set(FetchState::from_result(result, HISTORY_LOAD_FAILED));
    });

    view! {
        <div class="history-page">
            <h1>"Detection History"</h1>
            {move || match state.get() {
                FetchState::Loading => view! { <LoadingSpinner /> }.into_any(),
                FetchState::Failed(message) => view! { <ErrorBanner message=message /> }.into_any(),
                FetchState::Loaded(records) if records.is_empty() => {
                    view! {
                        <div class="empty-state">
                            <p>"No detection history found"</p>
                            <NavLink to=Route::Home class="btn btn-primary">"Detect a new plate"</NavLink>
                        </div>
                    }
                        .into_any()
                }
                FetchState::Loaded(records) => view! { <HistoryTable records=records /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn HistoryTable(records: Vec<DetectionRecord>) -> impl IntoView {
    view! {
        <table class="history-table">
            <thead>
                <tr>
                    <th>"Image"</th>
                    <th>"Plate Text"</th>
                    <th>"Confidence"</th>
                    <th>"OCR Method"</th>
                    <th>"Date"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {records
                    .into_iter()
                    .map(|record| {
                        let thumbnail = record
                            .result_image_source::<PickedFile>()
                            .or_else(|| record.image_source());
                        view! {
                            <tr>
                                <td>
                                    {thumbnail.map(|source| view! {
                                        <ImagePreview source=source alt="Detection" class="thumbnail" />
                                    })}
                                </td>
                                <td class="plate-text">{record.plate_text_or("Unknown").to_string()}</td>
                                <td>{record.confidence_label()}</td>
                                <td>{record.ocr_method.label()}</td>
                                <td>{format_date(&record.created_at)}</td>
                                <td>
                                    <NavLink to=Route::Detail(record.id.clone()) class="btn btn-small">
                                        "View Details"
                                    </NavLink>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
