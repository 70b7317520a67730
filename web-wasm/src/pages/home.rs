//! Homeページ（画像選択→検出→結果表示）

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use plate_detect_common::{DetectWorkflow, OcrMethod};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::app::use_store;
use crate::components::{
    detection_result::DetectionResult, error_banner::ErrorBanner, image_preview::ImagePreview,
    loading_spinner::LoadingSpinner, upload_area::UploadArea,
};
use crate::transport::{PickedFile, WebClient};

const RESULTS_ID: &str = "detection-results";

/// 結果表示の描画を待ってからスクロール
fn scroll_to_results() {
    Timeout::new(100, || {
        if let Some(element) = document().get_element_by_id(RESULTS_ID) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    })
    .forget();
}

#[component]
pub fn HomePage() -> impl IntoView {
    let store = use_store();
    let client = expect_context::<WebClient>();

    let workflow = RwSignal::new(DetectWorkflow::new());
    let loading = Signal::derive(move || workflow.with(|w| w.is_loading()));
    // Clear Allでアップロードエリアを作り直す
    let upload_generation = RwSignal::new(0u32);

    let on_files_selected = move |files: Vec<PickedFile>| {
        store.update(|s| {
            let _ = s.handle_files_selected(files);
        });
    };

    let set_ocr_method = move |method: OcrMethod| {
        store.update(|s| {
            let _ = s.set_ocr_method(method);
        });
    };

    let file_count = move || store.with(|s| s.files().len());
    // 表示中の画像が変わったときだけプレビューを作り直す
    let preview_key = Memo::new(move |_| store.with(|s| s.current_file_key()));

    let on_detect = move |_| {
        let mut current = workflow.get_untracked();
        let Some(Ok(request)) = store.try_update(|s| current.begin(s)) else {
            return;
        };
        workflow.set(current);

        let client = client.clone();
        spawn_local(async move {
            let outcome = client.detect_plate(request.file, request.ocr_method).await;

            // ページを離れていても結果はストアへ反映する
            let mut current = workflow.try_get_untracked().unwrap_or_default();
            let success = store
                .try_update(|s| current.finish(s, outcome))
                .unwrap_or(false);
            let _ = workflow.try_set(current);

            if success {
                scroll_to_results();
            }
        });
    };

    let on_clear_all = move |_| {
        if loading.get_untracked() {
            return;
        }
        store.update(|s| {
            let _ = s.clear_all();
        });
        upload_generation.update(|g| *g += 1);
    };

    view! {
        <div class="home-page">
            <h1>"License Plate Detection"</h1>
            <p class="text-muted">"Upload an image of a vehicle to detect and read its license plate."</p>

            <section class="upload-section">
                {move || {
                    upload_generation.track();
                    view! { <UploadArea disabled=loading on_files_selected=on_files_selected /> }
                }}

                <fieldset class="ocr-method" prop:disabled=move || loading.get()>
                    <legend>"OCR Method"</legend>
                    {OcrMethod::ALL
                        .into_iter()
                        .map(|method| {
                            view! {
                                <label class="radio">
                                    <input
                                        type="radio"
                                        name="ocr-method"
                                        value=method.as_str()
                                        prop:checked=move || store.with(|s| s.ocr_method()) == method
                                        on:change=move |_| set_ocr_method(method)
                                    />
                                    {method.label()}
                                </label>
                            }
                        })
                        .collect_view()}
                </fieldset>

                <Show when=move || { file_count() > 1 }>
                    <div class="image-navigation">
                        <button
                            class="btn btn-secondary btn-small"
                            prop:disabled=move || {
                                workflow.with(|w| store.with(|s| !w.can_show_prev(s)))
                            }
                            on:click=move |_| {
                                store.update(|s| {
                                    s.prev_image();
                                })
                            }
                        >
                            "Previous"
                        </button>
                        <span>
                            {move || {
                                format!(
                                    "Image {} of {}",
                                    store.with(|s| s.current_image_index()) + 1,
                                    file_count(),
                                )
                            }}
                        </span>
                        <button
                            class="btn btn-secondary btn-small"
                            prop:disabled=move || {
                                workflow.with(|w| store.with(|s| !w.can_show_next(s)))
                            }
                            on:click=move |_| {
                                store.update(|s| {
                                    s.next_image();
                                })
                            }
                        >
                            "Next"
                        </button>
                    </div>
                </Show>

                <div class="preview">
                    {move || {
                        preview_key.track();
                        store
                            .with_untracked(|s| s.current_image_source())
                            .map(|source| view! { <ImagePreview source=source alt="Selected image" /> })
                    }}
                </div>

                <div class="actions">
                    <button
                        class="btn btn-tertiary"
                        prop:disabled=move || loading.get()
                        on:click=on_clear_all
                    >
                        "Clear All"
                    </button>
                    <button
                        class="btn btn-primary"
                        prop:disabled=move || loading.get()
                        on:click=on_detect
                    >
                        {move || if loading.get() { "Processing..." } else { "Detect Plate" }}
                    </button>
                </div>
            </section>

            {move || {
                store
                    .with(|s| s.error().map(str::to_string))
                    .map(|message| view! { <ErrorBanner message=message /> })
            }}

            <Show when=move || loading.get()>
                <LoadingSpinner message="Detecting license plate..." />
            </Show>

            {move || {
                store
                    .with(|s| s.result().cloned())
                    .map(|record| {
                        view! {
                            <section id=RESULTS_ID class="results-section">
                                <h2>"Detection Results"</h2>
                                <DetectionResult record=record />
                            </section>
                        }
                    })
            }}
        </div>
    }
}
