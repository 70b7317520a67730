//! 検出結果の表示

use leptos::prelude::*;
use plate_detect_common::DetectionRecord;
use wasm_bindgen::JsValue;

use crate::components::image_preview::ImagePreview;
use crate::transport::PickedFile;

/// サーバーのタイムスタンプをブラウザのロケールで表示（解釈できなければそのまま）
pub fn format_date(raw: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return raw.to_string();
    }
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}

#[component]
pub fn DetectionResult(record: DetectionRecord) -> impl IntoView {
    let original = record.image_source::<PickedFile>();
    let detected = record.result_image_source::<PickedFile>();
    let plate_text = record.plate_text_or("No plate text detected").to_string();

    view! {
        <div class="detection-result">
            <div class="result-images">
                {original.map(|source| view! {
                    <figure>
                        <ImagePreview source=source alt="Original image" />
                        <figcaption>"Original Image"</figcaption>
                    </figure>
                })}
                {detected.map(|source| view! {
                    <figure>
                        <ImagePreview source=source alt="Detected plate" />
                        <figcaption>"Detected Plate"</figcaption>
                    </figure>
                })}
            </div>

            <dl class="result-details">
                <dt>"Extracted Text"</dt>
                <dd class="plate-text">{plate_text}</dd>
                <dt>"OCR Method"</dt>
                <dd>{record.ocr_method.label()}</dd>
                <dt>"Confidence"</dt>
                <dd>{record.confidence_label()}</dd>
                <dt>"Detection ID"</dt>
                <dd>{record.id.to_string()}</dd>
                <dt>"Created At"</dt>
                <dd>{format_date(&record.created_at)}</dd>
            </dl>
        </div>
    }
}
