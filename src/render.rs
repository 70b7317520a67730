//! 端末向けの表示
//!
//! Web版の各ビュー（結果・履歴・詳細・About）に相当するテキストを組み立てる。

use chrono::{DateTime, Local};
use plate_detect_common::about;
use plate_detect_common::{format_size_kb, DetectionRecord, FetchState, ImageSource, LocalImage};
use std::fmt::Write;

use crate::scanner::ImageFile;

/// サーバーのタイムスタンプをローカル時刻で表示（解釈できなければそのまま）
pub fn format_created_at(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// 検出結果
pub fn render_record(record: &DetectionRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Detection Results");
    let _ = writeln!(out, "  Extracted Text : {}", record.plate_text_or("No plate text detected"));
    let _ = writeln!(out, "  OCR Method     : {}", record.ocr_method.label());
    let _ = writeln!(out, "  Confidence     : {}", record.confidence_label());
    let _ = writeln!(out, "  Detection ID   : {}", record.id);
    let _ = writeln!(out, "  Created At     : {}", format_created_at(&record.created_at));
    let _ = writeln!(out, "  Original Image : {}", image_label(record.image_source()));
    let _ = writeln!(out, "  Detected Plate : {}", image_label(record.result_image_source()));
    out
}

/// ローカル画像はパス、サーバー画像はURLで表示
fn image_label(source: Option<ImageSource<ImageFile>>) -> String {
    source
        .map(|s| s.resolve(|file| file.path.display().to_string()))
        .unwrap_or_else(|| "-".to_string())
}

/// 履歴一覧
pub fn render_history(records: &[DetectionRecord]) -> String {
    if records.is_empty() {
        return "No detection history found\nRun `plate-detect detect <IMAGE>` to detect a new plate\n"
            .to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Detection History");
    let _ = writeln!(
        out,
        "{:<10} {:<16} {:>10}  {:<14} {}",
        "ID", "Plate Text", "Confidence", "OCR Method", "Date"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{:<10} {:<16} {:>10}  {:<14} {}",
            record.id.as_str(),
            record.plate_text_or("Unknown"),
            record.confidence_label(),
            record.ocr_method.label(),
            format_created_at(&record.created_at),
        );
    }
    out
}

/// 履歴ビュー
pub fn render_history_view(state: &FetchState<Vec<DetectionRecord>>) -> String {
    match state {
        FetchState::Loading => "Loading...\n".to_string(),
        FetchState::Loaded(records) => render_history(records),
        FetchState::Failed(message) => format!("{}\n", message),
    }
}

/// 詳細ビュー（失敗時は履歴への導線を出す）
pub fn render_detail_view(state: &FetchState<DetectionRecord>) -> String {
    match state {
        FetchState::Loading => "Loading...\n".to_string(),
        FetchState::Loaded(record) => render_record(record),
        FetchState::Failed(message) => {
            format!("{}\nBack to History: plate-detect history\n", message)
        }
    }
}

/// 選択中の画像一覧（`current`があれば印を付ける）
pub fn render_selection(files: &[ImageFile], current: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Selected Files");
    for (i, file) in files.iter().enumerate() {
        let marker = if Some(i) == current { ">" } else { " " };
        let dims = file
            .dimensions()
            .map(|(w, h)| format!(" {}x{}", w, h))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {:>2}. {} ({}{})",
            marker,
            i + 1,
            file.name(),
            format_size_kb(file.size_bytes()),
            dims
        );
    }
    if let Some(current) = current.filter(|_| files.len() > 1) {
        let _ = writeln!(out, "Image {} of {}", current + 1, files.len());
    }
    out
}

pub fn render_about() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", about::TITLE);
    let _ = writeln!(out, "{}\n", about::INTRO);
    let _ = writeln!(out, "How It Works");
    for (i, step) in about::HOW_IT_WORKS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    let _ = writeln!(out, "\nOCR Methods");
    for (method, description) in about::OCR_METHODS {
        let _ = writeln!(out, "  - {} ({}): {}", method.label(), method, description);
    }
    let _ = writeln!(out, "\n{}", about::CLOSING);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_detect_common::{OcrMethod, DETAIL_LOAD_FAILED, HISTORY_LOAD_FAILED};

    fn record() -> DetectionRecord {
        serde_json::from_str(
            r#"{"id":"42","plate_text":"A123BCD","confidence":91.5,
            "image":"http://localhost:8000/media/a.jpg","result_image":"http://localhost:8000/media/a_out.jpg",
            "ocr_method":"tesseract","created_at":"not-a-date"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_render_record() {
        let text = render_record(&record());
        assert!(text.contains("A123BCD"));
        assert!(text.contains("Tesseract OCR"));
        assert!(text.contains("91.50%"));
        assert!(text.contains("not-a-date"));
        assert!(text.contains("http://localhost:8000/media/a_out.jpg"));
    }

    #[test]
    fn test_render_record_without_text() {
        let mut r = record();
        r.plate_text = None;
        r.confidence = None;
        r.ocr_method = OcrMethod::Trained;
        let text = render_record(&r);
        assert!(text.contains("No plate text detected"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Trained Model"));
    }

    #[test]
    fn test_image_label() {
        let local = ImageSource::LocalFile(ImageFile {
            path: std::path::PathBuf::from("/tmp/front.jpg"),
            file_name: "front.jpg".to_string(),
            size: 10,
        });
        assert_eq!(image_label(Some(local)), "/tmp/front.jpg");
        assert_eq!(
            image_label(Some(ImageSource::RemoteUrl("http://x/media/a.jpg".to_string()))),
            "http://x/media/a.jpg"
        );
        assert_eq!(image_label(None), "-");
    }

    #[test]
    fn test_render_history_empty() {
        assert!(render_history(&[]).contains("No detection history found"));
    }

    #[test]
    fn test_render_history_unknown_plate() {
        let mut r = record();
        r.plate_text = Some(String::new());
        let text = render_history(&[r]);
        assert!(text.contains("Unknown"));
    }

    #[test]
    fn test_render_failed_views() {
        let history: FetchState<Vec<DetectionRecord>> =
            FetchState::Failed(HISTORY_LOAD_FAILED.to_string());
        assert_eq!(render_history_view(&history), "Failed to load detection history\n");

        let detail: FetchState<DetectionRecord> = FetchState::Failed(DETAIL_LOAD_FAILED.to_string());
        let text = render_detail_view(&detail);
        assert!(text.starts_with("Failed to load detection details"));
        assert!(text.contains("Back to History"));
    }

    #[test]
    fn test_format_created_at_rfc3339() {
        let formatted = format_created_at("2024-01-01T00:00:00Z");
        assert_eq!(formatted.len(), "2024-01-01 00:00:00".len());
        assert!(formatted.starts_with("202"));
    }

    #[test]
    fn test_render_about() {
        let text = render_about();
        assert!(text.contains("Moroccan License Plate Detection"));
        assert!(text.contains("Tesseract OCR (tesseract)"));
    }
}
