//! Aboutページの文面（CLI・Web共通）

pub const TITLE: &str = "Moroccan License Plate Detection";

pub const INTRO: &str = "This application uses computer vision and deep learning techniques to \
detect and recognize Moroccan vehicle license plates from images.";

pub const HOW_IT_WORKS: [&str; 4] = [
    "Detect vehicle license plates in an uploaded image",
    "Extract and crop the license plate region",
    "Recognize characters on the plate using specialized OCR",
    "Support both Latin and Arabic characters found on Moroccan plates",
];

/// OCR方式ごとの説明
pub const OCR_METHODS: [(crate::types::OcrMethod, &str); 2] = [
    (
        crate::types::OcrMethod::Trained,
        "A custom-trained YOLOv3 model specifically for Moroccan license plates, \
with support for Arabic characters.",
    ),
    (
        crate::types::OcrMethod::Tesseract,
        "A general-purpose OCR engine that works well for Latin characters and numbers.",
    ),
];

pub const CLOSING: &str = "The image processing pipeline can detect license plates in various \
lighting conditions, angles, and distances, making it suitable for parking management, \
traffic monitoring, and security systems.";
