pub mod detection_result;
pub mod error_banner;
pub mod image_preview;
pub mod loading_spinner;
pub mod navbar;
pub mod upload_area;
