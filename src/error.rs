use plate_detect_common::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateDetectError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported image file: {0} (use JPEG or PNG)")]
    UnsupportedImage(String),

    #[error("No images found: {0}")]
    NoImagesFound(String),

    #[error("Please select at least one image")]
    NoImageSelected,

    #[error("Image index {index} is out of range (1..={count})")]
    ImageIndexOutOfRange { index: usize, count: usize },

    #[error("{0}")]
    Detection(String),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] plate_detect_common::Error),
}

impl From<dialoguer::Error> for PlateDetectError {
    fn from(e: dialoguer::Error) -> Self {
        PlateDetectError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlateDetectError>;
