//! Plate Detect Common Library
//!
//! CLIとWeb(WASM)で共有される型・APIクライアント・セッションストア

pub mod about;
pub mod api;
pub mod error;
pub mod media_url;
pub mod route;
pub mod session;
pub mod types;
pub mod upload;
pub mod view_state;
pub mod workflow;

pub use api::{ApiConfig, DetectionClient, Endpoint, FormValue, HttpResponse, MultipartForm, Transport};
pub use error::{ApiError, Error, Result};
pub use route::Route;
pub use session::{CurrentFileKey, MemoryStorage, SessionSnapshot, SessionStore, SnapshotStorage, SESSION_KEY};
pub use types::{DetectionId, DetectionRecord, ImageSource, OcrMethod};
pub use upload::{format_size_kb, DragState, LocalImage, Selection, UploadSelector};
pub use view_state::{FetchState, DETAIL_LOAD_FAILED, HISTORY_LOAD_FAILED};
pub use workflow::{DetectBlocked, DetectRequest, DetectWorkflow};
