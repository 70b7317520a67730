//! データ取得ビューの状態
//!
//! `Loading` → `Loaded` | `Failed`。自動リトライはせず、再マウントまで終端状態のまま。

use crate::error::ApiError;

pub const HISTORY_LOAD_FAILED: &str = "Failed to load detection history";
pub const DETAIL_LOAD_FAILED: &str = "Failed to load detection details";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    /// 取得結果から状態を作る（失敗時は固定メッセージ）
    pub fn from_result(result: Result<T, ApiError>, failure_message: &str) -> Self {
        match result {
            Ok(value) => FetchState::Loaded(value),
            Err(e) => {
                log::error!("{}: {}", failure_message, e);
                FetchState::Failed(failure_message.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
