//! Home画面の検出ワークフロー
//!
//! `begin` で入力チェックとローディング開始、API呼び出し後に `finish` で結果をストアへ反映する。
//! ストアを await 中に借用しないよう、2段階に分けている。

use crate::api::{DetectionClient, Transport};
use crate::error::ApiError;
use crate::session::{SessionStore, SnapshotStorage};
use crate::types::{DetectionRecord, OcrMethod};

pub const NO_FILE_SELECTED: &str = "Please select at least one image";
pub const DETECT_FAILED: &str = "An error occurred while detecting the plate";

/// 検出リクエストの内容
#[derive(Debug, Clone, PartialEq)]
pub struct DetectRequest<F> {
    pub file: F,
    pub ocr_method: OcrMethod,
}

/// 検出を開始できなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectBlocked {
    /// 既にリクエスト中
    Busy,
    /// ファイル未選択（エラーはストアに設定済み）
    NoFileSelected,
}

/// 検出ワークフロー（ローディング状態は保存しない）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectWorkflow {
    loading: bool,
}

impl DetectWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 検出中は画像の切り替えを止める
    pub fn can_show_prev<F, S: SnapshotStorage>(&self, store: &SessionStore<F, S>) -> bool {
        !self.loading && store.current_image_index() > 0
    }

    pub fn can_show_next<F, S: SnapshotStorage>(&self, store: &SessionStore<F, S>) -> bool {
        !self.loading && store.current_image_index() + 1 < store.files().len()
    }

    /// 検出開始
    pub fn begin<F: Clone, S: SnapshotStorage>(
        &mut self,
        store: &mut SessionStore<F, S>,
    ) -> Result<DetectRequest<F>, DetectBlocked> {
        if self.loading {
            return Err(DetectBlocked::Busy);
        }

        let Some(file) = store.current_file().cloned() else {
            let _ = store.set_error(Some(NO_FILE_SELECTED.to_string()));
            return Err(DetectBlocked::NoFileSelected);
        };

        self.loading = true;
        let _ = store.set_error(None);

        Ok(DetectRequest {
            file,
            ocr_method: store.ocr_method(),
        })
    }

    /// 検出完了（成功なら`true`）
    pub fn finish<F, S: SnapshotStorage>(
        &mut self,
        store: &mut SessionStore<F, S>,
        outcome: Result<DetectionRecord, ApiError>,
    ) -> bool {
        self.loading = false;

        match outcome {
            Ok(record) => {
                let _ = store.set_result(Some(record));
                true
            }
            Err(e) => {
                log::error!("Error detecting plate: {}", e);
                let _ = store.set_error(Some(e.user_message(DETECT_FAILED)));
                false
            }
        }
    }

    /// ストアを直接保持できる呼び出し元（CLI）向けの一括実行
    pub async fn run<T, S>(
        &mut self,
        store: &mut SessionStore<T::File, S>,
        client: &DetectionClient<T>,
    ) -> Result<bool, DetectBlocked>
    where
        T: Transport,
        T::File: Clone,
        S: SnapshotStorage,
    {
        let request = self.begin(store)?;
        log::info!("Detecting plate with OCR method: {}", request.ocr_method);
        let outcome = client.detect_plate(request.file, request.ocr_method).await;
        Ok(self.finish(store, outcome))
    }
}
