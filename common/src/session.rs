//! セッション状態ストア
//!
//! アップロード中のファイル・OCR方式・直近の結果・エラー・表示中の画像番号を保持する。
//! `{ocrMethod, result, error}` のみをキー・バリュー領域へ保存し、起動時に一度だけ復元する。
//! ファイル本体と画像番号は保存しない。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::types::{DetectionRecord, ImageSource, OcrMethod};
use crate::upload::LocalImage;

/// 表示中の画像を識別するキー（プレビューの再生成判定用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentFileKey {
    pub index: usize,
    pub name: String,
    pub size: u64,
}

/// 保存領域のキー
pub const SESSION_KEY: &str = "detectionState";

/// キー・バリュー形式の永続化領域
pub trait SnapshotStorage {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// メモリ上の保存領域（テスト・保存不可環境用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// 保存されるスナップショット
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub ocr_method: Option<OcrMethod>,
    #[serde(default)]
    pub result: Option<DetectionRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// セッション状態ストア
///
/// アプリ起動時に一度だけ`restore`で生成し、全ビューで共有する。
/// 変更系メソッドは状態を確定させてから保存し、保存失敗のみを`Err`で返す。
#[derive(Debug)]
pub struct SessionStore<F, S> {
    files: Vec<F>,
    ocr_method: OcrMethod,
    result: Option<DetectionRecord>,
    error: Option<String>,
    current_image_index: usize,
    storage: S,
}

impl<F, S: SnapshotStorage> SessionStore<F, S> {
    /// 保存領域から復元して生成
    ///
    /// 読み込み・パースに失敗した場合はログを出して初期状態にする。
    pub fn restore(storage: S) -> Self {
        let mut store = Self {
            files: Vec::new(),
            ocr_method: OcrMethod::default(),
            result: None,
            error: None,
            current_image_index: 0,
            storage,
        };

        match Self::load_snapshot(&store.storage) {
            Ok(Some(snapshot)) => {
                store.ocr_method = snapshot.ocr_method.unwrap_or_default();
                store.error = snapshot.error;
                if snapshot.result.is_some() {
                    store.result = snapshot.result;
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("Error loading saved detection state: {}", e),
        }

        store
    }

    fn load_snapshot(storage: &S) -> Result<Option<SessionSnapshot>> {
        let Some(raw) = storage.read(SESSION_KEY)? else {
            return Ok(None);
        };
        let snapshot: SessionSnapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    /// 現在の保存対象
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            ocr_method: Some(self.ocr_method),
            result: self.result.clone(),
            error: self.error.clone(),
        }
    }

    /// `{ocrMethod, result, error}` を保存
    pub fn save(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.snapshot())?;
        self.storage
            .write(SESSION_KEY, &payload)
            .inspect_err(|e| log::warn!("Error saving detection state: {}", e))
    }

    pub fn files(&self) -> &[F] {
        &self.files
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn ocr_method(&self) -> OcrMethod {
        self.ocr_method
    }

    pub fn result(&self) -> Option<&DetectionRecord> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_image_index(&self) -> usize {
        self.current_image_index
    }

    pub fn current_file(&self) -> Option<&F> {
        self.files.get(self.current_image_index)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// エラー・結果・OCR方式の変更では変わらない
    pub fn current_file_key(&self) -> Option<CurrentFileKey>
    where
        F: LocalImage,
    {
        self.current_file().map(|file| CurrentFileKey {
            index: self.current_image_index,
            name: file.name(),
            size: file.size_bytes(),
        })
    }

    pub fn current_image_source(&self) -> Option<ImageSource<F>>
    where
        F: Clone,
    {
        self.current_file().cloned().map(ImageSource::LocalFile)
    }

    /// ファイル一覧を差し替える（画像番号は0に戻る）
    pub fn set_files(&mut self, files: Vec<F>) {
        self.files = files;
        self.current_image_index = 0;
    }

    pub fn set_ocr_method(&mut self, ocr_method: OcrMethod) -> Result<()> {
        if self.ocr_method == ocr_method {
            return Ok(());
        }
        self.ocr_method = ocr_method;
        self.save()
    }

    pub fn set_result(&mut self, result: Option<DetectionRecord>) -> Result<()> {
        if self.result == result {
            return Ok(());
        }
        self.result = result;
        self.save()
    }

    pub fn set_error(&mut self, error: Option<String>) -> Result<()> {
        if self.error == error {
            return Ok(());
        }
        self.error = error;
        self.save()
    }

    /// 範囲外の番号は無視して`false`を返す
    pub fn set_current_image_index(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            return false;
        }
        self.current_image_index = index;
        true
    }

    pub fn next_image(&mut self) -> bool {
        self.set_current_image_index(self.current_image_index + 1)
    }

    pub fn prev_image(&mut self) -> bool {
        match self.current_image_index.checked_sub(1) {
            Some(index) => self.set_current_image_index(index),
            None => false,
        }
    }

    /// 新しいファイル選択を受け取る
    ///
    /// 画像番号を0に戻しエラーを消す。直前の結果は残す。
    pub fn handle_files_selected(&mut self, files: Vec<F>) -> Result<()> {
        self.set_files(files);
        self.set_error(None)
    }

    /// 全状態をクリアし、保存領域からも削除する
    pub fn clear_all(&mut self) -> Result<()> {
        self.files.clear();
        self.result = None;
        self.error = None;
        self.current_image_index = 0;
        self.storage
            .remove(SESSION_KEY)
            .inspect_err(|e| log::warn!("Error removing detection state: {}", e))
    }
}
