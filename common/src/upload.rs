//! アップロード選択の状態機械
//!
//! ファイル選択ダイアログまたはドラッグ&ドロップで画像を集め、
//! 変更があるたびに一覧全体を`Selection`として返す。
//! `disabled`（検出リクエスト中）の間はすべての変更操作を無視する。

/// ドラッグ状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// 確定した選択（呼び出し側へそのまま転送する）
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<F> {
    pub files: Vec<F>,
    /// 同じファイルを再選択できるよう、ファイル入力をリセットする
    pub reset_picker: bool,
}

/// 表示用のローカル画像情報
pub trait LocalImage {
    fn name(&self) -> String;
    fn size_bytes(&self) -> u64;
}

/// "12.3 KB" 形式
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[derive(Debug, Clone)]
pub struct UploadSelector<F> {
    files: Vec<F>,
    drag_state: DragState,
    disabled: bool,
}

impl<F> Default for UploadSelector<F> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            drag_state: DragState::Idle,
            disabled: false,
        }
    }
}

impl<F: Clone> UploadSelector<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[F] {
        &self.files
    }

    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_state == DragState::Dragging
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.drag_state = DragState::Idle;
        }
    }

    /// dragenter / dragover
    pub fn drag_enter(&mut self) {
        if !self.disabled {
            self.drag_state = DragState::Dragging;
        }
    }

    pub fn drag_leave(&mut self) {
        self.drag_state = DragState::Idle;
    }

    /// ファイル選択ダイアログからの選択（空の選択は無視）
    pub fn select(&mut self, files: Vec<F>) -> Option<Selection<F>> {
        if self.disabled || files.is_empty() {
            return None;
        }
        Some(self.replace(files, false))
    }

    /// ドロップされたファイル（ドラッグ状態は必ず解除）
    pub fn drop_files(&mut self, files: Vec<F>) -> Option<Selection<F>> {
        self.drag_state = DragState::Idle;
        if self.disabled || files.is_empty() {
            return None;
        }
        Some(self.replace(files, false))
    }

    /// 1件削除（範囲外は無視）
    pub fn remove(&mut self, index: usize) -> Option<Selection<F>> {
        if self.disabled || index >= self.files.len() {
            return None;
        }
        self.files.remove(index);
        Some(self.notify(false))
    }

    pub fn clear(&mut self) -> Option<Selection<F>> {
        if self.disabled {
            return None;
        }
        Some(self.replace(Vec::new(), true))
    }

    fn replace(&mut self, files: Vec<F>, reset_picker: bool) -> Selection<F> {
        self.files = files;
        self.notify(reset_picker)
    }

    fn notify(&self, reset_picker: bool) -> Selection<F> {
        Selection {
            files: self.files.clone(),
            reset_picker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_replaces_list() {
        let mut selector = UploadSelector::new();
        selector.select(files(&["a.jpg", "b.jpg"]));

        let selection = selector.select(files(&["c.jpg"])).unwrap();
        assert_eq!(selection.files, files(&["c.jpg"]));
        assert!(!selection.reset_picker);
        assert_eq!(selector.files(), files(&["c.jpg"]).as_slice());
    }

    #[test]
    fn test_empty_pick_is_ignored() {
        let mut selector = UploadSelector::new();
        selector.select(files(&["a.jpg"]));

        assert!(selector.select(Vec::new()).is_none());
        assert_eq!(selector.files().len(), 1);
    }

    #[test]
    fn test_drag_state_machine() {
        let mut selector: UploadSelector<String> = UploadSelector::new();
        assert_eq!(selector.drag_state(), DragState::Idle);

        selector.drag_enter();
        assert!(selector.is_dragging());
        selector.drag_leave();
        assert_eq!(selector.drag_state(), DragState::Idle);

        selector.drag_enter();
        let selection = selector.drop_files(files(&["a.jpg", "b.jpg"])).unwrap();
        assert_eq!(selection.files.len(), 2);
        assert_eq!(selector.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drop_empty_leaves_dragging() {
        let mut selector: UploadSelector<String> = UploadSelector::new();
        selector.drag_enter();
        assert!(selector.drop_files(Vec::new()).is_none());
        assert!(!selector.is_dragging());
    }

    #[test]
    fn test_remove_by_index() {
        let mut selector = UploadSelector::new();
        selector.select(files(&["a.jpg", "b.jpg", "c.jpg"]));

        let selection = selector.remove(1).unwrap();
        assert_eq!(selection.files, files(&["a.jpg", "c.jpg"]));
        assert!(selector.remove(5).is_none());
    }

    #[test]
    fn test_clear_resets_picker() {
        let mut selector = UploadSelector::new();
        selector.select(files(&["a.jpg"]));

        let selection = selector.clear().unwrap();
        assert!(selection.files.is_empty());
        assert!(selection.reset_picker);
        assert!(selector.files().is_empty());
    }

    #[test]
    fn test_disabled_blocks_all_mutation() {
        let mut selector = UploadSelector::new();
        selector.select(files(&["a.jpg", "b.jpg"]));
        selector.set_disabled(true);

        selector.drag_enter();
        assert!(!selector.is_dragging());
        assert!(selector.select(files(&["c.jpg"])).is_none());
        assert!(selector.drop_files(files(&["c.jpg"])).is_none());
        assert!(selector.remove(0).is_none());
        assert!(selector.clear().is_none());
        assert_eq!(selector.files(), files(&["a.jpg", "b.jpg"]).as_slice());

        selector.set_disabled(false);
        assert!(selector.remove(0).is_some());
    }

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size_kb(0), "0.0 KB");
        assert_eq!(format_size_kb(1536), "1.5 KB");
        assert_eq!(format_size_kb(10 * 1024 * 1024), "10240.0 KB");
    }
}
