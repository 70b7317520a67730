//! セッションのファイル保存
//!
//! ブラウザのlocalStorageの代わりに、キーごとに1つのJSONファイルへ保存する。

use plate_detect_common::session::{SessionStore, SnapshotStorage};
use plate_detect_common::Result;
use std::path::{Path, PathBuf};

use crate::scanner::ImageFile;

pub type CliSession = SessionStore<ImageFile, FileSlotStorage>;

#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStorage for FileSlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// 保存先ディレクトリからセッションを復元
pub fn open_session(dir: impl Into<PathBuf>) -> CliSession {
    SessionStore::restore(FileSlotStorage::new(dir))
}
