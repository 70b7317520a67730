//! localStorageへのスナップショット保存

use gloo::storage::{LocalStorage, Storage};
use plate_detect_common::session::SnapshotStorage;
use plate_detect_common::{Error, Result};
use wasm_bindgen::JsValue;

/// localStorageの1キー分
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSlot;

fn storage_error(e: JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}

impl SnapshotStorage for LocalStorageSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(storage_error)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw().set_item(key, value).map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::raw().remove_item(key).map_err(storage_error)
    }
}
