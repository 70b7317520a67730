//! ローカル画像の収集
//!
//! 引数のファイル・フォルダから送信対象の画像一覧を作る。
//! フォルダは直下の画像のみをファイル名順で展開する。

use crate::error::{PlateDetectError, Result};
use plate_detect_common::LocalImage;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// 送信前のローカル画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl ImageFile {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PlateDetectError::FileNotFound(path.display().to_string()));
        }
        if !is_image_path(path) {
            return Err(PlateDetectError::UnsupportedImage(path.display().to_string()));
        }

        let size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size,
        })
    }

    /// multipart送信時のContent-Type
    pub fn mime_type(&self) -> &'static str {
        image::ImageFormat::from_path(&self.path)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream")
    }

    /// 画像サイズ（読めなければNone）
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::image_dimensions(&self.path).ok()
    }
}

impl LocalImage for ImageFile {
    fn name(&self) -> String {
        self.file_name.clone()
    }

    fn size_bytes(&self) -> u64 {
        self.size
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// フォルダ直下の画像をファイル名順で取得
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageFile>> {
    if !folder.is_dir() {
        return Err(PlateDetectError::FileNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_image_path(path) {
            images.push(ImageFile::open(path)?);
        }
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// 引数の順序を保ったまま画像一覧を作る
pub fn collect_images(inputs: &[PathBuf]) -> Result<Vec<ImageFile>> {
    let mut images = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = scan_folder(input)?;
            if found.is_empty() {
                return Err(PlateDetectError::NoImagesFound(input.display().to_string()));
            }
            images.extend(found);
        } else {
            images.push(ImageFile::open(input)?);
        }
    }

    Ok(images)
}
