//! 検出結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - DetectionRecord: バックエンドが返す1件の検出結果
//! - OcrMethod: OCR方式の選択値
//! - ImageSource: ローカルファイルかリモートURLかのタグ付き画像参照

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// OCR方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrMethod {
    /// 学習済みモデル
    #[default]
    Trained,
    /// Tesseract OCR
    Tesseract,
}

impl OcrMethod {
    pub const ALL: [OcrMethod; 2] = [OcrMethod::Trained, OcrMethod::Tesseract];

    /// multipartで送るワイヤ値
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrMethod::Trained => "trained",
            OcrMethod::Tesseract => "tesseract",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            OcrMethod::Trained => "Trained Model",
            OcrMethod::Tesseract => "Tesseract OCR",
        }
    }
}

impl fmt::Display for OcrMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OcrMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trained" => Ok(OcrMethod::Trained),
            "tesseract" => Ok(OcrMethod::Tesseract),
            _ => Err(format!("Unknown OCR method: {}. Use trained or tesseract", s)),
        }
    }
}

/// サーバー採番の検出ID
///
/// ワイヤ上は文字列でも整数でも受け付け、常に文字列として保持・出力する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DetectionId(String);

impl DetectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DetectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DetectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DetectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for DetectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DetectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Text(String),
            Number(u64),
        }

        Ok(match WireId::deserialize(deserializer)? {
            WireId::Text(s) => DetectionId(s),
            WireId::Number(n) => DetectionId(n.to_string()),
        })
    }
}

/// 検出結果（1回の検出リクエスト/レスポンス）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub id: DetectionId,

    /// 元画像のURL
    #[serde(default)]
    pub image: Option<String>,

    /// 注釈付き/切り出し画像のURL
    #[serde(default)]
    pub result_image: Option<String>,

    /// 認識されたナンバー文字列
    #[serde(default)]
    pub plate_text: Option<String>,

    /// 信頼度（0〜100）
    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub ocr_method: OcrMethod,

    /// サーバー側のタイムスタンプ（そのまま保持）
    #[serde(default)]
    pub created_at: String,
}

impl DetectionRecord {
    /// 空文字は「認識なし」として扱う
    pub fn plate_text(&self) -> Option<&str> {
        self.plate_text.as_deref().filter(|t| !t.is_empty())
    }

    pub fn plate_text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.plate_text().unwrap_or(fallback)
    }

    /// "91.50%" 形式、なければ "N/A"
    pub fn confidence_label(&self) -> String {
        match self.confidence {
            Some(c) => format!("{:.2}%", c),
            None => "N/A".to_string(),
        }
    }

    pub fn image_source<F>(&self) -> Option<ImageSource<F>> {
        self.image.clone().map(ImageSource::RemoteUrl)
    }

    pub fn result_image_source<F>(&self) -> Option<ImageSource<F>> {
        self.result_image.clone().map(ImageSource::RemoteUrl)
    }
}

/// 画像参照
///
/// 未送信のローカルファイルと、サーバー上の画像URLを区別する。
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource<F> {
    LocalFile(F),
    RemoteUrl(String),
}

impl<F> ImageSource<F> {
    /// 表示用のsrcを解決する（ローカルファイルは`local`で変換）
    pub fn resolve(&self, local: impl FnOnce(&F) -> String) -> String {
        match self {
            ImageSource::LocalFile(file) => local(file),
            ImageSource::RemoteUrl(url) => url.clone(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ImageSource::LocalFile(_))
    }
}
