//! 検出APIクライアント
//!
//! エンドポイント定義・リクエスト組み立て・レスポンス解釈を共通化し、
//! 実際のHTTP送信は`Transport`実装（CLI: reqwest / Web: fetch）に委譲する。

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::media_url::{absolutize_field, api_origin};
use crate::types::{DetectionId, DetectionRecord, OcrMethod};

/// デフォルトのAPIベースURL（ローカル開発用）
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// ベースURLを指定する環境変数
pub const API_URL_ENV: &str = "PLATE_API_URL";

pub const FIELD_IMAGE: &str = "image";
pub const FIELD_IMAGES: &str = "images";
pub const FIELD_OCR_METHOD: &str = "ocr_method";

/// API接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }
        Self {
            base_url: trimmed.to_string(),
        }
    }

    /// 環境変数の値（未設定ならデフォルト）から生成
    pub fn from_env_value(value: Option<&str>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 画像URLの前置に使うオリジン（末尾の`/api`を除去）
    pub fn origin(&self) -> &str {
        api_origin(&self.base_url)
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// バックエンドのRESTエンドポイント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    CreateDetection,
    DetectBulk,
    ListDetections,
    Detection(DetectionId),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::CreateDetection | Endpoint::ListDetections => "/plates/".to_string(),
            Endpoint::DetectBulk => "/plates/detect_bulk/".to_string(),
            Endpoint::Detection(id) => format!("/plates/{}/", urlencoding::encode(id.as_str())),
        }
    }
}

/// multipartフォームの値
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue<F> {
    File(F),
    Text(String),
}

/// multipartフォーム（順序を保持）
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartForm<F> {
    parts: Vec<(&'static str, FormValue<F>)>,
}

impl<F> MultipartForm<F> {
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    pub fn file(mut self, name: &'static str, file: F) -> Self {
        self.parts.push((name, FormValue::File(file)));
        self
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.parts.push((name, FormValue::Text(value.into())));
        self
    }

    pub fn parts(&self) -> &[(&'static str, FormValue<F>)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(&'static str, FormValue<F>)> {
        self.parts
    }
}

impl<F> Default for MultipartForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTPレスポンス（ステータスと本文のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP送信の抽象
///
/// 接続失敗は`ApiError::Transport`で返す。ステータスの解釈はクライアント側で行う。
#[async_trait(?Send)]
pub trait Transport {
    /// 送信するローカル画像のハンドル型
    type File;

    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError>;

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm<Self::File>,
    ) -> Result<HttpResponse, ApiError>;
}

/// エラーレスポンス本文からサーバーメッセージを抽出
///
/// `{"error": "..."}` を優先し、なければ `{"detail": "..."}` を使う。
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(|s| s.to_string())
}

/// レスポンスを解釈してJSONをデコード
pub fn parse_response<T: DeserializeOwned>(url: &str, response: HttpResponse) -> Result<T, ApiError> {
    if response.status == 404 {
        return Err(ApiError::NotFound(url.to_string()));
    }

    if !response.is_success() {
        return Err(ApiError::Server {
            status: response.status,
            message: extract_server_message(&response.body),
        });
    }

    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// 検出レコードの画像URLを絶対URLに揃える
pub fn normalize_record(mut record: DetectionRecord, origin: &str) -> DetectionRecord {
    absolutize_field(&mut record.image, origin);
    absolutize_field(&mut record.result_image, origin);
    record
}

/// 検出APIクライアント
///
/// キャッシュは持たない。失敗はログ出力後そのまま呼び出し元へ返す。
#[derive(Debug, Clone)]
pub struct DetectionClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> DetectionClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 画像1枚を送信してナンバーを検出
    pub async fn detect_plate(
        &self,
        file: T::File,
        ocr_method: OcrMethod,
    ) -> Result<DetectionRecord, ApiError> {
        let form = MultipartForm::new()
            .file(FIELD_IMAGE, file)
            .text(FIELD_OCR_METHOD, ocr_method.as_str());

        let record: DetectionRecord = self
            .post(Endpoint::CreateDetection, form)
            .await
            .inspect_err(|e| log::error!("detect_plate failed: {}", e))?;

        Ok(normalize_record(record, self.config.origin()))
    }

    /// 複数画像を一括送信
    pub async fn detect_plates_bulk(
        &self,
        files: Vec<T::File>,
        ocr_method: OcrMethod,
    ) -> Result<Vec<DetectionRecord>, ApiError> {
        let mut form = MultipartForm::new();
        for file in files {
            form = form.file(FIELD_IMAGES, file);
        }
        let form = form.text(FIELD_OCR_METHOD, ocr_method.as_str());

        let records: Vec<DetectionRecord> = self
            .post(Endpoint::DetectBulk, form)
            .await
            .inspect_err(|e| log::error!("detect_plates_bulk failed: {}", e))?;

        let origin = self.config.origin();
        Ok(records
            .into_iter()
            .map(|r| normalize_record(r, origin))
            .collect())
    }

    /// 履歴一覧（順序はサーバー定義）
    pub async fn get_detections(&self) -> Result<Vec<DetectionRecord>, ApiError> {
        self.get(Endpoint::ListDetections)
            .await
            .inspect_err(|e| log::error!("get_detections failed: {}", e))
    }

    /// 1件取得（存在しなければ`ApiError::NotFound`）
    pub async fn get_detection(&self, id: &DetectionId) -> Result<DetectionRecord, ApiError> {
        self.get(Endpoint::Detection(id.clone()))
            .await
            .inspect_err(|e| log::error!("get_detection({}) failed: {}", id, e))
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<R, ApiError> {
        let url = self.config.url(&endpoint);
        log::debug!("GET {}", url);
        let response = self.transport.get(&url).await?;
        parse_response(&url, response)
    }

    async fn post<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        form: MultipartForm<T::File>,
    ) -> Result<R, ApiError> {
        let url = self.config.url(&endpoint);
        log::debug!("POST {} ({} parts)", url, form.parts().len());
        let response = self.transport.post_multipart(&url, form).await?;
        parse_response(&url, response)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// 記録されたリクエスト
    #[derive(Debug, Clone, PartialEq)]
    pub enum Recorded {
        Get(String),
        Post(String, MultipartForm<String>),
    }

    /// 応答を順番に返すテスト用Transport
    #[derive(Default)]
    pub struct ScriptedTransport {
        pub responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        pub requests: RefCell<Vec<Recorded>>,
    }

    impl ScriptedTransport {
        pub fn respond(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(self, error: ApiError) -> Self {
            self.responses.borrow_mut().push_back(Err(error));
            self
        }

        fn next(&self) -> Result<HttpResponse, ApiError> {
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("no scripted response left")
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedTransport {
        type File = String;

        async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(Recorded::Get(url.to_string()));
            self.next()
        }

        async fn post_multipart(
            &self,
            url: &str,
            form: MultipartForm<String>,
        ) -> Result<HttpResponse, ApiError> {
            self.requests
                .borrow_mut()
                .push(Recorded::Post(url.to_string(), form));
            self.next()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Recorded, ScriptedTransport};
    use super::*;
    use futures::executor::block_on;

    const RECORD_JSON: &str = r#"{"id":"42","plate_text":"A123BCD","confidence":91.5,
        "image":"/media/a.jpg","result_image":"/media/a_out.jpg",
        "ocr_method":"tesseract","created_at":"2024-01-01T00:00:00Z"}"#;

    fn client(transport: ScriptedTransport) -> DetectionClient<ScriptedTransport> {
        DetectionClient::new(ApiConfig::new("http://localhost:8000/api"), transport)
    }

    #[test]
    fn test_config_defaults_and_trimming() {
        assert_eq!(ApiConfig::default().base_url(), DEFAULT_API_URL);
        assert_eq!(ApiConfig::from_env_value(None).base_url(), DEFAULT_API_URL);
        assert_eq!(ApiConfig::new("  ").base_url(), DEFAULT_API_URL);
        assert_eq!(
            ApiConfig::new("https://plates.example.com/api/").base_url(),
            "https://plates.example.com/api"
        );
        assert_eq!(
            ApiConfig::new("https://plates.example.com/api/").origin(),
            "https://plates.example.com"
        );
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ApiConfig::default();
        assert_eq!(config.url(&Endpoint::CreateDetection), "http://localhost:8000/api/plates/");
        assert_eq!(
            config.url(&Endpoint::DetectBulk),
            "http://localhost:8000/api/plates/detect_bulk/"
        );
        assert_eq!(
            config.url(&Endpoint::Detection("42".into())),
            "http://localhost:8000/api/plates/42/"
        );
        assert_eq!(Endpoint::Detection("a b/c".into()).path(), "/plates/a%20b%2Fc/");
    }

    #[test]
    fn test_extract_server_message() {
        assert_eq!(
            extract_server_message(r#"{"error": "Invalid image"}"#).as_deref(),
            Some("Invalid image")
        );
        assert_eq!(
            extract_server_message(r#"{"detail": "Not found."}"#).as_deref(),
            Some("Not found.")
        );
        assert_eq!(extract_server_message("<html>502</html>"), None);
        assert_eq!(extract_server_message(r#"{"error": {"code": 1}}"#), None);
    }

    #[test]
    fn test_detect_plate_sends_form_and_normalizes() {
        let client = client(ScriptedTransport::default().respond(201, RECORD_JSON));

        let record = block_on(client.detect_plate("car.jpg".to_string(), OcrMethod::Tesseract))
            .unwrap();

        assert_eq!(record.image.as_deref(), Some("http://localhost:8000/media/a.jpg"));
        assert_eq!(
            record.result_image.as_deref(),
            Some("http://localhost:8000/media/a_out.jpg")
        );
        assert_eq!(record.plate_text.as_deref(), Some("A123BCD"));

        let requests = client.transport.requests.borrow();
        let expected_form = MultipartForm::new()
            .file(FIELD_IMAGE, "car.jpg".to_string())
            .text(FIELD_OCR_METHOD, "tesseract");
        assert_eq!(
            requests[0],
            Recorded::Post("http://localhost:8000/api/plates/".to_string(), expected_form)
        );
    }

    #[test]
    fn test_detect_plate_keeps_absolute_urls() {
        let body = r#"{"id":"1","image":"https://cdn.example.com/a.jpg",
            "result_image":"/media/out.jpg","ocr_method":"trained","created_at":"t"}"#;
        let client = client(ScriptedTransport::default().respond(200, body));

        let record = block_on(client.detect_plate("a.jpg".to_string(), OcrMethod::Trained)).unwrap();
        assert_eq!(record.image.as_deref(), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(record.result_image.as_deref(), Some("http://localhost:8000/media/out.jpg"));
    }

    #[test]
    fn test_detect_plate_server_error() {
        let client = client(
            ScriptedTransport::default().respond(400, r#"{"error": "No plate detected"}"#),
        );

        let err = block_on(client.detect_plate("a.jpg".to_string(), OcrMethod::Trained)).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: Some("No plate detected".to_string())
            }
        );
    }

    #[test]
    fn test_detect_plate_transport_error_propagates() {
        let client = client(
            ScriptedTransport::default().fail(ApiError::Transport("connection refused".into())),
        );

        let err = block_on(client.detect_plate("a.jpg".to_string(), OcrMethod::Trained)).unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".into()));
    }

    #[test]
    fn test_detect_bulk_form_order() {
        let body = format!("[{},{}]", RECORD_JSON, RECORD_JSON.replace("\"42\"", "\"43\""));
        let client = client(ScriptedTransport::default().respond(200, &body));

        let records = block_on(client.detect_plates_bulk(
            vec!["a.jpg".to_string(), "b.jpg".to_string()],
            OcrMethod::Trained,
        ))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id.as_str(), "43");
        assert_eq!(records[0].image.as_deref(), Some("http://localhost:8000/media/a.jpg"));

        let requests = client.transport.requests.borrow();
        let Recorded::Post(url, form) = &requests[0] else {
            panic!("expected POST");
        };
        assert_eq!(url, "http://localhost:8000/api/plates/detect_bulk/");
        let names: Vec<&str> = form.parts().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["images", "images", "ocr_method"]);
    }

    #[test]
    fn test_get_detections() {
        let body = format!("[{}]", RECORD_JSON);
        let client = client(ScriptedTransport::default().respond(200, &body));

        let records = block_on(client.get_detections()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            client.transport.requests.borrow()[0],
            Recorded::Get("http://localhost:8000/api/plates/".to_string())
        );
    }

    #[test]
    fn test_get_detection_not_found() {
        let client = client(
            ScriptedTransport::default().respond(404, r#"{"detail": "Not found."}"#),
        );

        let err = block_on(client.get_detection(&"999".into())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_detection_decode_error() {
        let client = client(ScriptedTransport::default().respond(200, "not json"));

        let err = block_on(client.get_detection(&"1".into())).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
