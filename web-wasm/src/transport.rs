//! ブラウザのfetchによるTransport実装

use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use plate_detect_common::api::{FormValue, HttpResponse, MultipartForm, Transport};
use plate_detect_common::{ApiConfig, ApiError, DetectionClient, LocalImage};
use web_sys::{File, FormData};

/// ユーザーが選択したファイル
#[derive(Debug, Clone)]
pub struct PickedFile(pub File);

impl PickedFile {
    pub fn file(&self) -> &File {
        &self.0
    }
}

impl LocalImage for PickedFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size_bytes(&self) -> u64 {
        self.0.size() as u64
    }
}

pub type WebClient = DetectionClient<FetchTransport>;

/// ビルド時の `PLATE_API_URL` を使う
pub fn build_client() -> WebClient {
    let config = ApiConfig::from_env_value(option_env!("PLATE_API_URL"));
    DetectionClient::new(config, FetchTransport)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn transport_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn into_http_response(response: Response) -> Result<HttpResponse, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    Ok(HttpResponse { status, body })
}

fn build_form_data(form: MultipartForm<PickedFile>) -> Result<FormData, ApiError> {
    let js_error = |e: wasm_bindgen::JsValue| ApiError::Transport(format!("{:?}", e));

    let data = FormData::new().map_err(js_error)?;
    for (name, value) in form.into_parts() {
        match value {
            FormValue::Text(text) => data.append_with_str(name, &text).map_err(js_error)?,
            FormValue::File(picked) => data
                .append_with_blob_and_filename(name, picked.file(), &picked.name())
                .map_err(js_error)?,
        }
    }
    Ok(data)
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    type File = PickedFile;

    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let response = Request::get(url).send().await.map_err(transport_error)?;
        into_http_response(response).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm<PickedFile>,
    ) -> Result<HttpResponse, ApiError> {
        // Content-Typeはブラウザがboundary付きで設定する
        let request = Request::post(url)
            .body(build_form_data(form)?)
            .map_err(transport_error)?;
        let response = request.send().await.map_err(transport_error)?;
        into_http_response(response).await
    }
}
