//! reqwestによるTransport実装

use async_trait::async_trait;
use plate_detect_common::api::{ApiConfig, FormValue, HttpResponse, MultipartForm, Transport};
use plate_detect_common::{ApiError, DetectionClient};
use reqwest::multipart::{Form, Part};

use crate::scanner::ImageFile;

pub type CliClient = DetectionClient<ReqwestTransport>;

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn build_client(config: ApiConfig) -> CliClient {
    DetectionClient::new(config, ReqwestTransport::new())
}

fn transport_error(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn into_http_response(response: reqwest::Response) -> Result<HttpResponse, ApiError> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport_error)?;
    Ok(HttpResponse { status, body })
}

async fn file_part(file: &ImageFile) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| ApiError::Validation(format!("{}: {}", file.path.display(), e)))?;

    Part::bytes(bytes)
        .file_name(file.file_name.clone())
        .mime_str(file.mime_type())
        .map_err(transport_error)
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    type File = ImageFile;

    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let response = self.client.get(url).send().await.map_err(transport_error)?;
        into_http_response(response).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm<ImageFile>,
    ) -> Result<HttpResponse, ApiError> {
        let mut multipart = Form::new();
        for (name, value) in form.into_parts() {
            multipart = match value {
                FormValue::Text(text) => multipart.text(name, text),
                FormValue::File(file) => multipart.part(name, file_part(&file).await?),
            };
        }

        let response = self
            .client
            .post(url)
            .multipart(multipart)
            .send()
            .await
            .map_err(transport_error)?;
        into_http_response(response).await
    }
}
