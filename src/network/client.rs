//! HTTP client for the Q&A server's three endpoints

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::config::Settings;
use crate::constants::{ASK_PATH, MODELS_PATH, PDF_MIME, UPLOAD_FIELD, UPLOAD_PATH};
use crate::error::ApiError;
use crate::models::{AnswerResult, AskPayload, ErrorBody, ModelDescriptor, UploadResult};

/// Typed access to `/api/models`, `/api/upload` and `/api/ask`
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        Ok(ApiClient {
            http: create_client(settings.request_timeout_secs)?,
            base_url: settings.base_url().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET the model list, in server order
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ApiError> {
        let resp = self.http.get(self.endpoint(MODELS_PATH)).send().await?;
        decode(resp).await
    }

    /// POST the file at `path` as multipart field `file`
    pub async fn upload_pdf(&self, path: &Path) -> Result<UploadResult, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        tracing::debug!(file = %file_name, bytes = bytes.len(), "Building upload form");
        let part = Part::bytes(bytes).file_name(file_name).mime_str(PDF_MIME)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let resp = self
            .http
            .post(self.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }

    /// POST a question as JSON
    pub async fn ask(&self, payload: &AskPayload) -> Result<AnswerResult, ApiError> {
        // `.json()` sets `Content-Type: application/json`
        let resp = self
            .http
            .post(self.endpoint(ASK_PATH))
            .json(payload)
            .send()
            .await?;
        decode(resp).await
    }
}

/// Read the body and decode it, turning non-2xx statuses into errors
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty());
        return Err(match message {
            Some(message) => ApiError::Server {
                status: status.as_u16(),
                message,
            },
            None => ApiError::Status(status.as_u16()),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Create an HTTP client; no timeout unless one is configured
pub fn create_client(timeout_secs: Option<u64>) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
