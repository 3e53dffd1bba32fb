//! HTTP implementation of [`DocumentBackend`].
//!
//! Three endpoints, each a single POST:
//!
//! ```text
//! POST /process-document   multipart, field `file`          → {"botResponse": "..."}
//! POST /process-message    urlencoded, field `userMessage`  → {"botResponse": {Reference, Extraction, Summary}}
//! POST /set-model          urlencoded, field `model_name`   → {"message": "..."}
//! ```

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::client::{BackendError, DocumentBackend};
use super::types::{BotReply, DocumentResponse, ErrorBody, MessageResponse, ModelResponse};

const PDF_MIME: &str = "application/pdf";

/// Document backend reached over HTTP.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends the request and decodes a 2xx JSON body into `T`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Backend response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = ErrorBody::message(&body);
            warn!("Backend error: {} - {}", status.as_u16(), message);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn process_document(&self, path: &Path) -> Result<String, BackendError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| BackendError::Io(format!("{}: {}", path.display(), e)))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());

        info!(
            "Uploading document: file={}, size={} bytes",
            file_name,
            bytes.len()
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(PDF_MIME)
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        let form = Form::new().part("file", part);

        let request = self.client.post(self.endpoint("process-document")).multipart(form);
        let parsed: DocumentResponse = self.send_json(request).await?;
        Ok(parsed.bot_response)
    }

    async fn process_message(&self, message: &str) -> Result<BotReply, BackendError> {
        info!("Sending message: len={}", message.len());

        let request = self
            .client
            .post(self.endpoint("process-message"))
            .form(&[("userMessage", message)]);
        let parsed: MessageResponse = self.send_json(request).await?;
        Ok(parsed.bot_response)
    }

    async fn set_model(&self, model_name: &str) -> Result<String, BackendError> {
        info!("Switching backend model to {}", model_name);

        let request = self
            .client
            .post(self.endpoint("set-model"))
            .form(&[("model_name", model_name)]);
        let parsed: ModelResponse = self.send_json(request).await?;
        Ok(parsed.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/", Duration::from_secs(5));
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(
            backend.endpoint("process-message"),
            "http://localhost:8000/process-message"
        );
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(1));
        let result = backend
            .process_document(Path::new("/definitely/not/here.pdf"))
            .await;
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
