use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use super::types::BotReply;

/// Errors that can occur while talking to the document backend.
/// None of them are retried; the session reports them and moves on.
#[derive(Debug)]
pub enum BackendError {
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Response body did not match the expected shape.
    Parse(String),
    /// The document could not be read from disk.
    Io(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
            BackendError::Io(msg) => write!(f, "file error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Uploads a PDF and returns the backend's acknowledgement text.
    async fn process_document(&self, path: &Path) -> Result<String, BackendError>;

    /// Asks a question about the uploaded document.
    async fn process_message(&self, message: &str) -> Result<BotReply, BackendError>;

    /// Switches the model the backend answers with. Returns its confirmation.
    async fn set_model(&self, model_name: &str) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_for_api_errors() {
        let err = BackendError::Api {
            status: 500,
            message: "There was an error processing your document.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend error (HTTP 500): There was an error processing your document."
        );
    }

    #[test]
    fn display_prefixes_each_kind() {
        assert!(BackendError::Network("refused".into()).to_string().starts_with("network error"));
        assert!(BackendError::Parse("eof".into()).to_string().starts_with("parse error"));
        assert!(BackendError::Io("missing".into()).to_string().starts_with("file error"));
    }
}
