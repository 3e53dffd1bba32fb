//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{BackendError, BotReply, DocumentBackend};
use crate::core::state::App;
use crate::voice::{SpeechRecognizer, VoiceError};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Document(PathBuf),
    Message(String),
    Model(String),
}

/// A backend that answers from canned results and records every call.
///
/// Results are handed out once; later calls get the default reply.
pub struct StubBackend {
    document: Mutex<Option<Result<String, BackendError>>>,
    message: Mutex<Option<Result<BotReply, BackendError>>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            document: Mutex::new(None),
            message: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_document(self, result: Result<String, BackendError>) -> Self {
        *self.document.lock().unwrap() = Some(result);
        self
    }

    pub fn with_message(self, result: Result<BotReply, BackendError>) -> Self {
        *self.message.lock().unwrap() = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    async fn process_document(&self, path: &Path) -> Result<String, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Document(path.to_path_buf()));
        self.document
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("Document processed.".to_string()))
    }

    async fn process_message(&self, message: &str) -> Result<BotReply, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Message(message.to_string()));
        self.message
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(BotReply::default()))
    }

    async fn set_model(&self, model_name: &str) -> Result<String, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Model(model_name.to_string()));
        Ok(format!("Model set to {model_name}"))
    }
}

/// A recognizer that always hears the same thing, or nothing.
pub struct StubRecognizer {
    utterance: Option<String>,
}

impl StubRecognizer {
    pub fn heard(text: &str) -> Self {
        Self {
            utterance: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { utterance: None }
    }
}

#[async_trait]
impl SpeechRecognizer for StubRecognizer {
    fn name(&self) -> &str {
        "stub"
    }

    async fn listen(&self) -> Result<String, VoiceError> {
        self.utterance.clone().ok_or(VoiceError::NoSpeech)
    }
}

/// Creates a test App with voice support and no pending notice.
pub fn test_app() -> App {
    App::new(true)
}
