//! # Voice Capture
//!
//! Single-shot speech recognition. A recognizer listens for one utterance,
//! returns its transcript, and stops. There is no continuous mode.
//!
//! Terminals have no built-in speech engine, so recognition is delegated to
//! an external command (see [`CommandRecognizer`]). When none is configured,
//! voice input is unsupported and the session reports that once at startup.

mod command;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::ResolvedConfig;

pub use command::CommandRecognizer;

#[derive(Debug)]
pub enum VoiceError {
    /// No recognizer is available on this system.
    Unsupported,
    /// The recognizer command could not be started.
    Spawn(String),
    /// The recognizer exited unsuccessfully.
    Failed { code: Option<i32>, stderr: String },
    /// Recognition finished without hearing anything.
    NoSpeech,
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceError::Unsupported => write!(f, "speech recognition not supported"),
            VoiceError::Spawn(msg) => write!(f, "could not start recognizer: {msg}"),
            VoiceError::Failed { code, stderr } => match code {
                Some(code) => write!(f, "recognizer exited with status {code}: {stderr}"),
                None => write!(f, "recognizer was terminated: {stderr}"),
            },
            VoiceError::NoSpeech => write!(f, "no speech recognized"),
        }
    }
}

impl std::error::Error for VoiceError {}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Returns the name of the recognizer.
    fn name(&self) -> &str;

    /// Listens for a single utterance and returns its transcript.
    async fn listen(&self) -> Result<String, VoiceError>;
}

/// Builds the configured recognizer, or `None` when voice is unsupported.
pub fn from_config(config: &ResolvedConfig) -> Option<Arc<dyn SpeechRecognizer>> {
    let command = config.voice_command.as_deref()?;
    match CommandRecognizer::parse(command, &config.voice_language) {
        Some(recognizer) => {
            log::info!("Voice capture via `{}`", recognizer.program());
            Some(Arc::new(recognizer))
        }
        None => {
            log::warn!("Voice command is empty, speech recognition disabled");
            None
        }
    }
}
