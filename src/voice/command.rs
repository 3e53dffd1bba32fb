//! Recognizer backed by an external speech-to-text command.
//!
//! The command is expected to record one utterance, print its transcript to
//! stdout, and exit. Anything that fits works: a whisper.cpp wrapper, a
//! cloud STT script, or `echo` in tests.

use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::process::Command;

use super::{SpeechRecognizer, VoiceError};

/// Environment variable through which the recognition language is passed.
pub const LANGUAGE_ENV: &str = "DOCCHAT_VOICE_LANG";

pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    language: String,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>, language: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            language: language.into(),
        }
    }

    /// Splits a command line on whitespace. Returns `None` for a blank command.
    pub fn parse(command_line: &str, language: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect(), language))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    fn name(&self) -> &str {
        "command"
    }

    async fn listen(&self) -> Result<String, VoiceError> {
        info!("Starting voice capture: {} {:?}", self.program, self.args);

        // stdin must not be inherited: the TUI owns the terminal.
        let output = Command::new(&self.program)
            .args(&self.args)
            .env(LANGUAGE_ENV, &self.language)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| VoiceError::Spawn(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("Recognizer failed: {:?} {}", output.status.code(), stderr);
            return Err(VoiceError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Recognizer transcript: {} bytes", transcript.len());
        if transcript.is_empty() {
            return Err(VoiceError::NoSpeech);
        }
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_program_and_args() {
        let recognizer = CommandRecognizer::parse("whisper-listen --model base.en", "en-US").unwrap();
        assert_eq!(recognizer.program(), "whisper-listen");
        assert_eq!(recognizer.args, vec!["--model", "base.en"]);
        assert_eq!(recognizer.language, "en-US");
    }

    #[test]
    fn parse_blank_command_is_none() {
        assert!(CommandRecognizer::parse("   ", "en-US").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn listen_returns_trimmed_stdout() {
        let recognizer = CommandRecognizer::parse("echo what is the notice period", "en-US").unwrap();
        let transcript = recognizer.listen().await.unwrap();
        assert_eq!(transcript, "what is the notice period");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn listen_passes_language() {
        let recognizer = CommandRecognizer::new(
            "sh",
            vec!["-c".to_string(), format!("echo ${LANGUAGE_ENV}")],
            "de-DE",
        );
        assert_eq!(recognizer.listen().await.unwrap(), "de-DE");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_output_is_no_speech() {
        let recognizer = CommandRecognizer::parse("true", "en-US").unwrap();
        assert!(matches!(recognizer.listen().await, Err(VoiceError::NoSpeech)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_failure() {
        let recognizer = CommandRecognizer::parse("false", "en-US").unwrap();
        assert!(matches!(
            recognizer.listen().await,
            Err(VoiceError::Failed { code: Some(1), .. })
        ));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let recognizer = CommandRecognizer::parse("docchat-no-such-recognizer", "en-US").unwrap();
        let result = tokio_test::block_on(recognizer.listen());
        assert!(matches!(result, Err(VoiceError::Spawn(_))));
    }
}
