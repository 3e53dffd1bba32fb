//! # Effect Executor
//!
//! Runs the side effects requested by `update()` and reports each outcome
//! as the matching completion `Action`. Errors are carried in the action,
//! never retried here.

use log::debug;

use crate::backend::DocumentBackend;
use crate::core::action::{Action, Effect};
use crate::voice::{SpeechRecognizer, VoiceError};

pub async fn execute(
    effect: Effect,
    backend: &dyn DocumentBackend,
    recognizer: Option<&dyn SpeechRecognizer>,
) -> Option<Action> {
    match effect {
        Effect::None | Effect::Quit => None,

        Effect::UploadDocument(path) => {
            debug!("Executing upload via {}", backend.name());
            Some(Action::DocumentProcessed(
                backend.process_document(&path).await,
            ))
        }

        Effect::SendMessage(text) => {
            debug!("Executing message send via {}", backend.name());
            let result = backend.process_message(&text).await;
            Some(Action::MessageProcessed { text, result })
        }

        Effect::CaptureVoice => {
            let Some(recognizer) = recognizer else {
                return Some(Action::VoiceFailed(VoiceError::Unsupported));
            };
            debug!("Listening via {}", recognizer.name());
            Some(match recognizer.listen().await {
                Ok(text) => Action::VoiceRecognized(text),
                Err(e) => Action::VoiceFailed(e),
            })
        }

        Effect::SetModel(name) => {
            let result = backend.set_model(&name).await;
            Some(Action::ModelSelected { name, result })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::backend::{BackendError, BotReply};
    use crate::test_support::{BackendCall, StubBackend, StubRecognizer};

    #[tokio::test]
    async fn upload_reports_document_processed() {
        let backend = StubBackend::new().with_document(Ok("Ready.".to_string()));
        let action = execute(
            Effect::UploadDocument(PathBuf::from("lease.pdf")),
            &backend,
            None,
        )
        .await;

        assert!(matches!(action, Some(Action::DocumentProcessed(Ok(ref s))) if s == "Ready."));
        assert_eq!(
            backend.calls(),
            vec![BackendCall::Document(PathBuf::from("lease.pdf"))]
        );
    }

    #[tokio::test]
    async fn send_carries_text_into_completion() {
        let reply = BotReply {
            summary: Some("Short.".to_string()),
            ..Default::default()
        };
        let backend = StubBackend::new().with_message(Ok(reply.clone()));
        let action = execute(Effect::SendMessage("Summarize".into()), &backend, None).await;

        match action {
            Some(Action::MessageProcessed { text, result }) => {
                assert_eq!(text, "Summarize");
                assert_eq!(result.unwrap(), reply);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_failure_is_reported_not_raised() {
        let backend =
            StubBackend::new().with_message(Err(BackendError::Network("refused".into())));
        let action = execute(Effect::SendMessage("hi".into()), &backend, None).await;
        assert!(matches!(
            action,
            Some(Action::MessageProcessed { result: Err(BackendError::Network(_)), .. })
        ));
    }

    #[tokio::test]
    async fn capture_without_recognizer_is_unsupported() {
        let backend = StubBackend::new();
        let action = execute(Effect::CaptureVoice, &backend, None).await;
        assert!(matches!(action, Some(Action::VoiceFailed(VoiceError::Unsupported))));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn capture_reports_recognized_text() {
        let backend = StubBackend::new();
        let recognizer = StubRecognizer::heard("What is the rent?");
        let action = execute(Effect::CaptureVoice, &backend, Some(&recognizer)).await;
        assert!(matches!(action, Some(Action::VoiceRecognized(ref t)) if t == "What is the rent?"));
    }

    #[tokio::test]
    async fn capture_reports_failure() {
        let backend = StubBackend::new();
        let recognizer = StubRecognizer::failing();
        let action = execute(Effect::CaptureVoice, &backend, Some(&recognizer)).await;
        assert!(matches!(action, Some(Action::VoiceFailed(VoiceError::NoSpeech))));
    }

    #[tokio::test]
    async fn set_model_reports_model_selected() {
        let backend = StubBackend::new();
        let action = execute(Effect::SetModel("mistral".into()), &backend, None).await;
        match action {
            Some(Action::ModelSelected { name, result }) => {
                assert_eq!(name, "mistral");
                assert_eq!(result.unwrap(), "Model set to mistral");
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(backend.calls(), vec![BackendCall::Model("mistral".into())]);
    }

    #[tokio::test]
    async fn none_and_quit_do_nothing() {
        let backend = StubBackend::new();
        assert!(execute(Effect::None, &backend, None).await.is_none());
        assert!(execute(Effect::Quit, &backend, None).await.is_none());
        assert!(backend.calls().is_empty());
    }
}
