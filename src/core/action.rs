//! # Actions
//!
//! Everything that can happen in docchat becomes an `Action`.
//! User presses Enter? That's `Action::SubmitMessage(None)`.
//! Backend answers? That's `Action::MessageProcessed { .. }`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the caller must run. No I/O happens here; effects are executed
//! by [`crate::core::effects`] and their outcomes come back as new actions.
//!
//! ```text
//! State + Action  →  update()  →  Effect  →  execute()  →  Action  → ...
//! ```
//!
//! Requests are serialized: while a backend call is in flight, anything that
//! would start another one is turned away with a status message.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::backend::{BackendError, BotReply};
use crate::core::state::{App, Notice};
use crate::core::transcript::ChatMessage;
use crate::voice::VoiceError;

pub const NO_FILE_NOTICE: &str = "Please select a PDF file first";
pub const EMPTY_MESSAGE_NOTICE: &str = "Please enter a message";
pub const UPLOAD_FAILED_NOTICE: &str = "Error uploading file. Please try again.";
pub const SEND_FAILED_NOTICE: &str = "Failed to send message. Make sure a PDF is uploaded first.";
pub const VOICE_FAILED_NOTICE: &str = "Speech recognition error occurred. Please try again.";
pub const MODEL_FAILED_NOTICE: &str = "Failed to switch model. Please try again.";
pub const BUSY_STATUS: &str = "Still waiting for the previous response";

#[derive(Debug)]
pub enum Action {
    /// A document was picked in the file picker.
    SelectFile(PathBuf),
    /// Upload the selected document.
    UploadDocument,
    DocumentProcessed(Result<String, BackendError>),
    /// Composer text changed.
    EditDraft(String),
    /// Send a message: the given text, or the draft when `None`.
    SubmitMessage(Option<String>),
    MessageProcessed {
        text: String,
        result: Result<BotReply, BackendError>,
    },
    StartListening,
    VoiceRecognized(String),
    VoiceFailed(VoiceError),
    SelectModel(String),
    ModelSelected {
        name: String,
        result: Result<String, BackendError>,
    },
    ToggleTheme,
    DismissNotice,
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    UploadDocument(PathBuf),
    SendMessage(String),
    CaptureVoice,
    SetModel(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectFile(path) => {
            info!("Selected document: {}", path.display());
            app.selected_file = Some(path);
            if let Some(name) = app.selected_file_name() {
                app.status_message = format!("Selected {name} (Ctrl+U to upload)");
            }
            Effect::None
        }

        Action::UploadDocument => {
            let Some(path) = app.selected_file.clone() else {
                app.raise(Notice::validation(NO_FILE_NOTICE));
                return Effect::None;
            };
            if reject_if_busy(app) {
                return Effect::None;
            }
            app.is_bot_responding = true;
            app.status_message = "Uploading document...".to_string();
            Effect::UploadDocument(path)
        }

        Action::DocumentProcessed(result) => {
            app.is_bot_responding = false;
            match result {
                Ok(bot_response) => {
                    app.transcript.push(ChatMessage::bot_text(bot_response));
                    app.status_message = "Document ready".to_string();
                }
                Err(e) => {
                    warn!("Error uploading file: {}", e);
                    app.raise(Notice::failure(UPLOAD_FAILED_NOTICE, e.to_string()));
                    app.status_message = "Upload failed".to_string();
                }
            }
            Effect::None
        }

        Action::EditDraft(text) => {
            app.draft = text;
            Effect::None
        }

        Action::SubmitMessage(explicit) => {
            // Whitespace only counts for the emptiness check; the text goes out as typed
            let text = explicit.unwrap_or_else(|| app.draft.clone());
            if text.trim().is_empty() {
                app.raise(Notice::validation(EMPTY_MESSAGE_NOTICE));
                return Effect::None;
            }
            if reject_if_busy(app) {
                return Effect::None;
            }
            app.is_bot_responding = true;
            app.status_message = "Waiting for the bot...".to_string();
            Effect::SendMessage(text)
        }

        Action::MessageProcessed { text, result } => {
            app.is_bot_responding = false;
            match result {
                Ok(reply) => {
                    app.transcript.push(ChatMessage::user(text));
                    app.transcript.push(ChatMessage::bot_reply(reply));
                    app.draft.clear();
                    app.status_message = String::new();
                }
                Err(e) => {
                    warn!("Error sending message: {}", e);
                    app.raise(Notice::failure(SEND_FAILED_NOTICE, e.to_string()));
                    app.status_message = "Send failed".to_string();
                }
            }
            Effect::None
        }

        Action::StartListening => {
            if !app.voice_supported {
                debug!("Voice capture requested but unsupported");
                return Effect::None;
            }
            if app.is_listening {
                debug!("Voice capture already active");
                return Effect::None;
            }
            app.is_listening = true;
            app.status_message = "Listening...".to_string();
            Effect::CaptureVoice
        }

        Action::VoiceRecognized(text) => {
            app.is_listening = false;
            app.draft = text.clone();
            update(app, Action::SubmitMessage(Some(text)))
        }

        Action::VoiceFailed(e) => {
            app.is_listening = false;
            warn!("Speech recognition error: {}", e);
            app.raise(Notice::failure(VOICE_FAILED_NOTICE, e.to_string()));
            app.status_message = String::new();
            Effect::None
        }

        Action::SelectModel(name) => {
            if reject_if_busy(app) {
                return Effect::None;
            }
            app.is_bot_responding = true;
            app.status_message = format!("Switching to {name}...");
            Effect::SetModel(name)
        }

        Action::ModelSelected { name, result } => {
            app.is_bot_responding = false;
            match result {
                Ok(message) => {
                    app.model_name = Some(name);
                    app.status_message = message;
                }
                Err(e) => {
                    warn!("Error switching model to {}: {}", name, e);
                    app.raise(Notice::failure(MODEL_FAILED_NOTICE, e.to_string()));
                    app.status_message = String::new();
                }
            }
            Effect::None
        }

        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.status_message = format!("Theme: {}", app.theme.label());
            Effect::None
        }

        Action::DismissNotice => {
            app.notices.pop_front();
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Turns away a new request while another is in flight.
fn reject_if_busy(app: &mut App) -> bool {
    if app.is_bot_responding {
        info!("Request rejected: previous response still pending");
        app.status_message = BUSY_STATUS.to_string();
    }
    app.is_bot_responding
}
