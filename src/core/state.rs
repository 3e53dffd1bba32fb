//! # Application State
//!
//! Core session state for docchat. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transcript: Transcript          // append-only chat history
//! ├── selected_file: Option<PathBuf>  // PDF chosen in the file picker
//! ├── draft: String                   // composer text
//! ├── is_bot_responding: bool         // a backend call is in flight
//! ├── is_listening: bool              // a voice capture is in flight
//! ├── voice_supported: bool           // a recognizer is configured
//! ├── notices: VecDeque<Notice>      // blocking notifications, oldest shown first
//! ├── status_message: String          // status bar text
//! ├── model_name: Option<String>      // backend model, once confirmed
//! └── theme: ThemeMode                // light / dark
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::VecDeque;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::core::transcript::Transcript;

pub const VOICE_UNSUPPORTED_NOTICE: &str = "Speech recognition not supported on this system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Input rejected before any request was made.
    Validation,
    /// A backend call or voice capture failed.
    Failure,
    /// A platform capability is missing.
    Unsupported,
}

/// A notification the user has to dismiss.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Underlying error, shown below the text.
    pub detail: Option<String>,
}

impl Notice {
    pub fn validation(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            text: text.into(),
            detail: None,
        }
    }

    pub fn failure(text: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            text: text.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn unsupported(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Unsupported,
            text: text.into(),
            detail: None,
        }
    }
}

pub struct App {
    pub transcript: Transcript,
    pub selected_file: Option<PathBuf>,
    pub draft: String,
    pub is_bot_responding: bool,
    pub is_listening: bool,
    pub voice_supported: bool,
    /// Pending notices. Only the front one is shown; dismissing pops it.
    pub notices: VecDeque<Notice>,
    pub status_message: String,
    pub model_name: Option<String>,
    pub theme: ThemeMode,
}

impl App {
    pub fn new(voice_supported: bool) -> Self {
        let mut notices = VecDeque::new();
        // Missing voice support is reported once, up front.
        if !voice_supported {
            notices.push_back(Notice::unsupported(VOICE_UNSUPPORTED_NOTICE));
        }
        Self {
            transcript: Transcript::new(),
            selected_file: None,
            draft: String::new(),
            is_bot_responding: false,
            is_listening: false,
            voice_supported,
            notices,
            status_message: String::from("Welcome to docchat!"),
            model_name: None,
            theme: ThemeMode::default(),
        }
    }

    pub fn from_config(config: &ResolvedConfig, voice_supported: bool) -> Self {
        let mut app = Self::new(voice_supported);
        app.theme = config.theme;
        app.selected_file = config.initial_file.clone();
        app
    }

    /// The notice currently shown, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Queue a notice behind any the user has not dismissed yet.
    pub fn raise(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// File name of the selected document, for display.
    pub fn selected_file_name(&self) -> Option<String> {
        self.selected_file.as_ref().map(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
    }
}
