//! # Transcript
//!
//! The ordered list of chat messages shown to the user. Append-only:
//! messages are pushed in submission order and never edited or removed.

use serde::{Deserialize, Serialize};

use crate::backend::BotReply;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Bot",
        }
    }
}

/// One transcript entry. User messages carry `text`; bot messages carry
/// either `text` (document acknowledgement) or any of the answer sections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A labelled piece of a message body, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section<'a> {
    Text(&'a str),
    Reference(&'a str),
    Extraction(&'a str),
    Summary(&'a str),
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: Some(text.into()),
            reference: None,
            extraction: None,
            summary: None,
        }
    }

    pub fn bot_text(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: Some(text.into()),
            reference: None,
            extraction: None,
            summary: None,
        }
    }

    /// Bot message built from a structured reply, fields copied verbatim.
    pub fn bot_reply(reply: BotReply) -> Self {
        Self {
            sender: Sender::Bot,
            text: None,
            reference: reply.reference,
            extraction: reply.extraction,
            summary: reply.summary,
        }
    }

    /// Non-empty sections in display order: text, reference, extraction, summary.
    pub fn sections(&self) -> Vec<Section<'_>> {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|s| !s.is_empty())
        }

        let mut sections = Vec::new();
        if let Some(text) = present(&self.text) {
            sections.push(Section::Text(text));
        }
        if let Some(reference) = present(&self.reference) {
            sections.push(Section::Reference(reference));
        }
        if let Some(extraction) = present(&self.extraction) {
            sections.push(Section::Extraction(extraction));
        }
        if let Some(summary) = present(&self.summary) {
            sections.push(Section::Summary(summary));
        }
        sections
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
