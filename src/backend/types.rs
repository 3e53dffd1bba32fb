//! Wire types for the backend endpoints.
//!
//! The backend is a FastAPI service, so field names follow its JSON
//! (`botResponse`, capitalized reply keys) rather than Rust conventions.

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /process-document`.
#[derive(Deserialize, Debug)]
pub struct DocumentResponse {
    #[serde(rename = "botResponse")]
    pub bot_response: String,
}

/// Structured answer to a question. Every field is optional; the backend
/// may also send keys we don't display (e.g. `Question`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BotReply {
    #[serde(rename = "Reference", default)]
    pub reference: Option<String>,
    #[serde(rename = "Extraction", default)]
    pub extraction: Option<String>,
    #[serde(rename = "Summary", default)]
    pub summary: Option<String>,
}

/// Body of a successful `POST /process-message`.
#[derive(Deserialize, Debug)]
pub struct MessageResponse {
    #[serde(rename = "botResponse")]
    pub bot_response: BotReply,
}

/// Body of a successful `POST /set-model`.
#[derive(Deserialize, Debug)]
pub struct ModelResponse {
    pub message: String,
}

/// FastAPI error body: `{"detail": ...}`. `detail` is a string for
/// `HTTPException`s and a list of objects for validation failures.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable message, falling back to the raw body.
    pub(crate) fn message(body: &str) -> String {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: Some(serde_json::Value::String(detail)),
            }) => detail,
            Ok(ErrorBody {
                detail: Some(other),
            }) => other.to_string(),
            _ if body.trim().is_empty() => "empty response".to_string(),
            _ => body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_response_ignores_question_key() {
        let json = r#"{"botResponse":{"Question":"What is the term?","Reference":"Clause 4.1","Extraction":"The term is 12 months.","Summary":"One year."}}"#;
        let parsed: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.bot_response.reference.as_deref(), Some("Clause 4.1"));
        assert_eq!(
            parsed.bot_response.extraction.as_deref(),
            Some("The term is 12 months.")
        );
        assert_eq!(parsed.bot_response.summary.as_deref(), Some("One year."));
    }

    #[test]
    fn missing_reply_fields_are_none() {
        let json = r#"{"botResponse":{"Summary":"Only a summary"}}"#;
        let parsed: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.bot_response.reference, None);
        assert_eq!(parsed.bot_response.extraction, None);
        assert_eq!(parsed.bot_response.summary.as_deref(), Some("Only a summary"));
    }

    #[test]
    fn null_reply_fields_are_none() {
        let json = r#"{"botResponse":{"Reference":null,"Extraction":null,"Summary":null}}"#;
        let parsed: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.bot_response, BotReply::default());
    }

    #[test]
    fn document_response_requires_bot_response() {
        assert!(serde_json::from_str::<DocumentResponse>(r#"{"message":"ok"}"#).is_err());
    }

    #[test]
    fn error_message_prefers_string_detail() {
        let body = r#"{"detail":"No file selected. Please try again."}"#;
        assert_eq!(ErrorBody::message(body), "No file selected. Please try again.");
    }

    #[test]
    fn error_message_stringifies_structured_detail() {
        let body = r#"{"detail":[{"loc":["body","userMessage"],"msg":"field required"}]}"#;
        assert!(ErrorBody::message(body).contains("field required"));
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(ErrorBody::message("Internal Server Error\n"), "Internal Server Error");
        assert_eq!(ErrorBody::message("   "), "empty response");
    }
}
