//! Wire types for the AI backend.
//!
//! These model the request/response bodies of the copilot chat endpoint
//! (`POST /api/chat`) and the product listing generator
//! (`POST /api/listing`, `POST /api/listing/translate`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reply language for the copilot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Hinglish,
}

impl Default for Language {
    fn default() -> Self {
        Language::Hinglish
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Hindi => write!(f, "hindi"),
            Language::Hinglish => write!(f, "hinglish"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Language::English),
            "hindi" => Ok(Language::Hindi),
            "hinglish" => Ok(Language::Hinglish),
            other => Err(format!("invalid language: '{other}'")),
        }
    }
}

/// Role of a history entry sent to the backend.
///
/// The backend speaks the Gemini-style convention: copilot turns are
/// `model`, seller turns are `user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Model,
}

/// One text part of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPart {
    pub text: String,
}

/// One prior conversation turn in a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub parts: Vec<HistoryPart>,
}

impl HistoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            parts: vec![HistoryPart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Model,
            parts: vec![HistoryPart { text: text.into() }],
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub history: Vec<HistoryEntry>,
    pub current_query: String,
    pub language: Language,
}

/// Success body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Error envelope returned by the backend with a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub detail: String,
}

/// A product photo attached to a listing generation request.
///
/// Sent as the `image` part of a multipart form, not JSON.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// AI-generated product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListing {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub seo_keywords: Option<Vec<String>>,
    pub category: String,
}

/// Request body for `POST /api/listing/translate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub title: String,
    pub description: String,
    pub language: String,
}

/// Translated listing title and description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedListing {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_roundtrip() {
        for lang in [Language::English, Language::Hindi, Language::Hinglish] {
            let s = lang.to_string();
            let parsed: Language = s.parse().unwrap();
            assert_eq!(lang, parsed);
        }
    }

    #[test]
    fn test_language_default() {
        assert_eq!(Language::default(), Language::Hinglish);
    }

    #[test]
    fn test_history_role_serde() {
        let json = serde_json::to_string(&HistoryRole::Model).unwrap();
        assert_eq!(json, "\"model\"");
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest {
            history: vec![
                HistoryEntry::user("What to stock this month?"),
                HistoryEntry::model("Festive kurtas sell well in October."),
            ],
            current_query: "And pricing?".to_string(),
            language: Language::Hinglish,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["history"][0]["role"], "user");
        assert_eq!(value["history"][1]["role"], "model");
        assert_eq!(
            value["history"][1]["parts"][0]["text"],
            "Festive kurtas sell well in October."
        );
        assert_eq!(value["current_query"], "And pricing?");
        assert_eq!(value["language"], "hinglish");
    }

    #[test]
    fn test_error_envelope_parse() {
        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"detail":"overloaded"}"#).unwrap();
        assert_eq!(envelope.detail, "overloaded");
    }

    #[test]
    fn test_product_listing_optional_fields() {
        let listing: ProductListing = serde_json::from_str(
            r#"{"title":"Silk Saree","description":"Handwoven.","category":"sarees"}"#,
        )
        .unwrap();
        assert!(listing.tags.is_none());
        assert!(listing.seo_keywords.is_none());
    }
}
