//! Chat message and session types for Saathi.
//!
//! Messages are the persisted unit: each belongs to exactly one session and
//! is owned by one user. Sessions are never persisted -- they are derived by
//! grouping the message log and carry a preview plus last-activity metadata
//! for the history list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Reserved id prefix for synthetic greeting messages.
///
/// Greetings are never persisted, never grouped into sessions, and never
/// forwarded to the AI backend as conversation history.
pub const GREETING_ID_PREFIX: &str = "greeting";

/// Author of a chat message.
///
/// Stored as the `type` field on the messages collection:
/// `user` for seller input, `bot` for copilot replies (including the
/// synthetic greeting and error messages shown in the transcript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::User => write!(f, "user"),
            MessageKind::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageKind::User),
            "bot" => Ok(MessageKind::Bot),
            other => Err(format!("invalid message kind: '{other}'")),
        }
    }
}

/// A single chat message, persisted or in-memory.
///
/// Ids are generated client-side (UUID v7 text) so a message can be rendered
/// optimistically before the store round trip; the store accepts the client
/// id as canonical. Within a session messages are ordered by `created_at`,
/// ties broken by insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    pub session_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Generate a fresh client-side message or session id.
    pub fn new_id() -> String {
        Uuid::now_v7().to_string()
    }

    /// Whether this message is a synthetic greeting (reserved id prefix).
    pub fn is_greeting(&self) -> bool {
        self.id.starts_with(GREETING_ID_PREFIX)
    }
}

/// A conversation thread derived from the message log.
///
/// Never persisted: recomputed from scratch whenever the underlying message
/// set changes. `messages` are sorted chronologically; the preview is the
/// chronologically-first message's content, truncated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    /// Truncated content of the session's first message.
    pub preview: String,
    /// Timestamp of the most recent message in the session.
    pub last_activity_at: DateTime<Utc>,
    /// Messages belonging to this session, ordered by `created_at`.
    pub messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Display title derived from the last activity date, e.g.
    /// "Chat from August 29".
    pub fn title(&self) -> String {
        format!("Chat from {}", self.last_activity_at.format("%B %-d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(id: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            kind: MessageKind::Bot,
            content: "hello".to_string(),
            session_id: "s1".to_string(),
            user_id: "u1".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_message_kind_roundtrip() {
        for kind in [MessageKind::User, MessageKind::Bot] {
            let s = kind.to_string();
            let parsed: MessageKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_message_kind_serde() {
        let json = serde_json::to_string(&MessageKind::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
        let parsed: MessageKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageKind::Bot);
    }

    #[test]
    fn test_greeting_detection() {
        assert!(message("greeting-new-user").is_greeting());
        assert!(message("greeting-error").is_greeting());
        assert!(!message(&ChatMessage::new_id()).is_greeting());
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(ChatMessage::new_id(), ChatMessage::new_id());
    }

    #[test]
    fn test_session_title() {
        let session = ChatSession {
            id: "s1".to_string(),
            preview: "hello...".to_string(),
            last_activity_at: Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap(),
            messages: Vec::new(),
        };
        assert_eq!(session.title(), "Chat from March 5");
    }
}
