//! Session reconstruction from the raw message log.
//!
//! Grouping is a pure function: the same message list always produces the
//! same session list in the same order, which is what makes the history
//! sidebar testable without a store.

use chrono::{DateTime, Utc};

use saathi_types::chat::{ChatMessage, ChatSession};

/// Character budget for a session's preview text.
const PREVIEW_CHARS: usize = 40;

/// Group a message log into sessions, most recently active first.
///
/// Greetings (reserved id prefix) are dropped before grouping; every other
/// message lands in exactly one session. Each session's messages are sorted
/// by `created_at` (stable, so equal timestamps keep their log order), the
/// preview comes from the chronologically first message, and
/// `last_activity_at` from the last. Sessions tie on `last_activity_at` in
/// first-seen order.
pub fn group_into_sessions(messages: &[ChatMessage]) -> Vec<ChatSession> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: std::collections::HashMap<&str, Vec<ChatMessage>> =
        std::collections::HashMap::new();

    for message in messages {
        if message.is_greeting() {
            continue;
        }
        let group = groups.entry(message.session_id.as_str()).or_insert_with(|| {
            order.push(message.session_id.as_str());
            Vec::new()
        });
        group.push(message.clone());
    }

    let mut sessions: Vec<ChatSession> = order
        .into_iter()
        .map(|session_id| {
            let mut group = groups.remove(session_id).unwrap_or_default();
            group.sort_by_key(|m| m.created_at);

            // Non-empty by construction.
            let preview = group
                .first()
                .map(|m| truncate_preview(&m.content))
                .unwrap_or_default();
            let last_activity_at = group
                .last()
                .map(|m| m.created_at)
                .unwrap_or_else(Utc::now);

            ChatSession {
                id: session_id.to_string(),
                preview,
                last_activity_at,
                messages: group,
            }
        })
        .collect();

    sessions.sort_by(|a, b| b.last_activity_at.cmp(&a.last_activity_at));
    sessions
}

fn truncate_preview(content: &str) -> String {
    let truncated: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{truncated}...")
}

/// Human-readable relative time for a session's last activity.
///
/// `now` is passed in rather than read from the clock so the ladder is a
/// pure function. Falls back to an absolute month/day for anything older
/// than 30 days.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);
    let minutes = (seconds as f64 / 60.0).round() as i64;
    let hours = (minutes as f64 / 60.0).round() as i64;
    let days = (hours as f64 / 24.0).round() as i64;

    if seconds < 60 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} minute{} ago", if minutes > 1 { "s" } else { "" });
    }
    if hours < 24 {
        return format!("{hours} hour{} ago", if hours > 1 { "s" } else { "" });
    }
    if days == 1 {
        return "1 day ago".to_string();
    }
    if days < 30 {
        return format!("{days} days ago");
    }

    at.format("%B %-d").to_string()
}
