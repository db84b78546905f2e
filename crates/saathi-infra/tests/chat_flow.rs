//! End-to-end chat flow over the in-memory store.
//!
//! Drives the core ChatManager through the full lifecycle -- history load,
//! session selection, sending into an existing session, starting a new one
//! -- with a scripted backend, verifying the persisted log and the derived
//! session list stay consistent.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use saathi_core::backend::CopilotBackend;
use saathi_core::chat::{ChatManager, ChatStore, SendOutcome};
use saathi_infra::memory::InMemoryChatStore;
use saathi_types::backend::{ChatReply, ChatRequest};
use saathi_types::chat::{ChatMessage, MessageKind};
use saathi_types::error::BackendError;
use saathi_types::identity::User;

struct ScriptedBackend {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedBackend {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        }
    }
}

impl CopilotBackend for ScriptedBackend {
    async fn chat(&self, _request: &ChatRequest) -> Result<ChatReply, BackendError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "out of replies".to_string());
        Ok(ChatReply { reply })
    }
}

fn seller() -> User {
    User {
        id: "u1".to_string(),
        email: "asha@example.com".to_string(),
        name: Some("Asha".to_string()),
    }
}

fn stored(id: &str, session_id: &str, content: &str, minute: u32) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        kind: MessageKind::User,
        content: content.to_string(),
        session_id: session_id.to_string(),
        user_id: "u1".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0).unwrap(),
    }
}

#[tokio::test]
async fn full_chat_lifecycle_over_in_memory_store() {
    let store = InMemoryChatStore::new();
    store.save_message(&stored("1", "a", "saree stock question", 0)).await.unwrap();
    store.save_message(&stored("2", "b", "pricing question", 10)).await.unwrap();

    let backend = ScriptedBackend::new(&["Try bundling.", "Namaste, fresh start!"]);
    let mut manager = ChatManager::new(Some(store), backend);
    let user = seller();

    // Load: two sessions, transcript opens on a greeting.
    manager.load_history(Some(&user)).await;
    assert_eq!(manager.sessions().len(), 2);
    assert_eq!(manager.sessions()[0].id, "b");
    assert!(manager.transcript()[0].is_greeting());
    assert!(manager.active_session_id().is_none());

    // Continue the older session.
    manager.select_session("a");
    assert_eq!(manager.transcript().len(), 1);

    let outcome = manager.send_message("How about discounts?", Some(&user)).await;
    assert_eq!(outcome, SendOutcome::Replied);
    assert_eq!(manager.transcript().len(), 3);
    assert_eq!(manager.store().unwrap().len(), 4);

    // The regrouped list now has session "a" on top.
    assert_eq!(manager.sessions().len(), 2);
    assert_eq!(manager.sessions()[0].id, "a");
    assert_eq!(manager.sessions()[0].messages.len(), 3);

    // Fresh conversation gets a new session id and its own documents.
    manager.start_new_session(Some(&user));
    assert!(manager.transcript()[0].is_greeting());

    let outcome = manager.send_message("Hello again", Some(&user)).await;
    assert_eq!(outcome, SendOutcome::Replied);
    let new_session = manager.active_session_id().unwrap().to_string();
    assert!(new_session != "a" && new_session != "b");
    assert_eq!(manager.store().unwrap().len(), 6);
    assert_eq!(manager.sessions().len(), 3);
    assert_eq!(manager.sessions()[0].id, new_session);
    assert_eq!(manager.transcript().len(), 2);
    assert_eq!(manager.transcript()[1].content, "Namaste, fresh start!");

    // A reload from the store reproduces the same session list.
    let listed = manager.store().unwrap().list_messages("u1", 100).await.unwrap();
    assert_eq!(listed.len(), 6);
    let regrouped = saathi_core::chat::group_into_sessions(&listed);
    let ids: Vec<_> = regrouped.iter().map(|s| s.id.as_str()).collect();
    let current: Vec<_> = manager.sessions().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, current);
}
