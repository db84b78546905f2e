//! In-memory ChatStore.
//!
//! Backing store for tests and for running the CLI without a configured
//! document store deployment. Same ordering contract as the REST store:
//! list results come back ascending by creation time.

use std::sync::Mutex;

use saathi_core::chat::ChatStore;
use saathi_types::chat::ChatMessage;
use saathi_types::error::StoreError;

/// Process-local message store.
#[derive(Default)]
pub struct InMemoryChatStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages, across all users.
    pub fn len(&self) -> usize {
        self.messages.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChatStore for InMemoryChatStore {
    async fn list_messages(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.created_at);
        messages.truncate(limit as usize);
        Ok(messages)
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), StoreError> {
        self.messages
            .lock()
            .expect("store mutex poisoned")
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use saathi_types::chat::MessageKind;

    fn message(id: &str, user_id: &str, minute: u32) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            kind: MessageKind::User,
            content: "hi".to_string(),
            session_id: "s1".to_string(),
            user_id: user_id.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_scoped_to_user_and_ascending() {
        let store = InMemoryChatStore::new();
        store.save_message(&message("2", "u1", 5)).await.unwrap();
        store.save_message(&message("1", "u1", 0)).await.unwrap();
        store.save_message(&message("3", "u2", 1)).await.unwrap();

        let listed = store.list_messages("u1", 100).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let store = InMemoryChatStore::new();
        for i in 0..10 {
            store.save_message(&message(&i.to_string(), "u1", i)).await.unwrap();
        }
        let listed = store.list_messages("u1", 3).await.unwrap();
        assert_eq!(listed.len(), 3);
    }
}
