//! ChatStore backed by the hosted document store.
//!
//! Messages live in one collection with `{user_id, type, content,
//! session_id}` fields; the store manages `$id` and `$createdAt`. Documents
//! are created under the client-generated message id so the optimistic
//! transcript and the persisted log share ids, and the store's `$createdAt`
//! becomes canonical on read-back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use saathi_core::chat::ChatStore;
use saathi_types::chat::{ChatMessage, MessageKind};
use saathi_types::error::StoreError;

use super::client::{DocumentClient, Query};

/// A message document as returned by the store.
#[derive(Debug, Clone, Deserialize)]
struct MessageDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "$createdAt")]
    created_at: DateTime<Utc>,
    user_id: String,
    #[serde(rename = "type")]
    kind: MessageKind,
    content: String,
    session_id: String,
}

impl From<MessageDocument> for ChatMessage {
    fn from(doc: MessageDocument) -> Self {
        ChatMessage {
            id: doc.id,
            kind: doc.kind,
            content: doc.content,
            session_id: doc.session_id,
            user_id: doc.user_id,
            created_at: doc.created_at,
        }
    }
}

/// The writable fields of a message document.
#[derive(Debug, Serialize)]
struct MessageFields<'a> {
    user_id: &'a str,
    #[serde(rename = "type")]
    kind: MessageKind,
    content: &'a str,
    session_id: &'a str,
}

/// [`ChatStore`] implementation over the messages collection.
pub struct RestChatStore {
    client: DocumentClient,
    database_id: String,
    collection_id: String,
}

impl RestChatStore {
    pub fn new(client: DocumentClient, database_id: String, collection_id: String) -> Self {
        Self {
            client,
            database_id,
            collection_id,
        }
    }
}

impl ChatStore for RestChatStore {
    async fn list_messages(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let queries = [
            Query::equal("user_id", user_id),
            Query::order_asc("$createdAt"),
            Query::limit(limit),
        ];

        let page = self
            .client
            .list_documents::<MessageDocument>(&self.database_id, &self.collection_id, &queries)
            .await?;

        debug!(user_id, total = page.total, "listed chat messages");
        Ok(page.documents.into_iter().map(ChatMessage::from).collect())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let fields = MessageFields {
            user_id: &message.user_id,
            kind: message.kind,
            content: &message.content,
            session_id: &message.session_id,
        };

        self.client
            .create_document::<_, serde_json::Value>(
                &self.database_id,
                &self.collection_id,
                &message.id,
                &fields,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_document_maps_store_fields() {
        let doc: MessageDocument = serde_json::from_str(
            r#"{
                "$id": "abc",
                "$createdAt": "2025-06-01T10:00:00.000+00:00",
                "user_id": "u1",
                "type": "bot",
                "content": "Namaste!",
                "session_id": "s1"
            }"#,
        )
        .unwrap();

        let message = ChatMessage::from(doc);
        assert_eq!(message.id, "abc");
        assert_eq!(message.kind, MessageKind::Bot);
        assert_eq!(message.user_id, "u1");
        assert_eq!(message.session_id, "s1");
        assert_eq!(message.created_at.to_rfc3339(), "2025-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_message_fields_wire_shape() {
        let fields = MessageFields {
            user_id: "u1",
            kind: MessageKind::User,
            content: "Hello",
            session_id: "s1",
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["type"], "user");
        assert_eq!(value["content"], "Hello");
        assert_eq!(value["session_id"], "s1");
        // Store-managed fields are never sent.
        assert!(value.get("$id").is_none());
        assert!(value.get("$createdAt").is_none());
    }
}
