//! ChatStore trait definition.
//!
//! Persistence boundary for chat messages. Implementations live in
//! saathi-infra (e.g., `RestChatStore` against the hosted document store,
//! `InMemoryChatStore` for tests and offline runs).
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use saathi_types::chat::ChatMessage;
use saathi_types::error::StoreError;

/// Repository trait for the messages collection.
///
/// The message log is append-only: there is no update or delete. All reads
/// are scoped to one user's messages.
pub trait ChatStore: Send + Sync {
    /// List a user's messages, ordered ascending by creation time, capped
    /// at `limit`.
    fn list_messages(
        &self,
        user_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;

    /// Persist one message under its client-generated id.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
