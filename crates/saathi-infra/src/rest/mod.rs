//! REST access to the hosted document store.

pub mod client;
pub mod messages;

pub use client::{DocumentClient, DocumentList, Query};
pub use messages::RestChatStore;
