//! Business logic for the Saathi seller copilot.
//!
//! The heart of this crate is [`chat::manager::ChatManager`]: it
//! reconstructs a seller's conversation history into sessions, keeps the
//! rendered transcript separate from the persisted message log, and runs the
//! optimistic-update protocol when a message is sent.
//!
//! External collaborators (document store, AI backend, identity provider)
//! are traits defined here; implementations live in saathi-infra.

pub mod backend;
pub mod chat;
pub mod identity;
