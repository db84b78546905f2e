//! Shared domain types for Saathi.
//!
//! This crate contains the core domain types used across the Saathi seller
//! copilot: chat messages and sessions, AI-backend wire types, user identity,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror,
//! secrecy.

pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod identity;
