//! Infrastructure implementations for Saathi.
//!
//! Concrete clients for the external collaborators the core is generic
//! over: the hosted document store (REST), the AI backend (REST), the
//! identity provider (REST), an in-memory message store for tests and
//! offline runs, and the environment configuration loader.

pub mod backend;
pub mod config;
pub mod identity;
pub mod memory;
pub mod rest;
