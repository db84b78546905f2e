//! Observability setup for Saathi.

pub mod tracing_setup;
