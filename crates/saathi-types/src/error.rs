use thiserror::Error;

/// Errors from document store operations (used by trait definitions in
/// saathi-core).
///
/// `NotFound` is its own variant so callers can distinguish "no such
/// document" (e.g. a new user with no profile yet) from transport failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from AI backend calls.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-2xx response; `detail` carries the backend's error envelope
    /// message, or a generic fallback when the body is unparseable.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no active session")]
    NotSignedIn,

    #[error("identity provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors from reading deployment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
}
