//! Deployment configuration types.
//!
//! Saathi is configured entirely from the environment, read once at startup:
//! the AI backend base URL plus the document-store coordinates (endpoint,
//! project, database, messages collection). The store section is optional --
//! without it the chat degrades to an unsaved, greeting-only conversation
//! rather than failing.

use secrecy::SecretString;

/// Coordinates of the hosted document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Document store endpoint, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    /// Collection holding chat messages.
    pub messages_collection_id: String,
    /// Server API key. Optional: browser-style sessions authenticate per
    /// user instead.
    pub api_key: Option<SecretString>,
}

/// Top-level configuration for the copilot.
#[derive(Debug, Clone)]
pub struct CopilotConfig {
    /// AI backend base URL, e.g. `https://saathi-backend.example.com`.
    pub backend_url: String,
    /// Document store coordinates; `None` disables persistence.
    pub store: Option<StoreConfig>,
}

impl CopilotConfig {
    /// Whether the messaging collection is configured.
    pub fn persistence_enabled(&self) -> bool {
        self.store.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_enabled() {
        let config = CopilotConfig {
            backend_url: "http://localhost:8000".to_string(),
            store: None,
        };
        assert!(!config.persistence_enabled());

        let config = CopilotConfig {
            backend_url: "http://localhost:8000".to_string(),
            store: Some(StoreConfig {
                endpoint: "http://localhost/v1".to_string(),
                project_id: "p".to_string(),
                database_id: "db".to_string(),
                messages_collection_id: "messages".to_string(),
                api_key: None,
            }),
        };
        assert!(config.persistence_enabled());
    }
}
