//! Environment configuration loader.
//!
//! All deployment coordinates come from `SAATHI_*` environment variables,
//! read once at startup. The backend URL is required; the document-store
//! block is optional as a whole -- if any of its variables is missing the
//! store is disabled and the chat runs unsaved, which is a supported mode,
//! not an error.

use secrecy::SecretString;
use tracing::debug;

use saathi_types::config::{CopilotConfig, StoreConfig};
use saathi_types::error::ConfigError;

const BACKEND_URL: &str = "SAATHI_BACKEND_URL";
const STORE_ENDPOINT: &str = "SAATHI_STORE_ENDPOINT";
const STORE_PROJECT_ID: &str = "SAATHI_STORE_PROJECT_ID";
const STORE_DATABASE_ID: &str = "SAATHI_STORE_DATABASE_ID";
const STORE_MESSAGES_COLLECTION_ID: &str = "SAATHI_STORE_MESSAGES_COLLECTION_ID";
const STORE_API_KEY: &str = "SAATHI_STORE_API_KEY";

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<CopilotConfig, ConfigError> {
    load(|name| std::env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// Split out from [`load_from_env`] so tests can supply variables without
/// mutating the process environment.
pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<CopilotConfig, ConfigError> {
    let backend_url = non_empty(&lookup, BACKEND_URL)
        .ok_or(ConfigError::MissingVar(BACKEND_URL))?;

    let store = load_store(&lookup);
    if store.is_none() {
        debug!("document store not configured; chat history will not persist");
    }

    Ok(CopilotConfig { backend_url, store })
}

fn load_store(lookup: &impl Fn(&str) -> Option<String>) -> Option<StoreConfig> {
    Some(StoreConfig {
        endpoint: non_empty(lookup, STORE_ENDPOINT)?,
        project_id: non_empty(lookup, STORE_PROJECT_ID)?,
        database_id: non_empty(lookup, STORE_DATABASE_ID)?,
        messages_collection_id: non_empty(lookup, STORE_MESSAGES_COLLECTION_ID)?,
        api_key: non_empty(lookup, STORE_API_KEY).map(SecretString::from),
    })
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load_from(map: &HashMap<String, String>) -> Result<CopilotConfig, ConfigError> {
        load(|name| map.get(name).cloned())
    }

    #[test]
    fn test_backend_url_required() {
        let err = load_from(&vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("SAATHI_BACKEND_URL")));
    }

    #[test]
    fn test_store_optional() {
        let config =
            load_from(&vars(&[("SAATHI_BACKEND_URL", "http://localhost:8000")])).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert!(!config.persistence_enabled());
    }

    #[test]
    fn test_partial_store_config_disables_store() {
        let config = load_from(&vars(&[
            ("SAATHI_BACKEND_URL", "http://localhost:8000"),
            ("SAATHI_STORE_ENDPOINT", "http://localhost/v1"),
            ("SAATHI_STORE_PROJECT_ID", "p"),
            // database and collection missing
        ]))
        .unwrap();
        assert!(!config.persistence_enabled());
    }

    #[test]
    fn test_full_store_config() {
        let config = load_from(&vars(&[
            ("SAATHI_BACKEND_URL", "http://localhost:8000"),
            ("SAATHI_STORE_ENDPOINT", "http://localhost/v1"),
            ("SAATHI_STORE_PROJECT_ID", "p"),
            ("SAATHI_STORE_DATABASE_ID", "db"),
            ("SAATHI_STORE_MESSAGES_COLLECTION_ID", "messages"),
        ]))
        .unwrap();
        let store = config.store.unwrap();
        assert_eq!(store.database_id, "db");
        assert!(store.api_key.is_none());
    }

    #[test]
    fn test_empty_values_treated_as_missing() {
        let err = load_from(&vars(&[("SAATHI_BACKEND_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }
}
