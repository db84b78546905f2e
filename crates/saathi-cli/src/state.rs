//! Shared application state for CLI commands.

use anyhow::Context;
use tracing::{info, warn};

use saathi_infra::backend::HttpCopilotBackend;
use saathi_infra::identity::RestIdentityProvider;
use saathi_infra::rest::{DocumentClient, RestChatStore};
use saathi_types::config::CopilotConfig;
use saathi_types::identity::User;

/// Configuration plus the signed-in seller, resolved once at startup.
pub struct AppState {
    pub config: CopilotConfig,
    pub user: Option<User>,
}

impl AppState {
    /// Load configuration from the environment and sign in when both a
    /// document store and credentials are configured.
    ///
    /// A failed sign-in degrades to anonymous mode rather than aborting;
    /// the chat still works, it just isn't saved.
    pub async fn init() -> anyhow::Result<Self> {
        let config = saathi_infra::config::load_from_env()
            .context("reading SAATHI_* configuration from the environment")?;

        let user = match &config.store {
            Some(store) => sign_in_from_env(&store.endpoint, &store.project_id).await,
            None => None,
        };

        Ok(Self { config, user })
    }

    pub fn backend(&self) -> HttpCopilotBackend {
        HttpCopilotBackend::new(self.config.backend_url.clone())
    }

    /// Build a chat store when the document store is configured.
    pub fn chat_store(&self) -> Option<RestChatStore> {
        let store = self.config.store.as_ref()?;
        let client = DocumentClient::new(
            store.endpoint.clone(),
            store.project_id.clone(),
            store.api_key.clone(),
        );
        Some(RestChatStore::new(
            client,
            store.database_id.clone(),
            store.messages_collection_id.clone(),
        ))
    }
}

async fn sign_in_from_env(endpoint: &str, project_id: &str) -> Option<User> {
    let email = std::env::var("SAATHI_EMAIL").ok()?;
    let password = std::env::var("SAATHI_PASSWORD").ok()?;

    let identity = RestIdentityProvider::new(endpoint.to_string(), project_id.to_string());
    match identity.sign_in(&email, &password).await {
        Ok(user) => {
            info!(user_id = %user.id, "signed in");
            Some(user)
        }
        Err(error) => {
            warn!(%error, "sign-in failed; continuing without saved history");
            None
        }
    }
}
