//! REST client for the identity provider's account API.
//!
//! Holds at most one session secret at a time and broadcasts auth-state
//! changes over a `tokio::sync::watch` channel, which is what the core
//! [`IdentityProvider`] trait exposes as its subscription. The session
//! secret is wrapped in [`secrecy::SecretString`].

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use saathi_core::identity::IdentityProvider;
use saathi_types::error::IdentityError;
use saathi_types::identity::User;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct EmailSessionBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionDocument {
    /// Session secret echoed back on creation; sent as a header afterwards.
    #[serde(default)]
    secret: String,
}

#[derive(Debug, Deserialize)]
struct AccountDocument {
    #[serde(rename = "$id")]
    id: String,
    email: String,
    #[serde(default)]
    name: String,
}

impl From<AccountDocument> for User {
    fn from(account: AccountDocument) -> Self {
        User {
            id: account.id,
            email: account.email,
            name: if account.name.is_empty() {
                None
            } else {
                Some(account.name)
            },
        }
    }
}

/// [`IdentityProvider`] implementation over the account REST API.
pub struct RestIdentityProvider {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    session: RwLock<Option<SecretString>>,
    auth_state: watch::Sender<Option<User>>,
}

impl RestIdentityProvider {
    pub fn new(endpoint: String, project_id: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");
        let (auth_state, _) = watch::channel(None);

        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            session: RwLock::new(None),
            auth_state,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    async fn apply_headers(
        &self,
        request: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        let request = request.header("X-Appwrite-Project", &self.project_id);
        match self.session.read().await.as_ref() {
            Some(secret) => request.header("X-Appwrite-Session", secret.expose_secret()),
            None => request,
        }
    }

    /// Sign in with email and password, establishing a session.
    ///
    /// On success the auth-state channel yields the signed-in user.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, IdentityError> {
        let body = EmailSessionBody { email, password };

        let response = self
            .apply_headers(self.http.post(self.url("/account/sessions/email")))
            .await
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(IdentityError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(IdentityError::Http {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let session: SessionDocument = response
            .json()
            .await
            .map_err(|e| IdentityError::Deserialization(e.to_string()))?;
        *self.session.write().await = Some(SecretString::from(session.secret));

        let user = self
            .fetch_account()
            .await?
            .ok_or(IdentityError::NotSignedIn)?;
        debug!(user_id = %user.id, "signed in");
        let _ = self.auth_state.send(Some(user.clone()));
        Ok(user)
    }

    async fn fetch_account(&self) -> Result<Option<User>, IdentityError> {
        let response = self
            .apply_headers(self.http.get(self.url("/account")))
            .await
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            // Session expired or revoked server-side.
            *self.session.write().await = None;
            let _ = self.auth_state.send(None);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(IdentityError::Http {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let account: AccountDocument = response
            .json()
            .await
            .map_err(|e| IdentityError::Deserialization(e.to_string()))?;
        Ok(Some(User::from(account)))
    }
}

impl IdentityProvider for RestIdentityProvider {
    async fn current_user(&self) -> Result<Option<User>, IdentityError> {
        if self.session.read().await.is_none() {
            return Ok(None);
        }
        self.fetch_account().await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        if self.session.read().await.is_none() {
            return Err(IdentityError::NotSignedIn);
        }

        let response = self
            .apply_headers(self.http.delete(self.url("/account/sessions/current")))
            .await
            .send()
            .await
            .map_err(|e| IdentityError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() && status != reqwest::StatusCode::UNAUTHORIZED {
            warn!(status = status.as_u16(), "sign-out call failed; clearing session anyway");
        }

        *self.session.write().await = None;
        let _ = self.auth_state.send(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.auth_state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_document_maps_to_user() {
        let account: AccountDocument = serde_json::from_str(
            r#"{"$id":"u1","email":"asha@example.com","name":"Asha"}"#,
        )
        .unwrap();
        let user = User::from(account);
        assert_eq!(user.id, "u1");
        assert_eq!(user.name.as_deref(), Some("Asha"));
    }

    #[test]
    fn test_empty_account_name_becomes_none() {
        let account: AccountDocument =
            serde_json::from_str(r#"{"$id":"u1","email":"asha@example.com"}"#).unwrap();
        let user = User::from(account);
        assert!(user.name.is_none());
        assert_eq!(user.display_name(), "asha");
    }

    #[tokio::test]
    async fn test_subscription_starts_signed_out() {
        let provider =
            RestIdentityProvider::new("http://localhost/v1".to_string(), "p".to_string());
        let receiver = provider.subscribe();
        assert!(receiver.borrow().is_none());
    }

    #[tokio::test]
    async fn test_current_user_without_session_is_none() {
        let provider =
            RestIdentityProvider::new("http://localhost/v1".to_string(), "p".to_string());
        let user = provider.current_user().await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_errors() {
        let provider =
            RestIdentityProvider::new("http://localhost/v1".to_string(), "p".to_string());
        assert!(matches!(
            provider.sign_out().await,
            Err(IdentityError::NotSignedIn)
        ));
    }
}
