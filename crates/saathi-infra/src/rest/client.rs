//! Generic document client for the hosted document store.
//!
//! Speaks the Appwrite-flavored REST surface: documents live under
//! `/databases/{db}/collections/{collection}/documents`, list queries are
//! JSON strings in repeated `queries[]` parameters, and every request
//! carries the project header. A missing document is a distinct
//! [`StoreError::NotFound`] so callers can tell "new user, nothing stored
//! yet" apart from an outage.
//!
//! The optional server API key is wrapped in [`secrecy::SecretString`] and
//! never appears in Debug output or logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use saathi_types::error::StoreError;

/// Request timeout for all document operations.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One list-query operator, serialized to the store's JSON query string
/// format.
#[derive(Debug, Clone)]
pub struct Query(serde_json::Value);

impl Query {
    /// Match documents where `attribute` equals `value`.
    pub fn equal(attribute: &str, value: &str) -> Self {
        Self(json!({
            "method": "equal",
            "attribute": attribute,
            "values": [value],
        }))
    }

    /// Order results ascending by `attribute`.
    pub fn order_asc(attribute: &str) -> Self {
        Self(json!({
            "method": "orderAsc",
            "attribute": attribute,
        }))
    }

    /// Cap the number of returned documents.
    pub fn limit(count: u32) -> Self {
        Self(json!({
            "method": "limit",
            "values": [count],
        }))
    }

    fn to_wire(&self) -> String {
        self.0.to_string()
    }
}

/// Page of documents returned by a list call.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

/// Body for document creation: client-generated id plus the field payload.
#[derive(Debug, Serialize)]
struct CreateBody<'a, T> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a T,
}

/// Body for document updates.
#[derive(Debug, Serialize)]
struct UpdateBody<'a, T> {
    data: &'a T,
}

/// Client for one document store deployment.
pub struct DocumentClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: Option<SecretString>,
}

impl DocumentClient {
    /// Create a client for the given endpoint and project.
    ///
    /// `api_key` is the optional server key; without it the store applies
    /// its per-session permissions.
    pub fn new(endpoint: String, project_id: String, api_key: Option<SecretString>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            api_key,
        }
    }

    fn documents_url(&self, database_id: &str, collection_id: &str) -> String {
        format!(
            "{}/databases/{database_id}/collections/{collection_id}/documents",
            self.endpoint
        )
    }

    fn document_url(&self, database_id: &str, collection_id: &str, document_id: &str) -> String {
        format!(
            "{}/{document_id}",
            self.documents_url(database_id, collection_id)
        )
    }

    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("X-Appwrite-Project", &self.project_id);
        match &self.api_key {
            Some(key) => request.header("X-Appwrite-Key", key.expose_secret()),
            None => request,
        }
    }

    /// List documents in a collection, filtered and ordered by `queries`.
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<T>, StoreError> {
        let url = self.documents_url(database_id, collection_id);
        let params: Vec<(&str, String)> =
            queries.iter().map(|q| ("queries[]", q.to_wire())).collect();

        let response = self
            .apply_headers(self.http.get(&url).query(&params))
            .send()
            .await
            .map_err(network_error)?;

        deserialize_response(response).await
    }

    /// Create a document under a client-generated id.
    pub async fn create_document<T: Serialize, R: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &T,
    ) -> Result<R, StoreError> {
        let url = self.documents_url(database_id, collection_id);
        let body = CreateBody { document_id, data };

        let response = self
            .apply_headers(self.http.post(&url).json(&body))
            .send()
            .await
            .map_err(network_error)?;

        deserialize_response(response).await
    }

    /// Fetch one document. Missing documents map to [`StoreError::NotFound`].
    pub async fn get_document<R: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<R, StoreError> {
        let url = self.document_url(database_id, collection_id, document_id);

        let response = self
            .apply_headers(self.http.get(&url))
            .send()
            .await
            .map_err(network_error)?;

        deserialize_response(response).await
    }

    /// Patch a document's fields.
    pub async fn update_document<T: Serialize, R: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &T,
    ) -> Result<R, StoreError> {
        let url = self.document_url(database_id, collection_id, document_id);
        let body = UpdateBody { data };

        let response = self
            .apply_headers(self.http.patch(&url).json(&body))
            .send()
            .await
            .map_err(network_error)?;

        deserialize_response(response).await
    }

    /// Delete a document.
    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), StoreError> {
        let url = self.document_url(database_id, collection_id, document_id);

        let response = self
            .apply_headers(self.http.delete(&url))
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(status_error(status, response.text().await.unwrap_or_default()))
    }
}

fn network_error(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}

fn status_error(status: reqwest::StatusCode, body: String) -> StoreError {
    if status == reqwest::StatusCode::NOT_FOUND {
        StoreError::NotFound
    } else {
        StoreError::Http {
            status: status.as_u16(),
            message: body,
        }
    }
}

async fn deserialize_response<R: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<R, StoreError> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, response.text().await.unwrap_or_default()));
    }
    response
        .json()
        .await
        .map_err(|e| StoreError::Deserialization(e.to_string()))
}
