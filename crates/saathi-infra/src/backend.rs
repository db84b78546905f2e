//! HTTP client for the AI backend.
//!
//! One client serves both backend surfaces: the copilot chat endpoint and
//! the product listing generator. Failures carry the backend's `{detail}`
//! envelope when it parses, with a generic fallback otherwise, so the chat
//! manager can embed the reason in a transcript message.

use std::time::Duration;

use tracing::debug;

use saathi_core::backend::{CopilotBackend, ListingBackend};
use saathi_types::backend::{
    ChatReply, ChatRequest, ErrorEnvelope, ImageUpload, ProductListing, TranslateRequest,
    TranslatedListing,
};
use saathi_types::error::BackendError;

/// Request timeout. Long enough for a slow generation, short enough that a
/// hung backend releases the chat's single-flight guard.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Reqwest-based client for the Saathi AI backend.
pub struct HttpCopilotBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCopilotBackend {
    pub fn new(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl CopilotBackend for HttpCopilotBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        debug!(
            history_len = request.history.len(),
            language = %request.language,
            "sending chat request"
        );

        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        read_json(response).await
    }
}

impl ListingBackend for HttpCopilotBackend {
    async fn generate_listing(
        &self,
        description: &str,
        category: &str,
        image: ImageUpload,
    ) -> Result<ProductListing, BackendError> {
        let form = reqwest::multipart::Form::new()
            .text("description", description.to_string())
            .text("category", category.to_string())
            .part(
                "image",
                reqwest::multipart::Part::bytes(image.bytes).file_name(image.file_name),
            );

        let response = self
            .http
            .post(self.url("/api/listing"))
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        read_json(response).await
    }

    async fn translate_listing(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslatedListing, BackendError> {
        let response = self
            .http
            .post(self.url("/api/listing/translate"))
            .json(request)
            .send()
            .await
            .map_err(network_error)?;

        read_json(response).await
    }
}

fn network_error(err: reqwest::Error) -> BackendError {
    BackendError::Network(err.to_string())
}

/// Extract the error detail from a failure body, falling back to a generic
/// message when the envelope doesn't parse.
fn error_detail(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.detail)
        .unwrap_or_else(|_| format!("API call failed (HTTP {status})"))
}

async fn read_json<R: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<R, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status: status.as_u16(),
            detail: error_detail(status.as_u16(), &body),
        });
    }
    response
        .json()
        .await
        .map_err(|e| BackendError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_uses_envelope() {
        assert_eq!(error_detail(500, r#"{"detail":"overloaded"}"#), "overloaded");
    }

    #[test]
    fn test_error_detail_falls_back_on_garbage() {
        assert_eq!(
            error_detail(502, "<html>bad gateway</html>"),
            "API call failed (HTTP 502)"
        );
        assert_eq!(error_detail(500, ""), "API call failed (HTTP 500)");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpCopilotBackend::new("http://localhost:8000/".to_string());
        assert_eq!(backend.url("/api/chat"), "http://localhost:8000/api/chat");
    }
}
