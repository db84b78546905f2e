//! Backend trait definitions.
//!
//! The AI backend is a plain HTTPS request/response service. Chat and
//! listing generation are separate traits so the chat manager only depends
//! on the surface it uses. Implementations live in saathi-infra
//! (`HttpCopilotBackend` serves both).

use saathi_types::backend::{
    ChatReply, ChatRequest, ImageUpload, ProductListing, TranslateRequest, TranslatedListing,
};
use saathi_types::error::BackendError;

/// Conversational endpoint of the AI backend (`POST /api/chat`).
pub trait CopilotBackend: Send + Sync {
    /// Send the windowed history plus the current query, receive a reply.
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatReply, BackendError>> + Send;
}

/// Product listing endpoints of the AI backend.
pub trait ListingBackend: Send + Sync {
    /// Generate a listing from a seller description, category, and product
    /// photo.
    fn generate_listing(
        &self,
        description: &str,
        category: &str,
        image: ImageUpload,
    ) -> impl std::future::Future<Output = Result<ProductListing, BackendError>> + Send;

    /// Translate a listing title and description.
    fn translate_listing(
        &self,
        request: &TranslateRequest,
    ) -> impl std::future::Future<Output = Result<TranslatedListing, BackendError>> + Send;
}
