//! IdentityProvider trait definition.
//!
//! Auth is delegated entirely to an external identity service; the app only
//! needs the current user, a sign-out call, and a way to observe auth-state
//! changes. The subscription is a `tokio::sync::watch` channel carrying
//! `Option<User>` -- `None` means signed out.

use tokio::sync::watch;

use saathi_types::error::IdentityError;
use saathi_types::identity::User;

/// External identity service seam.
///
/// Implementations live in saathi-infra (e.g., `RestIdentityProvider`).
pub trait IdentityProvider: Send + Sync {
    /// Fetch the currently authenticated user, if any.
    fn current_user(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<User>, IdentityError>> + Send;

    /// End the current session.
    fn sign_out(
        &self,
    ) -> impl std::future::Future<Output = Result<(), IdentityError>> + Send;

    /// Subscribe to auth-state changes.
    ///
    /// The receiver yields the current user (or `None`) whenever the auth
    /// state changes; the latest value is available immediately.
    fn subscribe(&self) -> watch::Receiver<Option<User>>;
}
