//! User identity types.
//!
//! The identity provider is an external service; this is only the record
//! the rest of the app sees. All message queries are scoped to `User::id`.

use serde::{Deserialize, Serialize};

/// An authenticated seller account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable account id assigned by the identity provider.
    pub id: String,
    pub email: String,
    /// Profile name, when the account has one set.
    pub name: Option<String>,
}

impl User {
    /// Name shown in greetings and the UI.
    ///
    /// Falls back to the mailbox part of the email address when no profile
    /// name is set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}
