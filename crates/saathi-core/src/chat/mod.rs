//! Chat session reconstruction and the optimistic send protocol.

pub mod manager;
pub mod sessions;
pub mod store;

pub use manager::{ChatManager, SendOutcome};
pub use sessions::{group_into_sessions, relative_time};
pub use store::ChatStore;
