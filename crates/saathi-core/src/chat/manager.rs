//! The chat session manager.
//!
//! Owns the persisted message log, the rendered transcript, and the derived
//! session list for one seller. The transcript is optimistic: a sent message
//! appears immediately, the copilot reply is appended when the backend
//! responds, and both are persisted afterwards. The persisted log only ever
//! reflects completed, stored exchanges.

use chrono::Utc;
use tracing::{debug, warn};

use saathi_types::backend::{ChatReply, ChatRequest, HistoryEntry, Language};
use saathi_types::chat::{ChatMessage, ChatSession, MessageKind};
use saathi_types::identity::User;

use crate::backend::CopilotBackend;
use crate::chat::sessions::group_into_sessions;
use crate::chat::store::ChatStore;

/// Maximum number of persisted messages fetched per history load.
const HISTORY_FETCH_LIMIT: u32 = 100;

/// Maximum prior turns forwarded to the backend per request.
const HISTORY_WINDOW: usize = 5;

/// Synthetic greeting ids. All share the reserved `greeting` prefix so they
/// are filtered out of grouping and backend history.
const GREETING_EMPTY_HISTORY: &str = "greeting";
const GREETING_NEW_USER: &str = "greeting-new-user";
const GREETING_ERROR: &str = "greeting-error";
const GREETING_NEW_CHAT: &str = "greeting-new-chat";
const GREETING_GENERIC: &str = "greeting-generic";

/// Result of a [`ChatManager::send_message`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The backend replied; the transcript holds the full exchange.
    Replied,
    /// The backend call failed; the transcript gained a bot-authored error
    /// message and nothing was persisted.
    Failed,
    /// Empty input, or another send was already in flight.
    Ignored,
}

/// Reconstructs sessions and runs the optimistic send protocol.
///
/// Generic over [`ChatStore`] and [`CopilotBackend`] so it can be driven by
/// test doubles. The store is optional: without one (or without a signed-in
/// user) the conversation is ephemeral and nothing persists.
pub struct ChatManager<S, B> {
    store: Option<S>,
    backend: B,
    language: Language,
    /// Persisted message log for the current user, ascending by creation.
    all_messages: Vec<ChatMessage>,
    /// Messages currently rendered (a session's log, or an in-progress
    /// unsaved conversation).
    transcript: Vec<ChatMessage>,
    /// Derived session list, most recently active first.
    sessions: Vec<ChatSession>,
    /// `None` means a new, unsaved conversation is in progress.
    active_session_id: Option<String>,
    /// Single-flight guard; also drives the "typing" indicator.
    sending: bool,
}

impl<S: ChatStore, B: CopilotBackend> ChatManager<S, B> {
    /// Create a manager. Pass `None` for the store to disable persistence.
    pub fn new(store: Option<S>, backend: B) -> Self {
        Self {
            store,
            backend,
            language: Language::default(),
            all_messages: Vec::new(),
            transcript: Vec::new(),
            sessions: Vec::new(),
            active_session_id: None,
            sending: false,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// The currently rendered messages.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Derived session list, most recently active first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// The persisted message log as last loaded/extended.
    pub fn all_messages(&self) -> &[ChatMessage] {
        &self.all_messages
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    /// The configured store, if any.
    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Whether a send is in flight (view layers render a typing indicator
    /// while true).
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Load the user's persisted history and rebuild the session list.
    ///
    /// Every path here is a success path from the caller's perspective: a
    /// missing user, an unconfigured store, an empty history, and a fetch
    /// failure all degrade to a greeting-only transcript with no active
    /// session. Fetch failures are logged, never rendered.
    pub async fn load_history(&mut self, user: Option<&User>) {
        let Some(user) = user else {
            self.reset_to_greeting(GREETING_NEW_USER, None);
            self.sessions.clear();
            return;
        };

        let Some(store) = &self.store else {
            self.reset_to_greeting(GREETING_NEW_USER, Some(user));
            self.sessions.clear();
            return;
        };

        match store.list_messages(&user.id, HISTORY_FETCH_LIMIT).await {
            Ok(messages) if messages.is_empty() => {
                self.all_messages.clear();
                self.sessions.clear();
                self.reset_to_greeting(GREETING_EMPTY_HISTORY, Some(user));
            }
            Ok(messages) => {
                debug!(user_id = %user.id, count = messages.len(), "chat history loaded");
                self.all_messages = messages;
                self.sessions = group_into_sessions(&self.all_messages);
                // Open on a greeting; the user picks a session explicitly.
                self.reset_to_greeting(GREETING_EMPTY_HISTORY, Some(user));
            }
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "failed to fetch chat history");
                self.all_messages.clear();
                self.sessions.clear();
                self.reset_to_greeting(GREETING_ERROR, Some(user));
            }
        }
    }

    /// Render a stored session. Idempotent.
    pub fn select_session(&mut self, session_id: &str) {
        self.transcript = self
            .all_messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        self.active_session_id = Some(session_id.to_string());
    }

    /// Abandon the active session and show a fresh greeting.
    ///
    /// The session list is untouched until a real message is sent.
    pub fn start_new_session(&mut self, user: Option<&User>) {
        let id = if user.is_some() {
            GREETING_NEW_CHAT
        } else {
            GREETING_GENERIC
        };
        self.reset_to_greeting(id, user);
    }

    /// Send a message: optimistic transcript update, backend call, then
    /// persistence.
    ///
    /// Whitespace-only input is ignored, as is any call while a previous
    /// send is unresolved (single-flight). A backend failure surfaces as a
    /// bot-authored error message in the transcript and persists nothing;
    /// the seller retries by resending.
    pub async fn send_message(&mut self, text: &str, user: Option<&User>) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() || self.sending {
            return SendOutcome::Ignored;
        }

        self.sending = true;
        let outcome = self.run_exchange(text, user).await;
        self.sending = false;
        outcome
    }

    async fn run_exchange(&mut self, text: &str, user: Option<&User>) -> SendOutcome {
        let session_id = match &self.active_session_id {
            Some(id) => id.clone(),
            None => {
                let id = ChatMessage::new_id();
                self.active_session_id = Some(id.clone());
                id
            }
        };
        let user_id = user.map(|u| u.id.clone()).unwrap_or_default();

        let user_message = ChatMessage {
            id: ChatMessage::new_id(),
            kind: MessageKind::User,
            content: text.to_string(),
            session_id: session_id.clone(),
            user_id: user_id.clone(),
            created_at: Utc::now(),
        };

        // History is windowed from the transcript as it stood before this
        // send, greetings excluded.
        let request = ChatRequest {
            history: windowed_history(&self.transcript),
            current_query: text.to_string(),
            language: self.language,
        };

        // Optimistic update: a greeting transcript is replaced outright, a
        // real conversation is appended to.
        if self.transcript.iter().any(ChatMessage::is_greeting) {
            self.transcript = vec![user_message.clone()];
        } else {
            self.transcript.push(user_message.clone());
        }

        match self.backend.chat(&request).await {
            Ok(ChatReply { reply }) => {
                let bot_message = ChatMessage {
                    id: ChatMessage::new_id(),
                    kind: MessageKind::Bot,
                    content: reply,
                    session_id: session_id.clone(),
                    user_id,
                    created_at: Utc::now(),
                };
                self.transcript.push(bot_message.clone());

                if user.is_some() {
                    self.persist_exchange(user_message, bot_message).await;
                }
                SendOutcome::Replied
            }
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "backend chat call failed");
                self.transcript.push(ChatMessage {
                    id: ChatMessage::new_id(),
                    kind: MessageKind::Bot,
                    content: format!("Oops! Something went wrong. {err}"),
                    session_id,
                    user_id,
                    created_at: Utc::now(),
                });
                SendOutcome::Failed
            }
        }
    }

    /// Persist a completed exchange, user message first so the store stays
    /// chronological. A failed write is logged and skipped: the optimistic
    /// transcript keeps showing the exchange, and only successfully stored
    /// messages enter the log and the session list.
    async fn persist_exchange(&mut self, user_message: ChatMessage, bot_message: ChatMessage) {
        let Some(store) = &self.store else {
            return;
        };

        let mut persisted = Vec::new();
        match store.save_message(&user_message).await {
            Ok(()) => {
                persisted.push(user_message);
                match store.save_message(&bot_message).await {
                    Ok(()) => persisted.push(bot_message),
                    Err(err) => warn!(
                        session_id = %persisted[0].session_id,
                        error = %err,
                        "bot reply not persisted; transcript and store diverge until reload"
                    ),
                }
            }
            Err(err) => warn!(
                session_id = %user_message.session_id,
                error = %err,
                "exchange not persisted; transcript and store diverge until reload"
            ),
        }

        if !persisted.is_empty() {
            self.all_messages.append(&mut persisted);
            self.sessions = group_into_sessions(&self.all_messages);
        }
    }

    fn reset_to_greeting(&mut self, greeting_id: &str, user: Option<&User>) {
        self.transcript = vec![greeting_message(greeting_id, user)];
        self.active_session_id = None;
    }

    #[cfg(test)]
    fn force_sending(&mut self, sending: bool) {
        self.sending = sending;
    }
}

/// Last [`HISTORY_WINDOW`] non-greeting transcript messages as backend
/// history entries (`model` for bot turns, `user` for seller turns).
fn windowed_history(transcript: &[ChatMessage]) -> Vec<HistoryEntry> {
    let turns: Vec<&ChatMessage> = transcript.iter().filter(|m| !m.is_greeting()).collect();
    let skip = turns.len().saturating_sub(HISTORY_WINDOW);
    turns[skip..]
        .iter()
        .map(|m| match m.kind {
            MessageKind::Bot => HistoryEntry::model(m.content.clone()),
            MessageKind::User => HistoryEntry::user(m.content.clone()),
        })
        .collect()
}

/// Build the synthetic greeting shown when no conversation is active.
fn greeting_message(greeting_id: &str, user: Option<&User>) -> ChatMessage {
    let content = match user {
        Some(user) => format!(
            "Namaste {}! How can I help you grow your business today?",
            user.display_name()
        ),
        None => "Namaste! How can I help you grow your business today?".to_string(),
    };

    ChatMessage {
        id: greeting_id.to_string(),
        kind: MessageKind::Bot,
        content,
        session_id: String::new(),
        user_id: user.map(|u| u.id.clone()).unwrap_or_default(),
        created_at: Utc::now(),
    }
}
