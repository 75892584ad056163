//! hookchat-engine: Headless engine for the hookchat webhook chat client
//!
//! This crate provides the UI-independent logic of hookchat, including:
//! - Configuration from a JSON file and the environment
//! - The sign-in gate
//! - The conversation store and session orchestration
//! - File attachments and the webhook transport
//! - Normalization of webhook replies

pub mod attachment;
pub mod auth;
pub mod config;
pub mod conversation;
pub mod normalize;
pub mod session;
pub mod webhook;

// Re-export commonly used types
pub use attachment::{AttachmentError, FileRef, LoadedAttachment};
pub use auth::{AuthGate, SessionState};
pub use config::{Config, ConfigError, Credentials};
pub use conversation::{
    Attachment, ConversationEntry, EntryId, MessageStore, Sender, TYPING_MARKER,
};
pub use normalize::{normalize, NORMALIZE_FALLBACK};
pub use session::{ChatSession, SessionError, Turn};
pub use webhook::{HttpWebhook, OutboundMessage, Webhook, WebhookError};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
