//! Conversation session: turns user input into webhook exchanges.
//!
//! A turn has two halves. [`ChatSession::begin_turn`] records the user's
//! entry and a typing placeholder and hands back the request to send;
//! [`ChatSession::complete_turn`] swaps the placeholder for the reply or
//! for the error message. [`ChatSession::submit`] runs both halves around a
//! single webhook call. The TUI drives the halves itself so the request can
//! run on a background task.

use crate::attachment::{AttachmentError, FileRef, LoadedAttachment};
use crate::conversation::{ConversationEntry, EntryId, MessageStore};
use crate::normalize::normalize;
use crate::webhook::{OutboundMessage, Webhook, WebhookError};

/// A turn that has been recorded and is waiting for the webhook.
#[derive(Debug, Clone)]
pub struct Turn {
    /// Id of the typing placeholder to remove when the reply arrives.
    pub placeholder: EntryId,
    /// The request to send.
    pub message: OutboundMessage,
}

/// One conversation: its entries, the pending attachment, and the
/// outstanding turn, if any.
#[derive(Debug, Clone)]
pub struct ChatSession {
    store: MessageStore,
    pending_attachment: Option<FileRef>,
    in_flight: Option<EntryId>,
    error_reply: String,
}

impl ChatSession {
    /// Start a conversation, optionally opening with a bot greeting.
    pub fn new(greeting: Option<&str>, error_reply: impl Into<String>) -> Self {
        let mut store = MessageStore::new();
        if let Some(greeting) = greeting {
            store.push(ConversationEntry::bot(greeting));
        }
        Self {
            store,
            pending_attachment: None,
            in_flight: None,
            error_reply: error_reply.into(),
        }
    }

    /// The conversation so far.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Select a file to send with the next message.
    pub fn attach(&mut self, file: FileRef) {
        tracing::debug!(name = %file.name, "attachment selected");
        self.pending_attachment = Some(file);
    }

    /// Drop the selected file.
    pub fn clear_attachment(&mut self) {
        self.pending_attachment = None;
    }

    /// The file selected for the next message.
    pub fn pending_attachment(&self) -> Option<&FileRef> {
        self.pending_attachment.as_ref()
    }

    /// Whether a turn is waiting for its reply.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id of the typing placeholder of the outstanding turn.
    pub fn in_flight(&self) -> Option<&EntryId> {
        self.in_flight.as_ref()
    }

    /// Whether `text` together with the pending attachment is worth sending.
    pub fn can_send(&self, text: &str) -> bool {
        !self.is_busy() && (!text.trim().is_empty() || self.pending_attachment.is_some())
    }

    /// Record the user's entry and the typing placeholder.
    ///
    /// Returns `None` without touching the conversation when there is
    /// nothing to send or a turn is already outstanding.
    pub fn begin_turn(&mut self, text: &str, file: Option<LoadedAttachment>) -> Option<Turn> {
        if self.is_busy() {
            tracing::warn!("ignoring submit while a reply is pending");
            return None;
        }

        let text = text.trim();
        if text.is_empty() && file.is_none() {
            return None;
        }

        let content = match &file {
            Some(file) if text.is_empty() => format!("Sent a file: {}", file.name),
            _ => text.to_string(),
        };
        let attachment = file.as_ref().map(LoadedAttachment::to_entry_attachment);

        self.store.push(ConversationEntry::user(content, attachment));
        let placeholder = self.store.push(ConversationEntry::typing());
        self.in_flight = Some(placeholder.clone());

        Some(Turn {
            placeholder,
            message: OutboundMessage {
                text: text.to_string(),
                file,
            },
        })
    }

    /// Replace the placeholder with the reply or the error message.
    ///
    /// Clears the pending attachment and the busy flag whatever the outcome.
    /// Returns `None` and changes nothing when `placeholder` is not the
    /// outstanding turn, so a stale or repeated completion adds no reply.
    pub fn complete_turn(
        &mut self,
        placeholder: &EntryId,
        result: Result<String, WebhookError>,
    ) -> Option<&ConversationEntry> {
        if self.in_flight.as_ref() != Some(placeholder) {
            tracing::debug!(%placeholder, "dropping reply for a turn that is not outstanding");
            return None;
        }
        self.in_flight = None;
        self.store.remove(placeholder);
        self.pending_attachment = None;

        let reply = match result {
            Ok(body) => normalize(&body),
            Err(e) => {
                tracing::warn!(error = %e, "webhook call failed");
                self.error_reply.clone()
            }
        };

        Some(self.store.append(ConversationEntry::bot(reply)))
    }

    /// Run a full turn: load the attachment, record, send, and record the reply.
    pub async fn submit<W>(&mut self, webhook: &W, text: &str) -> Result<(), SessionError>
    where
        W: Webhook + ?Sized,
    {
        if !self.can_send(text) {
            return Ok(());
        }

        let file = match self.pending_attachment.take() {
            Some(file_ref) => Some(LoadedAttachment::read(&file_ref).await?),
            None => None,
        };

        let Some(turn) = self.begin_turn(text, file) else {
            return Ok(());
        };

        let result = webhook.send(&turn.message).await;
        self.complete_turn(&turn.placeholder, result);
        Ok(())
    }
}

/// Errors that can occur while submitting a message.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The selected file could not be read.
    #[error("Could not read attachment: {0}")]
    Attachment(#[from] AttachmentError),
}
