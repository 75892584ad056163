//! Conversation entries and the in-memory message store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content of the transient typing placeholder.
pub const TYPING_MARKER: &str = "...";

/// Unique identifier of a conversation entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The signed-in user.
    User,
    /// The webhook bot.
    Bot,
}

/// A file attached to an entry, in directly renderable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Inline `data:` URL of the file content.
    pub url: String,
    /// Original file name.
    pub name: String,
    /// MIME type of the file.
    pub mime_type: String,
}

impl Attachment {
    /// Whether the attachment should be shown as an image.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Unique id within the session.
    pub id: EntryId,
    /// Message text.
    pub content: String,
    /// Who sent it.
    pub sender: Sender,
    /// When the entry was created.
    pub timestamp: DateTime<Utc>,
    /// Optional attached file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl ConversationEntry {
    /// Create a user entry.
    pub fn user(content: impl Into<String>, attachment: Option<Attachment>) -> Self {
        Self {
            id: EntryId::new(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            attachment,
        }
    }

    /// Create a bot entry.
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            attachment: None,
        }
    }

    /// Create the typing placeholder shown while a reply is pending.
    pub fn typing() -> Self {
        Self::bot(TYPING_MARKER)
    }

    /// Whether this entry was sent by the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Ordered, append-only list of conversation entries.
///
/// The only removal is by id, used to drop the typing placeholder.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    entries: Vec<ConversationEntry>,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its id.
    pub fn push(&mut self, entry: ConversationEntry) -> EntryId {
        let id = entry.id.clone();
        self.entries.push(entry);
        id
    }

    /// Append an entry and return a reference to it.
    pub fn append(&mut self, entry: ConversationEntry) -> &ConversationEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Remove the entry with the given id.
    pub fn remove(&mut self, id: &EntryId) -> Option<ConversationEntry> {
        let index = self.entries.iter().position(|e| &e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &EntryId) -> Option<&ConversationEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConversationEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MessageStore {
    type Item = &'a ConversationEntry;
    type IntoIter = std::slice::Iter<'a, ConversationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
