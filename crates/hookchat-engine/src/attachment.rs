//! File attachments: selection, loading, and inline encoding.

use crate::conversation::Attachment;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};

/// MIME type used when the extension is unknown.
const DEFAULT_MIME: &str = "application/octet-stream";

/// Extensions accepted by the file picker in addition to images.
const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// Reference to a user-selected file that has not been read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Location on disk.
    pub path: PathBuf,
    /// File name shown to the user and sent to the webhook.
    pub name: String,
    /// MIME type inferred from the extension.
    pub mime_type: String,
}

impl FileRef {
    /// Reference an existing regular file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile(path.to_path_buf()));
        }
        Ok(Self::new(path))
    }

    /// Build a reference without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
        let mime_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or(DEFAULT_MIME)
            .to_string();
        Self {
            path,
            name,
            mime_type,
        }
    }

    /// Whether this file passes the picker's advisory allow-list.
    ///
    /// Images of any type plus PDF, Word and plain-text documents.
    pub fn is_allowed(&self) -> bool {
        if self.mime_type.starts_with("image/") {
            return true;
        }
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ALLOWED_EXTENSIONS
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// A file read into memory, ready to be sent and displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedAttachment {
    /// File name.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl LoadedAttachment {
    /// Read the referenced file.
    pub async fn read(file: &FileRef) -> Result<Self, AttachmentError> {
        let bytes = tokio::fs::read(&file.path).await?;
        tracing::debug!(name = %file.name, size = bytes.len(), "loaded attachment");
        Ok(Self {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            bytes,
        })
    }

    /// Encode the content as a `data:` URL.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64_STANDARD.encode(&self.bytes)
        )
    }

    /// The renderable form recorded on the user's entry.
    pub fn to_entry_attachment(&self) -> Attachment {
        Attachment {
            url: self.data_url(),
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Errors that can occur when selecting or reading an attachment.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path is not a regular file.
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
}
