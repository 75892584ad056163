//! Placeholder text for the chat input line.

use crate::app::InputMode;

/// Hint shown in the empty input line.
#[must_use]
pub fn input_placeholder(mode: InputMode, busy: bool, has_attachment: bool) -> &'static str {
    if busy {
        return "Waiting for reply...";
    }
    match mode {
        InputMode::AttachPath => "Path to an image, PDF, Word or text file",
        InputMode::Message if has_attachment => "Add a message or press Enter to send the file",
        InputMode::Message => "Type a message...",
    }
}
