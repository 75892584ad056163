//! Conversation pane module.
//!
//! The scrollable message list of the chat screen and the hint text of
//! the input line below it.

mod placeholder;
mod widget;

pub use placeholder::input_placeholder;
pub use widget::ConversationView;
