//! Conversation view widget.
//!
//! Draws the message list bottom-anchored: the newest entry sits on the
//! last row unless the user has scrolled up.

use chrono::Local;
use hookchat_engine::{ConversationEntry, EntryId, MessageStore, Sender};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::ui::{spinner, Styles, Symbols};

/// Indent of message bodies under their author line.
const BODY_INDENT: &str = "  ";

/// Scrollable list of conversation entries.
///
/// ```text
/// You · 14:02
///   Hello
///   [file] notes.txt
///
/// Bot · 14:02
///   | Typing
/// ```
pub struct ConversationView<'a> {
    store: &'a MessageStore,
    pending: Option<&'a EntryId>,
    tick: usize,
    scroll: usize,
}

impl<'a> ConversationView<'a> {
    /// Create a view over the store.
    pub fn new(store: &'a MessageStore) -> Self {
        Self {
            store,
            pending: None,
            tick: 0,
            scroll: 0,
        }
    }

    /// Entry to draw as the typing indicator.
    #[must_use]
    pub fn pending(mut self, placeholder: Option<&'a EntryId>) -> Self {
        self.pending = placeholder;
        self
    }

    /// Animation tick for the typing spinner.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Lines scrolled up from the bottom.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// How far the view can scroll up within `area`.
    pub fn max_scroll(&self, area: Rect) -> usize {
        self.lines(area.width as usize)
            .len()
            .saturating_sub(area.height as usize)
    }

    fn entry_lines(&self, entry: &ConversationEntry, width: usize) -> Vec<Line<'static>> {
        let (author, author_style) = match entry.sender {
            Sender::User => ("You", Styles::user_author()),
            Sender::Bot => ("Bot", Styles::bot_author()),
        };
        let time = entry.timestamp.with_timezone(&Local).format("%H:%M");

        let mut lines = vec![Line::from(vec![
            Span::styled(author, author_style),
            Span::styled(format!(" · {time}"), Styles::dim()),
        ])];

        if self.pending == Some(&entry.id) {
            lines.push(Line::from(vec![
                Span::raw(BODY_INDENT),
                Span::styled(spinner(self.tick), Styles::active()),
                Span::styled(" Typing", Styles::dim()),
            ]));
            return lines;
        }

        let body_width = width.saturating_sub(BODY_INDENT.len()).max(1);
        for row in textwrap::wrap(&entry.content, body_width) {
            lines.push(Line::from(vec![
                Span::raw(BODY_INDENT),
                Span::styled(row.into_owned(), Styles::default()),
            ]));
        }

        if let Some(attachment) = &entry.attachment {
            let symbol = if attachment.is_image() {
                Symbols::IMAGE
            } else {
                Symbols::FILE
            };
            lines.push(Line::from(vec![
                Span::raw(BODY_INDENT),
                Span::styled(format!("{symbol} {}", attachment.name), Styles::attachment()),
                Span::styled(format!(" ({})", attachment.mime_type), Styles::dim()),
            ]));
        }

        lines
    }

    /// All rendered lines for the given width, oldest first.
    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, entry) in self.store.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.extend(self.entry_lines(entry, width));
        }
        lines
    }
}

impl Widget for ConversationView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let lines = self.lines(area.width as usize);
        let height = area.height as usize;
        let max_scroll = lines.len().saturating_sub(height);
        let end = lines.len() - self.scroll.min(max_scroll);
        let start = end.saturating_sub(height);

        let visible: Vec<Line<'static>> = lines[start..end].to_vec();
        // Short conversations hug the bottom edge
        let top = area.y + area.height - u16::try_from(visible.len()).unwrap_or(area.height);
        let target = Rect::new(area.x, top, area.width, area.y + area.height - top);

        Paragraph::new(visible)
            .style(Styles::default())
            .render(target, buf);
    }
}
