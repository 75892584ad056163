//! Chat screen - the conversation with the webhook.

use crate::app::{App, ChatState, InputMode};
use crate::conversation::{input_placeholder, ConversationView};
use crate::screens::Screen;
use crate::ui::chat_layout;
use crate::ui::theme::{Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Height of the bordered input box.
const INPUT_HEIGHT: u16 = 3;

/// The chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let Some(chat) = &app.chat else {
            return;
        };
        let (header_area, body_area, status_area) = chat_layout(area);

        render_header(app, header_area, buf);
        render_body(app, chat, body_area, buf);
        render_status(app, chat, status_area, buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![Span::styled(" Webhook Assistant", Styles::title())];
    if let Some(identity) = app.auth.identity() {
        spans.push(Span::styled(format!("  signed in as {identity}"), Styles::dim()));
    }
    if !app.webhook_configured() {
        spans.push(Span::styled("  webhook URL not configured", Styles::warning()));
    }
    Paragraph::new(Line::from(spans))
        .style(Styles::default())
        .render(area, buf);
}

fn render_body(app: &App, chat: &ChatState, area: Rect, buf: &mut Buffer) {
    let pending = chat.session.pending_attachment();
    let chip_height = u16::from(pending.is_some());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(chip_height),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(area);

    let view = ConversationView::new(chat.session.store())
        .pending(chat.session.in_flight())
        .tick(app.tick)
        .scroll(chat.scroll);
    chat.scroll_limit.set(view.max_scroll(chunks[0]));
    view.render(chunks[0], buf);

    if let Some(file) = pending {
        let chip = Line::from(vec![
            Span::styled(format!(" {} ", Symbols::ATTACH), Styles::active()),
            Span::styled(file.name.clone(), Styles::attachment()),
            Span::styled(format!(" ({})", file.mime_type), Styles::dim()),
            Span::styled("  Ctrl+X to remove", Styles::dim()),
        ]);
        Paragraph::new(chip)
            .style(Styles::default())
            .render(chunks[1], buf);
    }

    render_input(chat, app.is_busy(), chunks[2], buf);
}

fn render_input(chat: &ChatState, busy: bool, area: Rect, buf: &mut Buffer) {
    let (title, state) = match chat.mode {
        InputMode::Message => (" Message ", &chat.input),
        InputMode::AttachPath => (" Attach file ", &chat.attach_input),
    };
    let border_style = if busy {
        Styles::border()
    } else {
        Styles::border_active()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Styles::default());

    let placeholder = input_placeholder(
        chat.mode,
        busy,
        chat.session.pending_attachment().is_some(),
    );
    state
        .widget()
        .focused(!busy)
        .placeholder(placeholder)
        .block(block)
        .render(area, buf);
}

fn render_status(app: &App, chat: &ChatState, area: Rect, buf: &mut Buffer) {
    let hints = match chat.mode {
        InputMode::Message => vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("Ctrl+O", "Attach"),
            KeyHint::new("Ctrl+L", "Sign out"),
            KeyHint::new("F1", "Help"),
        ],
        InputMode::AttachPath => vec![
            KeyHint::new("Enter", "Attach"),
            KeyHint::new("Esc", "Cancel"),
        ],
    };

    let mut status_bar = StatusBar::new("Chat").hints(hints);
    if let Some(notification) = &app.notification {
        status_bar = status_bar.right(notification);
    } else if app.is_busy() {
        status_bar = status_bar.right("Waiting for reply...");
    }
    status_bar.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_signed_in_app, render_screen_to_string};
    use hookchat_engine::FileRef;

    #[test]
    fn test_chat_screen_shows_greeting_and_identity() {
        let app = create_signed_in_app();
        let out = render_screen_to_string(&ChatScreen, &app);
        assert!(out.contains("Webhook Assistant"));
        assert!(out.contains("signed in as admin"));
        assert!(out.contains("Hello! How can I help you today?"));
        assert!(out.contains("Type a message..."));
    }

    #[test]
    fn test_unconfigured_webhook_is_flagged() {
        let app = create_signed_in_app();
        let out = render_screen_to_string(&ChatScreen, &app);
        assert!(out.contains("webhook URL not configured"));
    }

    #[test]
    fn test_pending_attachment_chip() {
        let mut app = create_signed_in_app();
        app.chat
            .as_mut()
            .unwrap()
            .session
            .attach(FileRef::new("/tmp/report.pdf"));

        let out = render_screen_to_string(&ChatScreen, &app);
        assert!(out.contains("[+] report.pdf (application/pdf)"));
        assert!(out.contains("Ctrl+X to remove"));
    }

    #[test]
    fn test_busy_conversation_shows_typing() {
        let mut app = create_signed_in_app();
        let chat = app.chat.as_mut().unwrap();
        chat.session.begin_turn("Hello", None).unwrap();

        let out = render_screen_to_string(&ChatScreen, &app);
        assert!(out.contains("  Hello"));
        assert!(out.contains("Typing"));
        assert!(out.contains("Waiting for reply..."));
    }

    #[test]
    fn test_attach_prompt_mode() {
        let mut app = create_signed_in_app();
        app.chat.as_mut().unwrap().mode = InputMode::AttachPath;

        let out = render_screen_to_string(&ChatScreen, &app);
        assert!(out.contains("Attach file"));
        assert!(out.contains("Esc"));
        assert!(out.contains("Cancel"));
    }
}
