//! hookchat-tui: Terminal UI for the hookchat webhook chat client
//!
//! This crate provides the TUI layer for hookchat, including:
//! - Login screen guarded by the engine's sign-in gate
//! - Chat screen with the conversation, attachment chip and input line
//! - File attachment by path prompt or drag-and-drop paste
//! - Help overlay

mod app;
mod conversation;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::{App, InputMode, Screen};
pub use event::{Action, Event, EventHandler};
pub use hookchat_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyCode, KeyEvent, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hookchat_engine::{Config, EntryId, HttpWebhook, Webhook, WebhookError};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            ShowCursor
        );
    }
}

/// A webhook call running in the background.
struct ChatTask {
    placeholder: EntryId,
    handle: JoinHandle<Result<String, WebhookError>>,
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let webhook: Arc<dyn Webhook> = Arc::new(HttpWebhook::new(config.webhook_url.clone()));

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events, &webhook).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    webhook: &Arc<dyn Webhook>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut chat_task: Option<ChatTask> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            match app.screen() {
                Screen::Login => screens::login::LoginScreen.render(app, area, buf),
                Screen::Chat => screens::chat::ChatScreen.render(app, area, buf),
            }

            if app.show_help {
                screens::render_help_overlay(area, buf);
            }
        })?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if !handle_text_key(app, key, webhook, &mut chat_task).await {
                        app.handle_action(event::key_to_action(key));
                    }
                }
                Event::Paste(text) => app.handle_paste(&text),
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::ScrollUp),
                        MouseEventKind::ScrollDown => app.handle_action(Action::ScrollDown),
                        _ => {}
                    }
                }
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        // Check for a completed webhook call
        if chat_task.as_ref().is_some_and(|t| t.handle.is_finished()) {
            if let Some(task) = chat_task.take() {
                let result = match task.handle.await {
                    Ok(result) => result,
                    Err(e) => Err(WebhookError::Interrupted(e.to_string())),
                };
                app.complete_turn(&task.placeholder, result);
            }
        }

        // The conversation was discarded or the app is closing
        if app.chat.is_none() || app.should_quit {
            if let Some(task) = chat_task.take() {
                tracing::debug!("aborting in-flight webhook call");
                task.handle.abort();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key input for the focused text input.
/// Returns true if the key was handled (should not be processed as action).
async fn handle_text_key(
    app: &mut App,
    key: KeyEvent,
    webhook: &Arc<dyn Webhook>,
    chat_task: &mut Option<ChatTask>,
) -> bool {
    // Control chords and the help overlay go to the action handler
    if key.modifiers.contains(KeyModifiers::CONTROL) || app.show_help {
        return false;
    }

    match app.screen() {
        Screen::Login => edit_input(app.login.focused_input(), key),
        Screen::Chat => {
            let busy = app.is_busy();
            let message_mode = app
                .chat
                .as_ref()
                .is_some_and(|c| c.mode == InputMode::Message);

            if message_mode && key.code == KeyCode::Enter {
                if !busy {
                    if let Some(turn) = app.start_turn().await {
                        let webhook = Arc::clone(webhook);
                        let message = turn.message;
                        let handle = tokio::spawn(async move { webhook.send(&message).await });
                        *chat_task = Some(ChatTask {
                            placeholder: turn.placeholder,
                            handle,
                        });
                    }
                }
                return true;
            }

            let Some(chat) = app.chat.as_mut() else {
                return false;
            };

            // Input is disabled while a reply is pending
            if busy {
                return matches!(
                    key.code,
                    KeyCode::Char(_)
                        | KeyCode::Backspace
                        | KeyCode::Delete
                        | KeyCode::Up
                        | KeyCode::Down
                );
            }

            match key.code {
                KeyCode::Up if message_mode => {
                    chat.input.history_prev();
                    true
                }
                KeyCode::Down if message_mode => {
                    chat.input.history_next();
                    true
                }
                _ => edit_input(chat.active_input(), key),
            }
        }
    }
}

/// Apply an editing key to a text input.
fn edit_input(input: &mut ui::widgets::TextInputState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => return false,
    }
    true
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }

    #[test]
    fn test_edit_input_keys() {
        let mut input = ui::widgets::TextInputState::new();
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert!(edit_input(&mut input, press(KeyCode::Char('h'))));
        assert!(edit_input(&mut input, press(KeyCode::Char('i'))));
        assert!(edit_input(&mut input, press(KeyCode::Left)));
        assert!(edit_input(&mut input, press(KeyCode::Backspace)));
        assert_eq!(input.content(), "i");
        assert!(!edit_input(&mut input, press(KeyCode::Enter)));
        assert!(!edit_input(&mut input, press(KeyCode::Tab)));
    }
}
