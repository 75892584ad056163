//! Test utilities for hookchat-tui rendering and navigation tests.
//!
//! Helpers for building apps in a known state, rendering screens to a
//! buffer, and turning buffers into strings for assertions.

use crate::app::App;
use crate::screens::Screen as ScreenTrait;
use hookchat_engine::Config;
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Username accepted by [`test_config`].
pub const TEST_USERNAME: &str = "admin";

/// Password accepted by [`test_config`].
pub const TEST_PASSWORD: &str = "secret123";

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Configuration with known credentials and no webhook.
pub fn test_config() -> Config {
    Config {
        username: Some(TEST_USERNAME.to_string()),
        password: Some(TEST_PASSWORD.to_string()),
        ..Config::default()
    }
}

/// Create an app on the login screen.
pub fn create_test_app() -> App {
    App::new(test_config())
}

/// Create an app that has already signed in.
pub fn create_signed_in_app() -> App {
    let mut app = create_test_app();
    app.login.username.insert_str(TEST_USERNAME);
    app.login.password.insert_str(TEST_PASSWORD);
    app.submit_login();
    assert!(app.chat.is_some(), "test credentials should be accepted");
    app
}

/// Convert a buffer to a string, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: ScreenTrait>(screen: &S, app: &App) -> String {
    render_screen_to_string_sized(screen, app, TEST_WIDTH, TEST_HEIGHT)
}

/// Render a screen with custom dimensions and return it as a string.
pub fn render_screen_to_string_sized<S: ScreenTrait>(
    screen: &S,
    app: &App,
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
