//! Login screen - shown until the user signs in.

use crate::app::{App, LoginField};
use crate::screens::Screen;
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar, TextInputState};
use crate::ui::{centered_fixed, main_layout};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const CARD_WIDTH: u16 = 50;
const CARD_HEIGHT: u16 = 13;

/// The login screen.
pub struct LoginScreen;

impl Screen for LoginScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        for y in main_area.top()..main_area.bottom() {
            for x in main_area.left()..main_area.right() {
                buf[(x, y)].set_style(Styles::default());
            }
        }

        render_login_card(app, centered_fixed(CARD_WIDTH, CARD_HEIGHT, main_area), buf);

        let hints = vec![
            KeyHint::new("Tab", "Next field"),
            KeyHint::new("Enter", "Sign in"),
            KeyHint::new("F1", "Help"),
            KeyHint::new("Ctrl+C", "Quit"),
        ];
        let mut status_bar = StatusBar::new("Sign in").hints(hints);
        if let Some(notification) = &app.notification {
            status_bar = status_bar.right(notification);
        } else if app.config.credentials().is_none() {
            status_bar = status_bar.right_warning("No credentials configured");
        }
        status_bar.render(status_area, buf);
    }
}

fn render_login_card(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" hookchat ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height < CARD_HEIGHT - 2 {
        return;
    }

    let row = |offset: u16, height: u16| Rect::new(inner.x, inner.y + offset, inner.width, height);

    Paragraph::new(vec![
        Line::from(Span::styled("Welcome Back", Styles::highlight())),
        Line::from(Span::styled("Sign in to continue", Styles::dim())),
    ])
    .alignment(Alignment::Center)
    .render(row(0, 2), buf);

    let form = &app.login;
    render_field(
        " Username ",
        &form.username,
        form.focus == LoginField::Username,
        row(3, 3),
        buf,
    );
    render_field(
        " Password ",
        &form.password,
        form.focus == LoginField::Password,
        row(6, 3),
        buf,
    );

    if let Some(error) = &form.error {
        Paragraph::new(Span::styled(error.as_str(), Styles::error()))
            .alignment(Alignment::Center)
            .render(row(9, 1), buf);
    }

    Paragraph::new(Span::styled("Press Enter to sign in", Styles::dim()))
        .alignment(Alignment::Center)
        .render(row(10, 1), buf);
}

fn render_field(title: &str, state: &TextInputState, focused: bool, area: Rect, buf: &mut Buffer) {
    let border_style = if focused {
        Styles::border_active()
    } else {
        Styles::border()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    state
        .widget()
        .prompt("")
        .focused(focused)
        .block(block)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, render_screen_to_string};

    #[test]
    fn test_login_screen_shows_form() {
        let app = create_test_app();
        let out = render_screen_to_string(&LoginScreen, &app);
        assert!(out.contains("Welcome Back"));
        assert!(out.contains("Username"));
        assert!(out.contains("Password"));
        assert!(out.contains("Sign in"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut app = create_test_app();
        app.login.username.insert_str("admin");
        app.login.password.insert_str("hunter2");

        let out = render_screen_to_string(&LoginScreen, &app);
        assert!(out.contains("admin"));
        assert!(out.contains("*******"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_rejected_login_shows_error() {
        let mut app = create_test_app();
        app.login.username.insert_str("admin");
        app.login.password.insert_str("wrongpass");
        app.submit_login();

        let out = render_screen_to_string(&LoginScreen, &app);
        assert!(out.contains("Invalid username or password"));
    }

    #[test]
    fn test_missing_credentials_warning() {
        let app = App::new(hookchat_engine::Config::default());
        let out = render_screen_to_string(&LoginScreen, &app);
        assert!(out.contains("No credentials configured"));
    }
}
