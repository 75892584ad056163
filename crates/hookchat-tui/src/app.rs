//! Application state and update logic for the hookchat TUI.

use crate::event::Action;
use crate::ui::widgets::TextInputState;
use hookchat_engine::{
    AuthGate, ChatSession, Config, EntryId, FileRef, LoadedAttachment, Turn, WebhookError,
};
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Ticks a notification stays on screen (about three seconds).
const NOTIFICATION_TTL: usize = 12;

/// Lines scrolled per page key or wheel step.
const SCROLL_STEP: usize = 3;

/// Shown under the login form after a rejected attempt.
pub const INVALID_LOGIN: &str = "Invalid username or password";

/// The screen being displayed. Derived from the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Chat,
}

/// Which login field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// State of the login form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: TextInputState,
    pub password: TextInputState,
    pub focus: LoginField,
    /// Message from the last rejected attempt.
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: TextInputState::new(),
            password: TextInputState::masked(),
            focus: LoginField::Username,
            error: None,
        }
    }
}

impl LoginForm {
    /// The input that receives typed characters.
    pub fn focused_input(&mut self) -> &mut TextInputState {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Move focus to the other field.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// What the chat input line is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Composing a message.
    #[default]
    Message,
    /// Typing the path of a file to attach.
    AttachPath,
}

/// State of the conversation screen. Exists only while signed in.
#[derive(Debug)]
pub struct ChatState {
    pub session: ChatSession,
    pub input: TextInputState,
    pub attach_input: TextInputState,
    pub mode: InputMode,
    /// Lines scrolled up from the newest message.
    pub scroll: usize,
    /// Furthest `scroll` can go, as of the last draw.
    pub scroll_limit: Cell<usize>,
}

impl ChatState {
    fn new(config: &Config) -> Self {
        Self {
            session: ChatSession::new(config.greeting(), config.error_reply.clone()),
            input: TextInputState::new(),
            attach_input: TextInputState::new(),
            mode: InputMode::Message,
            scroll: 0,
            scroll_limit: Cell::new(0),
        }
    }

    /// The input that receives typed characters.
    pub fn active_input(&mut self) -> &mut TextInputState {
        match self.mode {
            InputMode::Message => &mut self.input,
            InputMode::AttachPath => &mut self.attach_input,
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Resolved configuration.
    pub config: Config,

    /// Sign-in gate.
    pub auth: AuthGate,

    /// Login form state.
    pub login: LoginForm,

    /// Conversation state, present while signed in.
    pub chat: Option<ChatState>,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Tick counter for animations.
    pub tick: usize,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: Config) -> Self {
        let auth = AuthGate::new(config.credentials());
        Self {
            should_quit: false,
            show_help: false,
            config,
            auth,
            login: LoginForm::default(),
            chat: None,
            notification: None,
            notification_ttl: 0,
            tick: 0,
        }
    }

    /// The screen to draw.
    pub fn screen(&self) -> Screen {
        if self.auth.is_active() && self.chat.is_some() {
            Screen::Chat
        } else {
            Screen::Login
        }
    }

    /// Whether a reply is pending.
    pub fn is_busy(&self) -> bool {
        self.chat.as_ref().is_some_and(|c| c.session.is_busy())
    }

    /// Whether a webhook endpoint is configured.
    pub fn webhook_configured(&self) -> bool {
        self.config.webhook_url.is_some()
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match self.screen() {
            Screen::Login => self.handle_login_action(action),
            Screen::Chat => self.handle_chat_action(action),
        }
    }

    fn handle_login_action(&mut self, action: Action) {
        match action {
            Action::NextField | Action::PrevField => self.login.toggle_focus(),
            Action::Select => {
                if self.login.focus == LoginField::Username && self.login.password.is_empty() {
                    self.login.focus = LoginField::Password;
                } else {
                    self.submit_login();
                }
            }
            Action::Back => self.login = LoginForm::default(),
            _ => {}
        }
    }

    fn handle_chat_action(&mut self, action: Action) {
        match action {
            Action::Logout => self.logout(),
            Action::Attach => self.open_attach_prompt(),
            Action::ClearAttachment => self.clear_attachment(),
            Action::ScrollUp => self.scroll_up(),
            Action::ScrollDown => self.scroll_down(),
            Action::Back => self.close_attach_prompt(),
            Action::Select => self.confirm_attach_prompt(),
            _ => {}
        }
    }

    /// Check the login form against the gate.
    pub fn submit_login(&mut self) {
        let username = self.login.username.content().to_string();
        let password = self.login.password.take();

        if self.auth.authenticate(&username, &password) {
            self.chat = Some(ChatState::new(&self.config));
            self.login = LoginForm::default();
        } else {
            self.login.error = Some(INVALID_LOGIN.to_string());
            self.login.focus = LoginField::Password;
        }
    }

    /// End the session and discard the conversation.
    pub fn logout(&mut self) {
        self.auth.end_session();
        self.chat = None;
        self.login = LoginForm::default();
        self.set_notification("Signed out".to_string());
    }

    fn open_attach_prompt(&mut self) {
        if self.is_busy() {
            return;
        }
        if let Some(chat) = &mut self.chat {
            chat.attach_input.clear();
            chat.mode = InputMode::AttachPath;
        }
    }

    fn close_attach_prompt(&mut self) {
        if let Some(chat) = &mut self.chat {
            chat.attach_input.clear();
            chat.mode = InputMode::Message;
        }
    }

    fn confirm_attach_prompt(&mut self) {
        let Some(chat) = &mut self.chat else {
            return;
        };
        if chat.mode != InputMode::AttachPath {
            return;
        }
        let raw = chat.attach_input.take();
        chat.mode = InputMode::Message;
        self.attach_path(&raw);
    }

    fn clear_attachment(&mut self) {
        if self.is_busy() {
            return;
        }
        let Some(chat) = &mut self.chat else {
            return;
        };
        if chat.session.pending_attachment().is_none() {
            return;
        }
        chat.session.clear_attachment();
        self.set_notification("Attachment removed".to_string());
    }

    /// Select the file at `raw` for the next message.
    ///
    /// Accepts the forms terminals use for dropped files: quoted paths and
    /// `file://` URLs. Returns whether a file was attached.
    pub fn attach_path(&mut self, raw: &str) -> bool {
        if self.is_busy() || self.chat.is_none() {
            return false;
        }
        let Some(path) = clean_path(raw) else {
            return false;
        };

        let file = match FileRef::from_path(&path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "attach rejected");
                self.set_notification(format!("Cannot attach {}: {e}", path.display()));
                return false;
            }
        };

        if !file.is_allowed() {
            self.set_notification(format!("Unsupported file type: {}", file.name));
            return false;
        }

        let message = format!("Attached {}", file.name);
        if let Some(chat) = &mut self.chat {
            chat.session.attach(file);
        }
        self.set_notification(message);
        true
    }

    /// Handle pasted text.
    ///
    /// A pasted path to an existing file is treated as a dropped file;
    /// anything else is typed into the focused input.
    pub fn handle_paste(&mut self, text: &str) {
        match self.screen() {
            Screen::Login => {
                let line = text.lines().next().unwrap_or_default();
                self.login.focused_input().insert_str(line);
            }
            Screen::Chat => {
                let looks_like_file = clean_path(text).is_some_and(|p| p.is_file());
                let message_mode = self
                    .chat
                    .as_ref()
                    .is_some_and(|c| c.mode == InputMode::Message);

                if message_mode && looks_like_file {
                    self.attach_path(text);
                } else if !self.is_busy() {
                    if let Some(chat) = &mut self.chat {
                        let flattened = text.replace(['\r', '\n'], " ");
                        chat.active_input().insert_str(&flattened);
                    }
                }
            }
        }
    }

    /// Record the typed message and return the request to send.
    ///
    /// Returns `None` when there is nothing to send, a reply is pending,
    /// or the attachment could not be read.
    pub async fn start_turn(&mut self) -> Option<Turn> {
        let chat = self.chat.as_mut()?;
        if !chat.session.can_send(chat.input.content()) {
            return None;
        }

        let file = match chat.session.pending_attachment().cloned() {
            Some(file_ref) => match LoadedAttachment::read(&file_ref).await {
                Ok(file) => Some(file),
                Err(e) => {
                    tracing::warn!(name = %file_ref.name, error = %e, "attachment read failed");
                    chat.session.clear_attachment();
                    self.set_notification(format!("Could not read {}: {e}", file_ref.name));
                    return None;
                }
            },
            None => None,
        };

        let text = chat.input.submit();
        chat.scroll = 0;
        chat.session.begin_turn(&text, file)
    }

    /// Deliver the outcome of a webhook call.
    ///
    /// Replies for a conversation that has since been discarded are dropped.
    pub fn complete_turn(&mut self, placeholder: &EntryId, result: Result<String, WebhookError>) {
        let Some(chat) = self.chat.as_mut() else {
            tracing::debug!("dropping reply after sign-out");
            return;
        };
        if chat.session.complete_turn(placeholder, result).is_some() {
            chat.scroll = 0;
        }
    }

    fn scroll_up(&mut self) {
        if let Some(chat) = &mut self.chat {
            chat.scroll = chat
                .scroll
                .saturating_add(SCROLL_STEP)
                .min(chat.scroll_limit.get());
        }
    }

    fn scroll_down(&mut self) {
        if let Some(chat) = &mut self.chat {
            chat.scroll = chat
                .scroll
                .min(chat.scroll_limit.get())
                .saturating_sub(SCROLL_STEP);
        }
    }

    /// Set a temporary notification message.
    fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TTL;
    }

    /// Update on tick.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }
}

/// Turn typed or dropped text into a filesystem path.
fn clean_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
        })
        .unwrap_or(trimmed);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    // Some terminals escape spaces in dropped paths
    let path = path.replace("\\ ", " ");
    (!path.is_empty()).then(|| Path::new(&path).to_path_buf())
}
