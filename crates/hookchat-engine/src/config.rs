//! Configuration for hookchat.
//!
//! Settings come from an optional JSON file with environment variables
//! layered on top. Nothing here is required to start: a missing webhook URL
//! surfaces when a message is sent, and missing credentials simply make
//! every sign-in attempt fail.

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Environment variable holding the webhook endpoint.
pub const ENV_WEBHOOK_URL: &str = "HOOKCHAT_WEBHOOK_URL";
/// Environment variable holding the accepted username.
pub const ENV_USERNAME: &str = "HOOKCHAT_USERNAME";
/// Environment variable holding the accepted password.
pub const ENV_PASSWORD: &str = "HOOKCHAT_PASSWORD";
/// Environment variable overriding the greeting.
pub const ENV_GREETING: &str = "HOOKCHAT_GREETING";
/// Environment variable overriding the error reply.
pub const ENV_ERROR_REPLY: &str = "HOOKCHAT_ERROR_REPLY";

/// Main configuration for hookchat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Webhook endpoint receiving chat messages.
    #[serde(default)]
    pub webhook_url: Option<Url>,

    /// Accepted username.
    #[serde(default)]
    pub username: Option<String>,

    /// Accepted password.
    #[serde(default)]
    pub password: Option<String>,

    /// Bot message shown when a conversation starts. Empty disables it.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Bot message shown when the webhook call fails.
    #[serde(default = "default_error_reply")]
    pub error_reply: String,
}

fn default_greeting() -> String {
    "Hello! How can I help you today?".into()
}

fn default_error_reply() -> String {
    "Sorry, something went wrong while contacting the service. Please try again.".into()
}

/// The static credential pair a user must present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Expected identity.
    pub username: String,
    /// Expected secret.
    pub password: String,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        if let Some(url) = &config.webhook_url {
            parse_webhook_url(url.as_str())?;
        }
        Ok(config)
    }

    /// Resolve configuration from an optional file and the process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (usually the environment).
    ///
    /// Empty values are treated as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get(ENV_WEBHOOK_URL) {
            self.webhook_url = Some(parse_webhook_url(&raw)?);
        }
        if let Some(username) = get(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(greeting) = lookup(ENV_GREETING) {
            self.greeting = greeting;
        }
        if let Some(error_reply) = get(ENV_ERROR_REPLY) {
            self.error_reply = error_reply;
        }
        Ok(self)
    }

    /// The configured credential pair, if both halves are present.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// The greeting, or `None` when disabled.
    pub fn greeting(&self) -> Option<&str> {
        let greeting = self.greeting.trim();
        (!greeting.is_empty()).then_some(self.greeting.as_str())
    }

    /// A copy safe for display, with the password masked.
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            username: None,
            password: None,
            greeting: default_greeting(),
            error_reply: default_error_reply(),
        }
    }
}

/// Parse and validate a webhook URL.
pub fn parse_webhook_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Webhook URL is malformed.
    #[error("Invalid webhook URL `{url}`: {reason}")]
    InvalidUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.webhook_url.is_none());
        assert!(config.credentials().is_none());
        assert!(config.greeting().is_some());
        assert!(!config.error_reply.is_empty());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .with_overrides(lookup(&[
                (ENV_WEBHOOK_URL, "https://hooks.example.com/chat"),
                (ENV_USERNAME, "admin"),
                (ENV_PASSWORD, "secret123"),
            ]))
            .unwrap();

        assert_eq!(
            config.webhook_url.as_ref().map(Url::as_str),
            Some("https://hooks.example.com/chat")
        );
        let creds = config.credentials().unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "secret123");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = Config::default()
            .with_overrides(lookup(&[(ENV_WEBHOOK_URL, ""), (ENV_USERNAME, "  ")]))
            .unwrap();
        assert!(config.webhook_url.is_none());
        assert!(config.username.is_none());
    }

    #[test]
    fn test_empty_greeting_disables_it() {
        let config = Config::default()
            .with_overrides(lookup(&[(ENV_GREETING, "")]))
            .unwrap();
        assert!(config.greeting().is_none());
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Config::default()
            .with_overrides(lookup(&[(ENV_WEBHOOK_URL, "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        assert!(parse_webhook_url("ftp://example.com/hook").is_err());
        assert!(parse_webhook_url("http://localhost:5678/webhook/chat").is_ok());
    }

    #[test]
    fn test_load_file_with_env_on_top() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hookchat.json");
        std::fs::write(
            &path,
            r#"{"webhook_url":"https://a.example.com/","username":"file-user","password":"p"}"#,
        )
        .unwrap();

        let config = Config::load(&path)
            .unwrap()
            .with_overrides(lookup(&[(ENV_USERNAME, "env-user")]))
            .unwrap();
        assert_eq!(config.username.as_deref(), Some("env-user"));
        assert_eq!(config.password.as_deref(), Some("p"));
        assert_eq!(config.greeting, default_greeting());
    }

    #[test]
    fn test_load_rejects_non_http_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hookchat.json");
        std::fs::write(&path, r#"{"webhook_url":"ftp://files.example.com/hook"}"#).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_redacted_masks_password() {
        let config = Config {
            password: Some("secret123".into()),
            ..Config::default()
        };
        let json = serde_json::to_string(&config.redacted()).unwrap();
        assert!(!json.contains("secret123"));
    }
}
