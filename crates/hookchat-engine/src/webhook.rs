//! Webhook transport.
//!
//! A chat turn is one multipart POST: a `message` text field and, when a
//! file is attached, a `file` part carrying the original bytes. The reply
//! body is returned as text for the normalizer to interpret.

use crate::attachment::LoadedAttachment;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use url::Url;

/// The payload of a single chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Trimmed message text (may be empty when only a file is sent).
    pub text: String,
    /// Attached file, sent as-is.
    pub file: Option<LoadedAttachment>,
}

/// Something that can deliver a chat turn and return the raw reply body.
#[async_trait]
pub trait Webhook: Send + Sync {
    /// Send one message and return the reply body.
    async fn send(&self, message: &OutboundMessage) -> Result<String, WebhookError>;
}

/// HTTP webhook client.
#[derive(Debug, Clone)]
pub struct HttpWebhook {
    client: reqwest::Client,
    url: Option<Url>,
}

impl HttpWebhook {
    /// Create a client for the given endpoint.
    ///
    /// A missing endpoint is accepted here and reported on each send.
    pub fn new(url: Option<Url>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// The configured endpoint.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    fn build_form(message: &OutboundMessage) -> Result<Form, WebhookError> {
        let mut form = Form::new().text("message", message.text.clone());
        if let Some(file) = &message.file {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.mime_type)
                .map_err(WebhookError::Request)?;
            form = form.part("file", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl Webhook for HttpWebhook {
    async fn send(&self, message: &OutboundMessage) -> Result<String, WebhookError> {
        let Some(url) = &self.url else {
            tracing::error!("webhook URL is not configured");
            return Err(WebhookError::NotConfigured);
        };

        let form = Self::build_form(message)?;
        tracing::info!(
            url = %url,
            has_file = message.file.is_some(),
            "sending message to webhook"
        );

        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(WebhookError::Request)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "webhook returned an error status");
            return Err(WebhookError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(WebhookError::Request)?;
        tracing::debug!(bytes = body.len(), "received webhook reply");
        Ok(body)
    }
}

/// Errors that can occur when calling the webhook.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// No endpoint configured.
    #[error("Webhook URL is not configured")]
    NotConfigured,

    /// Transport or encoding failure.
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Webhook returned HTTP {0}")]
    Status(u16),

    /// The request was abandoned before a reply arrived.
    #[error("Request was interrupted: {0}")]
    Interrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_webhook_errors() {
        let webhook = HttpWebhook::new(None);
        let message = OutboundMessage {
            text: "Hello".into(),
            file: None,
        };
        let err = webhook.send(&message).await.unwrap_err();
        assert!(matches!(err, WebhookError::NotConfigured));
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let message = OutboundMessage {
            text: String::new(),
            file: Some(LoadedAttachment {
                name: "x.bin".into(),
                mime_type: "not a mime".into(),
                bytes: vec![1, 2, 3],
            }),
        };
        assert!(HttpWebhook::build_form(&message).is_err());
    }
}
