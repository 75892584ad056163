//! Response normalization for webhook replies.
//!
//! Webhooks answer in several shapes: a near-JSON `{"output":"..."}`
//! envelope that strict parsers reject, well-formed JSON with one of a few
//! known display fields, a bare JSON string, or plain text. [`normalize`]
//! turns any of them into the text shown in the conversation.

use serde_json::Value;

/// Shown when a reply yields nothing displayable.
pub const NORMALIZE_FALLBACK: &str = "Sorry, I couldn't process your request.";

/// Prefix of the near-JSON envelope emitted by some webhooks.
const OUTPUT_ENVELOPE_PREFIX: &str = r#"{"output":""#;

/// Closing of the near-JSON envelope.
const OUTPUT_ENVELOPE_SUFFIX: &str = r#""}"#;

/// Display fields probed on parsed JSON, highest priority first.
const DISPLAY_FIELDS: [&str; 4] = ["output", "response", "message", "result"];

/// Convert a raw response body into a non-empty display string.
pub fn normalize(raw: &str) -> String {
    let display = if let Some(inner) = raw.strip_prefix(OUTPUT_ENVELOPE_PREFIX) {
        tracing::debug!("normalizing output envelope");
        unwrap_envelope(inner)
    } else {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => {
                tracing::debug!("normalizing parsed JSON reply");
                display_from_json(&value).unwrap_or_default()
            }
            Err(_) => {
                tracing::debug!("reply is not JSON, using raw text");
                raw.to_string()
            }
        }
    };

    if display.trim().is_empty() {
        NORMALIZE_FALLBACK.to_string()
    } else {
        display
    }
}

/// Strip the envelope closing and undo the escapes the webhook applied.
fn unwrap_envelope(inner: &str) -> String {
    let trimmed = inner.trim_end();
    let body = trimmed
        .strip_suffix(OUTPUT_ENVELOPE_SUFFIX)
        .unwrap_or(trimmed);
    body.replace("\\\"", "\"").replace("\\n", "\n")
}

/// Pick the display text out of a parsed JSON value.
fn display_from_json(value: &Value) -> Option<String> {
    if let Value::Object(map) = value {
        for field in DISPLAY_FIELDS {
            if let Some(found) = map.get(field).filter(|v| is_truthy(v)) {
                return Some(value_to_display(found));
            }
        }
    }

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a field value counts as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
