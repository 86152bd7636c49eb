//! Chat message construction.
//!
//! Pure functions only: no I/O, no shared state. The formatter turns an
//! exception occurrence into the wire-ready [`ChatPayload`]; string escaping
//! for the JSON body is the serializer's job, not the formatter's.

use crate::occurrence::ExceptionOccurrence;
use serde::{Deserialize, Serialize};

/// Alert color of the chat message.
///
/// This pipeline has a single severity level, so every payload is red; the
/// enum exists to keep the wire value typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertColor {
    Red,
}

/// Rendering of the message body. A configuration axis, not a code path:
/// both renderings flow through the same formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// Plain text; the request URL appears verbatim.
    Text,
    /// HTML; the request URL is wrapped in an anchor.
    #[default]
    Html,
}

/// Wire-ready representation of one chat notification, serialized as the
/// HipChat v2 room-notification body:
///
/// ```json
/// {"color":"red","message":"...","notify":false,"message_format":"html"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPayload {
    pub color: AlertColor,
    pub message: String,
    pub notify: bool,
    pub message_format: MessageFormat,
}

/// Build the chat payload for one occurrence.
///
/// The message is a single line combining the exception type, a rendering of
/// the request URL, and the exception message. A missing request URL degrades
/// to the empty string rather than failing the pipeline.
pub fn build_payload(
    occurrence: &ExceptionOccurrence,
    notify: bool,
    format: MessageFormat,
) -> ChatPayload {
    let url_part = match (&occurrence.request_url, format) {
        (Some(url), MessageFormat::Html) => {
            format!("<a href='{url}' target='_blank'>{url}</a>")
        }
        (Some(url), MessageFormat::Text) => url.clone(),
        (None, _) => String::new(),
    };

    ChatPayload {
        color: AlertColor::Red,
        message: format!(
            "{} at {}: {}",
            occurrence.exception_type, url_part, occurrence.message
        ),
        notify,
        message_format: format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence() -> ExceptionOccurrence {
        ExceptionOccurrence::new("System.NullReferenceException", "Object reference not set")
            .with_request_url("http://x/y")
    }

    #[test]
    fn html_message_wraps_url_in_anchor() {
        let payload = build_payload(&occurrence(), true, MessageFormat::Html);

        assert_eq!(
            payload.message,
            "System.NullReferenceException at \
             <a href='http://x/y' target='_blank'>http://x/y</a>: \
             Object reference not set"
        );
        assert!(payload.notify);
        assert_eq!(payload.message_format, MessageFormat::Html);
        assert_eq!(payload.color, AlertColor::Red);
    }

    #[test]
    fn text_message_uses_raw_url() {
        let payload = build_payload(&occurrence(), true, MessageFormat::Text);

        assert_eq!(
            payload.message,
            "System.NullReferenceException at http://x/y: Object reference not set"
        );
        assert!(!payload.message.contains("<a"));
        assert_eq!(payload.message_format, MessageFormat::Text);
    }

    #[test]
    fn missing_url_degrades_to_empty_string() {
        let occ = ExceptionOccurrence::new("System.Exception", "no context");

        for format in [MessageFormat::Html, MessageFormat::Text] {
            let payload = build_payload(&occ, false, format);
            assert_eq!(payload.message, "System.Exception at : no context");
            assert!(!payload.message.contains("<a"));
        }
    }

    #[test]
    fn notify_flag_passes_through() {
        assert!(build_payload(&occurrence(), true, MessageFormat::Html).notify);
        assert!(!build_payload(&occurrence(), false, MessageFormat::Html).notify);
    }

    #[test]
    fn formatter_is_deterministic() {
        let occ = occurrence();
        let first = build_payload(&occ, true, MessageFormat::Html);
        let second = build_payload(&occ, true, MessageFormat::Html);
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_hipchat_field_names() {
        let payload = build_payload(&occurrence(), true, MessageFormat::Html);
        let json = serde_json::to_string(&payload).unwrap();

        assert!(json.contains("\"color\":\"red\""));
        assert!(json.contains("\"notify\":true"));
        assert!(json.contains("\"message_format\":\"html\""));
        assert!(json.contains("\"message\":"));
    }

    #[test]
    fn serializes_text_format_value() {
        let payload = build_payload(&occurrence(), false, MessageFormat::Text);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"message_format\":\"text\""));
        assert!(json.contains("\"notify\":false"));
    }

    #[test]
    fn exception_message_is_used_verbatim() {
        // Escaping is the serializer's responsibility, not the formatter's.
        let occ = ExceptionOccurrence::new("System.Exception", "quote \" and <tag>");
        let payload = build_payload(&occ, false, MessageFormat::Text);
        assert!(payload.message.ends_with("quote \" and <tag>"));

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("quote \\\" and <tag>"));
    }
}
