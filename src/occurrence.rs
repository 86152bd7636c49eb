//! Exception occurrence record.
//!
//! One `ExceptionOccurrence` is created per error event reported by the
//! hosting application, flows through the filter chain and the formatter,
//! and is dropped once dispatch completes. It is never mutated after
//! construction and never persisted.

use chrono::{DateTime, Utc};

/// A single reported exception, with the request context the host captured
/// alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionOccurrence {
    /// Fully qualified exception type name (e.g. "System.NullReferenceException").
    pub exception_type: String,
    /// Exception message text, used verbatim in the notification.
    pub message: String,
    /// URL of the request that triggered the exception, when the host ran
    /// one. None for non-HTTP invocations.
    pub request_url: Option<String>,
    /// Moment the error event was received.
    pub timestamp: DateTime<Utc>,
}

impl ExceptionOccurrence {
    /// Create an occurrence for an error event received now.
    pub fn new(exception_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            exception_type: exception_type.into(),
            message: message.into(),
            request_url: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the URL of the request that was in flight when the exception
    /// was raised.
    pub fn with_request_url(mut self, url: impl Into<String>) -> Self {
        self.request_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_occurrence_has_no_request_url() {
        let occ = ExceptionOccurrence::new("System.InvalidOperationException", "boom");
        assert_eq!(occ.exception_type, "System.InvalidOperationException");
        assert_eq!(occ.message, "boom");
        assert_eq!(occ.request_url, None);
    }

    #[test]
    fn with_request_url_sets_url() {
        let occ = ExceptionOccurrence::new("System.Exception", "oops")
            .with_request_url("http://example.com/orders/42");
        assert_eq!(
            occ.request_url.as_deref(),
            Some("http://example.com/orders/42")
        );
    }

    #[test]
    fn timestamp_is_close_to_now() {
        let before = Utc::now();
        let occ = ExceptionOccurrence::new("System.Exception", "x");
        let after = Utc::now();
        assert!(occ.timestamp >= before && occ.timestamp <= after);
    }
}
