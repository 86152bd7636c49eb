//! Centralized error types for hipalert using thiserror.
//!
//! One small enum per concern: configuration faults are fatal at startup,
//! filter faults are recovered inside the chain, delivery faults belong to a
//! single notification attempt and never reach the hosting application's own
//! error pipeline.

use thiserror::Error;

/// Errors related to configuration resolution and validation.
///
/// All variants are fatal: a controller is never activated with an invalid
/// configuration, so none of these can occur per-event.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is absent or empty.
    #[error("the required configuration setting '{0}' is missing")]
    MissingSetting(&'static str),
    /// A setting is present but unusable (malformed URL, undefined `${VAR}`).
    #[error("invalid configuration setting '{name}': {message}")]
    InvalidSetting { name: &'static str, message: String },
}

/// Failure reported by a single filter observer.
///
/// The chain recovers from these locally: a failing observer is logged and
/// treated as a non-dismissing vote.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("filter observer failed: {0}")]
    Failed(String),
}

/// Errors related to delivering a payload to the chat API.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The API answered with a non-2xx status. No response body is inspected.
    #[error("chat API returned status {0}")]
    Status(reqwest::StatusCode),
    /// Transport-level fault: timeout, connection refused, DNS failure.
    #[error("request to chat API failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_missing_setting_display() {
        let err = ConfigError::MissingSetting("auth_token");
        assert_eq!(
            err.to_string(),
            "the required configuration setting 'auth_token' is missing"
        );
    }

    #[test]
    fn config_error_invalid_setting_display() {
        let err = ConfigError::InvalidSetting {
            name: "api_base_url",
            message: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration setting 'api_base_url': relative URL without a base"
        );
    }

    #[test]
    fn filter_error_display() {
        let err = FilterError::Failed("lookup table unavailable".to_string());
        assert_eq!(
            err.to_string(),
            "filter observer failed: lookup table unavailable"
        );
    }

    #[test]
    fn delivery_error_status_display() {
        let err = DeliveryError::Status(reqwest::StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "chat API returned status 401 Unauthorized");
    }
}
