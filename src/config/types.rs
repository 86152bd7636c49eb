//! Notification configuration types and validation.

use super::env::resolve_env_vars;
use super::secret::SecretString;
use crate::error::ConfigError;
use crate::message::MessageFormat;
use serde::Deserialize;
use std::time::Duration;

/// Default HipChat API base URL (cloud instance).
pub const DEFAULT_API_BASE_URL: &str = "https://api.hipchat.com";

/// Environment variable consulted by [`NotificationConfig::from_env`] for the
/// auth token.
pub const ENV_AUTH_TOKEN: &str = "HIPCHAT_AUTH_TOKEN";

/// Environment variable consulted by [`NotificationConfig::from_env`] for the
/// room id.
pub const ENV_ROOM_ID: &str = "HIPCHAT_ROOM_ID";

/// Whether payload transmission blocks the caller or is deferred to a
/// background task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// The caller awaits the HTTP call; failures are visible in the outcome.
    #[default]
    Sync,
    /// Fire-and-forget: the send runs on a spawned task, failures are only
    /// logged.
    Async,
}

/// Immutable configuration for the notification pipeline.
///
/// Owned by the controller for its lifetime; read-only after construction.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// HipChat room notification token. Required. May reference an
    /// environment variable as `${VAR}`.
    pub auth_token: SecretString,
    /// Target room id or name. Required. May reference `${VAR}`.
    pub room_id: String,
    /// Whether the chat message should trigger a user notification
    /// (HipChat `notify` flag).
    #[serde(default)]
    pub notify: bool,
    /// Sync (default) or fire-and-forget delivery.
    #[serde(default)]
    pub delivery_mode: DeliveryMode,
    /// Rendering of the message body (default html).
    #[serde(default)]
    pub message_format: MessageFormat,
    /// API base URL, overridable for self-hosted HipChat servers.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Timeout applied to the outbound HTTP call.
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

impl NotificationConfig {
    /// Create a configuration with the given credentials and defaults for
    /// everything else (`notify: false`, sync delivery, cloud API).
    pub fn new(auth_token: impl Into<SecretString>, room_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            room_id: room_id.into(),
            notify: false,
            delivery_mode: DeliveryMode::Sync,
            message_format: MessageFormat::Html,
            api_base_url: default_api_base_url(),
            request_timeout: default_request_timeout(),
        }
    }

    /// Build a configuration from `HIPCHAT_AUTH_TOKEN` and `HIPCHAT_ROOM_ID`.
    ///
    /// Fails with a missing-setting error when either variable is undefined,
    /// matching the fail-closed startup contract.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_token =
            std::env::var(ENV_AUTH_TOKEN).map_err(|_| ConfigError::MissingSetting("auth_token"))?;
        let room_id =
            std::env::var(ENV_ROOM_ID).map_err(|_| ConfigError::MissingSetting("room_id"))?;
        let config = Self::new(auth_token, room_id);
        config.validate()?;
        Ok(config)
    }

    /// Resolve `${VAR}` references in `auth_token` and `room_id` and validate
    /// the result.
    ///
    /// Called once by the controller before activation. Returns the resolved
    /// configuration, or the first configuration error encountered.
    pub fn resolve(mut self) -> Result<Self, ConfigError> {
        self.auth_token =
            SecretString::new(resolve_env_vars("auth_token", self.auth_token.expose())?);
        self.room_id = resolve_env_vars("room_id", &self.room_id)?;
        self.validate()?;
        Ok(self)
    }

    /// Fail-closed validation of required settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_token.is_empty() {
            return Err(ConfigError::MissingSetting("auth_token"));
        }
        if self.room_id.is_empty() {
            return Err(ConfigError::MissingSetting("room_id"));
        }
        Ok(())
    }
}
