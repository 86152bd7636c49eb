//! HipChat room-notification dispatcher.
//!
//! Posts payloads to the HipChat v2 API:
//! `POST {base}/v2/room/{room_id}/notification?auth_token={token}`.

use crate::config::NotificationConfig;
use crate::error::{ConfigError, DeliveryError};
use crate::message::ChatPayload;
use async_trait::async_trait;
use url::Url;

use super::Dispatcher;

/// Dispatcher for the HipChat v2 room-notification endpoint.
///
/// The endpoint URL is built once at construction, so a malformed base URL is
/// a startup configuration error rather than a per-event delivery failure.
/// The `reqwest::Client` is shared for connection pooling and is safe for
/// concurrent use.
pub struct HipChatDispatcher {
    room_id: String,
    endpoint: Url,
    client: reqwest::Client,
}

impl HipChatDispatcher {
    /// Create a dispatcher using the given HTTP client.
    ///
    /// The client carries the transport configuration (timeout, pool); hosts
    /// that already own a client can share it here.
    pub fn new(config: &NotificationConfig, client: reqwest::Client) -> Result<Self, ConfigError> {
        let endpoint = build_endpoint(&config.api_base_url, &config.room_id, config.auth_token.expose())?;
        Ok(Self {
            room_id: config.room_id.clone(),
            endpoint,
            client,
        })
    }

    /// Create a dispatcher with its own client, applying the configured
    /// request timeout.
    pub fn from_config(config: &NotificationConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::InvalidSetting {
                name: "request_timeout",
                message: e.to_string(),
            })?;
        Self::new(config, client)
    }
}

/// Build the room-notification endpoint with the auth token as a query
/// parameter. Path and query escaping are the `Url` type's job.
fn build_endpoint(base: &str, room_id: &str, auth_token: &str) -> Result<Url, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidSetting {
        name: "api_base_url",
        message,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["v2", "room", room_id, "notification"]);
    url.query_pairs_mut().append_pair("auth_token", auth_token);
    Ok(url)
}

#[async_trait]
impl Dispatcher for HipChatDispatcher {
    fn name(&self) -> &str {
        "hipchat"
    }

    async fn send(&self, payload: &ChatPayload) -> Result<(), DeliveryError> {
        let result = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    room_id = %self.room_id,
                    error = %e,
                    "Failed to reach chat API"
                );
                metrics::counter!(
                    "hipalert_delivery_errors_total",
                    "room_id" => self.room_id.clone()
                )
                .increment(1);
                return Err(DeliveryError::Transport(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::info!(
                room_id = %self.room_id,
                status = %status,
                "Notification delivered"
            );
            metrics::counter!(
                "hipalert_notifications_sent_total",
                "room_id" => self.room_id.clone()
            )
            .increment(1);
            Ok(())
        } else {
            tracing::error!(
                room_id = %self.room_id,
                status = %status,
                "Chat API rejected notification"
            );
            metrics::counter!(
                "hipalert_delivery_errors_total",
                "room_id" => self.room_id.clone()
            )
            .increment(1);
            Err(DeliveryError::Status(status))
        }
    }
}

// The endpoint embeds the auth token; Debug must not print it.
impl std::fmt::Debug for HipChatDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HipChatDispatcher")
            .field("room_id", &self.room_id)
            .field("endpoint", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_matches_hipchat_v2_shape() {
        let url = build_endpoint("https://api.hipchat.com", "1234", "tok-abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.hipchat.com/v2/room/1234/notification?auth_token=tok-abc"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash_in_base() {
        let url = build_endpoint("https://api.hipchat.com/", "1234", "tok").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.hipchat.com/v2/room/1234/notification?auth_token=tok"
        );
    }

    #[test]
    fn endpoint_escapes_room_and_token() {
        let url = build_endpoint("https://chat.internal.example.com", "ops room", "t&k=n").unwrap();
        let s = url.as_str();
        assert!(s.contains("/v2/room/ops%20room/notification"));
        assert!(s.contains("auth_token=t%26k%3Dn"));
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let err = build_endpoint("not a url", "1234", "tok").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "api_base_url",
                ..
            }
        ));
    }

    #[test]
    fn debug_does_not_leak_the_token() {
        let config = NotificationConfig::new("tok-secret-xyz", "1234");
        let dispatcher = HipChatDispatcher::from_config(&config).unwrap();
        let debug = format!("{:?}", dispatcher);
        assert!(!debug.contains("tok-secret-xyz"));
        assert!(debug.contains("1234"));
    }
}
