//! Notification controller: orchestrates filtering, formatting and dispatch.
//!
//! One controller is constructed at host startup and invoked from the host's
//! error hook, potentially from many request-handling tasks at once. Each
//! occurrence moves through `Pending -> (Dismissed | Formatted ->
//! (Dispatched | Scheduled | DispatchFailed))` independently; there is no
//! shared mutable state between occurrences.

use crate::config::{DeliveryMode, NotificationConfig};
use crate::dispatch::{Dispatcher, HipChatDispatcher};
use crate::error::{ConfigError, DeliveryError};
use crate::filter::{ExceptionFilter, FilterChain};
use crate::message::build_payload;
use crate::occurrence::ExceptionOccurrence;
use std::sync::Arc;
use tracing::Instrument;

/// Terminal state of one notification attempt.
///
/// Dispatch failure is a value here, not an `Err`: the hosting application's
/// own error handling must never be re-entered because of a failure in this
/// subsystem, so there is nothing for a caller to propagate.
#[derive(Debug)]
pub enum NotifyOutcome {
    /// A filter observer vetoed the notification; nothing was sent.
    Dismissed,
    /// Sync delivery completed with a 2xx status.
    Dispatched,
    /// Async delivery was handed off to a background task; its result is
    /// not observable here.
    Scheduled,
    /// Sync delivery failed. Already logged; carried for callers that want
    /// to inspect the failure.
    DispatchFailed(DeliveryError),
}

/// Orchestrates the exception-to-notification pipeline.
pub struct NotificationController {
    config: NotificationConfig,
    chain: FilterChain,
    dispatcher: Arc<dyn Dispatcher>,
}

impl NotificationController {
    /// Build a controller that delivers to HipChat.
    ///
    /// Resolves `${VAR}` references and validates required settings first:
    /// a missing `auth_token` or `room_id` means no controller is ever
    /// activated (fail-closed at startup, not per-event).
    pub fn new(config: NotificationConfig) -> Result<Self, ConfigError> {
        let config = config.resolve()?;
        let dispatcher = Arc::new(HipChatDispatcher::from_config(&config)?);
        Ok(Self {
            config,
            chain: FilterChain::new(),
            dispatcher,
        })
    }

    /// Build a controller around an arbitrary dispatcher.
    ///
    /// Same startup validation as [`NotificationController::new`]; used by
    /// hosts with a custom transport and by tests with mock dispatchers.
    pub fn with_dispatcher(
        config: NotificationConfig,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Result<Self, ConfigError> {
        let config = config.resolve()?;
        Ok(Self {
            config,
            chain: FilterChain::new(),
            dispatcher,
        })
    }

    /// Register a dismiss-capable filter observer.
    ///
    /// The pre-dispatch subscription point for the host and other
    /// collaborators. Observers run in registration order on every
    /// occurrence.
    pub fn register_filter(&mut self, filter: Arc<dyn ExceptionFilter>) {
        self.chain.register(filter);
    }

    /// Handle one error event reported by the host.
    ///
    /// Runs the filter chain; if not dismissed, formats the payload once and
    /// dispatches it exactly once. In sync mode the call blocks until the
    /// HTTP call completes; in async mode it returns as soon as the send is
    /// scheduled and a later failure is only logged.
    pub async fn handle_error(&self, occurrence: ExceptionOccurrence) -> NotifyOutcome {
        let span = tracing::info_span!(
            "handle_error",
            exception_type = %occurrence.exception_type,
            request_url = occurrence.request_url.as_deref().unwrap_or(""),
        );

        async move {
            let decision = self.chain.evaluate(&occurrence);
            if decision.dismissed {
                tracing::info!("Occurrence dismissed by filter chain");
                metrics::counter!("hipalert_notifications_dismissed_total").increment(1);
                return NotifyOutcome::Dismissed;
            }

            let payload = build_payload(&occurrence, self.config.notify, self.config.message_format);

            match self.config.delivery_mode {
                DeliveryMode::Sync => match self.dispatcher.send(&payload).await {
                    Ok(()) => NotifyOutcome::Dispatched,
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            dispatcher = %self.dispatcher.name(),
                            "Notification dispatch failed"
                        );
                        NotifyOutcome::DispatchFailed(e)
                    }
                },
                DeliveryMode::Async => {
                    let dispatcher = Arc::clone(&self.dispatcher);
                    tokio::spawn(async move {
                        if let Err(e) = dispatcher.send(&payload).await {
                            // The triggering event is long gone; the log is
                            // the only channel left for this failure.
                            tracing::error!(
                                error = %e,
                                dispatcher = %dispatcher.name(),
                                "Background notification dispatch failed"
                            );
                        }
                    });
                    NotifyOutcome::Scheduled
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for NotificationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationController")
            .field("room_id", &self.config.room_id)
            .field("delivery_mode", &self.config.delivery_mode)
            .field("filters", &self.chain.len())
            .finish()
    }
}
