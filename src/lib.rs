// src/lib.rs
//! hipalert - Unhandled-exception alerting to HipChat rooms.
//!
//! The hosting application captures an exception, builds an
//! [`ExceptionOccurrence`] and hands it to the [`NotificationController`].
//! Registered [`ExceptionFilter`] observers may veto the notification; if
//! none does, a [`ChatPayload`] is built and delivered to the HipChat room
//! notification API, either blocking the caller (sync) or on a background
//! task (async). Delivery is best-effort and strictly side-channel: nothing
//! in this crate ever feeds back into the host's own error handling.
//!
//! ```no_run
//! use hipalert::{ExceptionOccurrence, NotificationConfig, NotificationController};
//!
//! # async fn example() -> Result<(), hipalert::ConfigError> {
//! let config = NotificationConfig::new("${HIPCHAT_AUTH_TOKEN}", "1234");
//! let controller = NotificationController::new(config)?;
//!
//! let occurrence = ExceptionOccurrence::new("System.NullReferenceException", "Object reference not set")
//!     .with_request_url("http://shop.example.com/orders/42");
//! controller.handle_error(occurrence).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod message;
pub mod occurrence;

// Re-export commonly used types
pub use config::{DeliveryMode, NotificationConfig, SecretString};
pub use controller::{NotificationController, NotifyOutcome};
pub use dispatch::{Dispatcher, HipChatDispatcher};
pub use error::{ConfigError, DeliveryError, FilterError};
pub use filter::{ExceptionFilter, FilterChain, FilterDecision, FilterVote};
pub use message::{AlertColor, ChatPayload, MessageFormat, build_payload};
pub use occurrence::ExceptionOccurrence;
