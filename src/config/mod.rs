//! Configuration for the notification pipeline.
//!
//! The hosting application loads this once at startup (from whatever
//! configuration source it owns) and hands it to the controller as a value.
//! Validation is fail-closed: a missing auth token or room id prevents the
//! controller from activating at all, it is never discovered per-event.

mod env;
mod secret;
mod types;

pub use env::resolve_env_vars;
pub use secret::SecretString;
pub use types::{
    DEFAULT_API_BASE_URL, DeliveryMode, ENV_AUTH_TOKEN, ENV_ROOM_ID, NotificationConfig,
};
