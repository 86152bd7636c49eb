//! Payload delivery to the chat provider.
//!
//! The [`Dispatcher`] trait is the transport seam: the controller talks to
//! `Arc<dyn Dispatcher>`, production wires in [`HipChatDispatcher`], tests
//! wire in mocks. One `send` call is one delivery attempt; there is no retry
//! layer.

mod hipchat;

use crate::error::DeliveryError;
use crate::message::ChatPayload;
use async_trait::async_trait;

pub use hipchat::HipChatDispatcher;

/// Transport for wire-ready chat payloads.
///
/// Implementations must be `Send + Sync`: a single dispatcher instance is
/// shared across all concurrently handled occurrences.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Name of this dispatcher, used in logs.
    fn name(&self) -> &str;

    /// Deliver one payload.
    ///
    /// * `Ok(())` - the provider answered with a 2xx status.
    /// * `Err(DeliveryError)` - non-2xx status or transport fault.
    async fn send(&self, payload: &ChatPayload) -> Result<(), DeliveryError>;
}

impl std::fmt::Debug for dyn Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").field("name", &self.name()).finish()
    }
}
