//! Host channel port interfaces

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors a host channel can return for a single call
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("No response to '{method}' within {timeout:?}")]
    TimedOut { method: String, timeout: Duration },

    #[error("Host failed '{method}': {message}")]
    Host { method: String, message: String },

    #[error("Host channel failure: {0}")]
    Transport(String),
}

/// Errors from handling an inbound host event
#[derive(Debug, Clone, Error)]
pub enum EventError {
    #[error("Failed to decode '{event}' payload: {message}")]
    Decode { event: String, message: String },
}

/// Receiver for events pushed by the host.
pub trait EventSink: Send + Sync {
    /// Handle one event. Called in delivery order, never concurrently for
    /// the same channel.
    fn on_event(&self, name: &str, payload: &Value) -> Result<(), EventError>;
}

/// Port for the request/response channel to a native recording host
#[async_trait]
pub trait HostChannel: Send + Sync {
    /// Send a call and wait for its correlated response.
    ///
    /// # Arguments
    /// * `method` - Call name, e.g. `start_recording`
    /// * `args` - Argument mapping
    /// * `timeout` - How long to wait for the response
    ///
    /// # Returns
    /// The host's result value, or a dispatch error
    async fn send(&self, method: &str, args: Value, timeout: Duration)
        -> Result<Value, DispatchError>;

    /// Register a receiver for host-pushed events. Every registered receiver
    /// sees every event; earlier registrations stay in place.
    fn add_event_sink(&self, sink: Arc<dyn EventSink>);
}
