//! Recorder control proxy
//!
//! Every command is one round trip over a [`HostChannel`]: encode the call
//! name and argument mapping, send, wait for the correlated response or the
//! timeout, decode the result. Nothing is retried; recording commands are not
//! idempotent (a timed-out stop may already have finalized the file).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::events::{StateCallback, StateEvents};
use super::ports::{DispatchError, HostChannel};
use crate::domain::error::InvalidArgument;
use crate::domain::recording::{
    AudioEncoder, InputDevice, RecorderConfiguration, RecorderState, StateChangeEvent, Timeout,
};

/// Host call names
pub mod methods {
    pub const START_RECORDING: &str = "start_recording";
    pub const IS_RECORDING: &str = "is_recording";
    pub const STOP_RECORDING: &str = "stop_recording";
    pub const CANCEL_RECORDING: &str = "cancel_recording";
    pub const PAUSE_RECORDING: &str = "pause_recording";
    pub const RESUME_RECORDING: &str = "resume_recording";
    pub const IS_PAUSED: &str = "is_paused";
    pub const IS_SUPPORTED_ENCODER: &str = "is_supported_encoder";
    pub const GET_INPUT_DEVICES: &str = "get_input_devices";
    pub const HAS_PERMISSION: &str = "has_permission";
}

/// Errors returned by recorder commands
#[derive(Debug, Clone, Error)]
pub enum RecorderError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("'{method}' timed out after {timeout:?}")]
    TimedOut {
        method: &'static str,
        timeout: Duration,
    },

    #[error("Host error in '{method}': {message}")]
    Host {
        method: &'static str,
        message: String,
    },

    #[error("Permission check failed: {0}")]
    PermissionCheck(String),

    #[error("Host channel failure: {0}")]
    Transport(String),

    #[error("Unexpected response to '{method}': {message}")]
    Decode {
        method: &'static str,
        message: String,
    },
}

impl RecorderError {
    fn from_dispatch(method: &'static str, timeout: Duration, err: DispatchError) -> Self {
        match err {
            DispatchError::TimedOut { .. } => Self::TimedOut { method, timeout },
            DispatchError::Host { message, .. } => Self::Host { method, message },
            DispatchError::Transport(message) => Self::Transport(message),
        }
    }

    /// Check if this is a timeout failure
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(1);

/// Handle for one recording session control on a host.
///
/// Holds a default configuration used whenever a call does not pass its own,
/// and a single state-change callback slot.
pub struct RecorderProxy<C: HostChannel> {
    channel: Arc<C>,
    configuration: RecorderConfiguration,
    web: bool,
    default_timeout: Duration,
    control_id: u64,
    events: Arc<StateEvents>,
}

impl<C: HostChannel> RecorderProxy<C> {
    /// Create a proxy bound to a host channel and subscribe to its events
    pub fn new(channel: Arc<C>) -> Self {
        let control_id = NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed);
        let events = Arc::new(StateEvents::new(control_id));
        channel.add_event_sink(events.clone());

        Self {
            channel,
            configuration: RecorderConfiguration::default(),
            web: false,
            default_timeout: Timeout::default_timeout().as_std(),
            control_id,
            events,
        }
    }

    /// Set the default recording configuration
    pub fn with_configuration(mut self, configuration: RecorderConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Mark the host as running in a web context, where the output path is optional
    pub fn with_web(mut self, web: bool) -> Self {
        self.web = web;
        self
    }

    /// Set the timeout used when a call passes `None`
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Register the state-change callback, replacing any previous one
    pub fn on_state_change<F>(&self, callback: F)
    where
        F: Fn(StateChangeEvent) + Send + Sync + 'static,
    {
        let callback: StateCallback = Arc::new(callback);
        self.events.set_callback(Some(callback));
    }

    /// Remove the state-change callback; later events are discarded
    pub fn clear_state_change(&self) {
        self.events.set_callback(None);
    }

    pub fn configuration(&self) -> &RecorderConfiguration {
        &self.configuration
    }

    pub fn is_web(&self) -> bool {
        self.web
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    pub fn control_id(&self) -> u64 {
        self.control_id
    }

    /// State from the most recent host notification.
    ///
    /// Not authoritative: use [`is_recording`](Self::is_recording) or
    /// [`is_paused`](Self::is_paused) to ask the host.
    pub fn last_state(&self) -> Option<RecorderState> {
        self.events.last_state()
    }

    /// Configuration used for a call: the override if given, else the default
    pub fn effective_configuration<'a>(
        &'a self,
        configuration: Option<&'a RecorderConfiguration>,
    ) -> &'a RecorderConfiguration {
        configuration.unwrap_or(&self.configuration)
    }

    /// Start recording to `output_path`.
    ///
    /// The path is required unless the proxy is in web context, where the
    /// host may generate one.
    ///
    /// # Returns
    /// `true` if the host started recording
    pub async fn start_recording(
        &self,
        output_path: Option<&str>,
        configuration: Option<&RecorderConfiguration>,
        timeout: Option<Duration>,
    ) -> Result<bool, RecorderError> {
        let output_path = output_path.filter(|p| !p.is_empty());
        if output_path.is_none() && !self.web {
            return Err(InvalidArgument::new(
                "output_path",
                "must be provided on platforms other than web",
            )
            .into());
        }

        let args = json!({
            "output_path": output_path,
            "configuration": self.effective_configuration(configuration),
        });
        self.invoke(methods::START_RECORDING, args, timeout).await
    }

    /// Ask the host whether it is recording
    pub async fn is_recording(&self, timeout: Option<Duration>) -> Result<bool, RecorderError> {
        self.invoke(methods::IS_RECORDING, empty_args(), timeout).await
    }

    /// Stop recording.
    ///
    /// # Returns
    /// Path of the recorded file, or `None` if the host has none (e.g. a web
    /// capture that is still buffered)
    pub async fn stop_recording(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Option<String>, RecorderError> {
        self.invoke(methods::STOP_RECORDING, empty_args(), timeout).await
    }

    /// Discard the in-progress recording without producing output
    pub async fn cancel_recording(&self, timeout: Option<Duration>) -> Result<(), RecorderError> {
        self.invoke_unit(methods::CANCEL_RECORDING, timeout).await
    }

    /// Pause recording. The host ignores this when not recording.
    pub async fn pause_recording(&self, timeout: Option<Duration>) -> Result<(), RecorderError> {
        self.invoke_unit(methods::PAUSE_RECORDING, timeout).await
    }

    /// Resume a paused recording. The host ignores this when not paused.
    pub async fn resume_recording(&self, timeout: Option<Duration>) -> Result<(), RecorderError> {
        self.invoke_unit(methods::RESUME_RECORDING, timeout).await
    }

    /// Ask the host whether recording is paused
    pub async fn is_paused(&self, timeout: Option<Duration>) -> Result<bool, RecorderError> {
        self.invoke(methods::IS_PAUSED, empty_args(), timeout).await
    }

    /// Ask the host whether it can record with `encoder`
    pub async fn is_supported_encoder(
        &self,
        encoder: AudioEncoder,
        timeout: Option<Duration>,
    ) -> Result<bool, RecorderError> {
        let args = json!({ "encoder": encoder.as_str() });
        self.invoke(methods::IS_SUPPORTED_ENCODER, args, timeout).await
    }

    /// List input devices in the order the host reported them.
    ///
    /// The order is not guaranteed to be stable across calls.
    pub async fn get_input_devices(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Vec<InputDevice>, RecorderError> {
        let devices: Map<String, Value> = self
            .invoke(methods::GET_INPUT_DEVICES, empty_args(), timeout)
            .await?;

        devices
            .into_iter()
            .map(|(id, label)| match label {
                Value::String(label) => Ok(InputDevice::new(id, label)),
                other => Err(RecorderError::Decode {
                    method: methods::GET_INPUT_DEVICES,
                    message: format!("label for device '{}' is not a string: {}", id, other),
                }),
            })
            .collect()
    }

    /// Ask the host whether the app may record audio.
    ///
    /// A host-side failure is surfaced as [`RecorderError::PermissionCheck`].
    pub async fn has_permission(&self, timeout: Option<Duration>) -> Result<bool, RecorderError> {
        self.invoke(methods::HAS_PERMISSION, empty_args(), timeout)
            .await
            .map_err(|e| match e {
                RecorderError::Host { message, .. } => RecorderError::PermissionCheck(message),
                other => other,
            })
    }

    async fn invoke_unit(
        &self,
        method: &'static str,
        timeout: Option<Duration>,
    ) -> Result<(), RecorderError> {
        let _: IgnoredAny = self.invoke(method, empty_args(), timeout).await?;
        Ok(())
    }

    /// Single round trip: send, await, decode
    async fn invoke<T: DeserializeOwned>(
        &self,
        method: &'static str,
        args: Value,
        timeout: Option<Duration>,
    ) -> Result<T, RecorderError> {
        let timeout = timeout.unwrap_or(self.default_timeout);
        debug!(control_id = self.control_id, method, ?timeout, "dispatching host call");

        let response = tokio::time::timeout(timeout, self.channel.send(method, args, timeout))
            .await
            .unwrap_or_else(|_| {
                Err(DispatchError::TimedOut {
                    method: method.to_string(),
                    timeout,
                })
            });

        let value = response.map_err(|e| {
            warn!(control_id = self.control_id, method, error = %e, "host call failed");
            RecorderError::from_dispatch(method, timeout, e)
        })?;

        serde_json::from_value(value).map_err(|e| RecorderError::Decode {
            method,
            message: e.to_string(),
        })
    }
}

fn empty_args() -> Value {
    Value::Object(Map::new())
}
