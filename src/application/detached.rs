//! Fire-and-forget command wrappers
//!
//! For callers that cannot await (e.g. synchronous UI handlers). Each method
//! schedules the suspending proxy call on the current tokio runtime and
//! returns immediately. Failures are logged; the join handle still carries
//! the result for callers that want it later.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use super::ports::HostChannel;
use super::recorder::{RecorderError, RecorderProxy};

/// Non-suspending adapter over a shared [`RecorderProxy`]
pub struct DetachedRecorder<C: HostChannel + 'static> {
    proxy: Arc<RecorderProxy<C>>,
}

impl<C: HostChannel + 'static> DetachedRecorder<C> {
    pub fn new(proxy: Arc<RecorderProxy<C>>) -> Self {
        Self { proxy }
    }

    /// Get the wrapped proxy
    pub fn proxy(&self) -> &Arc<RecorderProxy<C>> {
        &self.proxy
    }

    /// Schedule `pause_recording`. Must be called within a tokio runtime.
    pub fn pause_recording(
        &self,
        timeout: Option<Duration>,
    ) -> JoinHandle<Result<(), RecorderError>> {
        let proxy = Arc::clone(&self.proxy);
        tokio::spawn(async move { log_failure("pause", proxy.pause_recording(timeout).await) })
    }

    /// Schedule `resume_recording`. Must be called within a tokio runtime.
    pub fn resume_recording(
        &self,
        timeout: Option<Duration>,
    ) -> JoinHandle<Result<(), RecorderError>> {
        let proxy = Arc::clone(&self.proxy);
        tokio::spawn(async move { log_failure("resume", proxy.resume_recording(timeout).await) })
    }

    /// Schedule `cancel_recording`. Must be called within a tokio runtime.
    pub fn cancel_recording(
        &self,
        timeout: Option<Duration>,
    ) -> JoinHandle<Result<(), RecorderError>> {
        let proxy = Arc::clone(&self.proxy);
        tokio::spawn(async move { log_failure("cancel", proxy.cancel_recording(timeout).await) })
    }
}

fn log_failure(action: &str, result: Result<(), RecorderError>) -> Result<(), RecorderError> {
    if let Err(ref e) = result {
        warn!(action, error = %e, "detached recorder command failed");
    }
    result
}
