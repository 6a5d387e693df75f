//! Recorder state as observed from host notifications

wire_enum! {
    /// Recorder states.
    ///
    /// The host owns the state machine:
    ///   STOPPED -> RECORDING (start)
    ///   RECORDING <-> PAUSED (pause / resume)
    ///   RECORDING | PAUSED -> STOPPED (stop, with output)
    ///   RECORDING | PAUSED -> STOPPED (cancel, without output)
    ///
    /// The proxy never enforces these transitions; it only reports them.
    pub enum RecorderState ("recorder state") {
        Stopped => "stopped",
        Recording => "recording",
        Paused => "paused",
    }
}

/// A decoded `state_changed` notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChangeEvent {
    /// Id of the proxy the notification was delivered to
    pub control_id: u64,
    pub state: RecorderState,
    /// The raw state string as sent by the host
    pub data: String,
}
