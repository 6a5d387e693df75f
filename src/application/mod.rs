//! Application layer - Recorder proxy and port interfaces
//!
//! Contains the recorder control proxy, its event delivery, and the trait
//! definitions for host and configuration storage interactions.

pub mod detached;
pub mod events;
pub mod ports;
pub mod recorder;

// Re-export the proxy surface
pub use detached::DetachedRecorder;
pub use events::{StateCallback, StateEvents, STATE_CHANGED_EVENT};
pub use recorder::{methods, RecorderError, RecorderProxy};
