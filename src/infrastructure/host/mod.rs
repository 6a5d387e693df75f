//! Host channel adapters
//!
//! Connects the recorder proxy to a native recording host process over a
//! Unix domain socket or TCP, using newline-delimited JSON frames.

pub mod address;
pub mod frame;
pub mod stream;

pub use address::{HostAddress, HostAddressError, DEFAULT_SOCKET_NAME};
pub use stream::StreamChannel;
