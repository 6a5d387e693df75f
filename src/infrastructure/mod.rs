//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces:
//! the stream-based host channel and the XDG config store.

pub mod config;
pub mod host;

// Re-export adapters
pub use config::XdgConfigStore;
pub use host::{HostAddress, StreamChannel};
