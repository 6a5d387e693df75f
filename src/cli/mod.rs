//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the config command,
//! and the recorder command runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_command, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, HostOptions, StartArgs};
pub use presenter::Presenter;
