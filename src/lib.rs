//! Recorder Bridge - control a native audio recording host
//!
//! This crate provides a proxy that drives an audio recorder living in a
//! separate host process: start, stop, cancel, pause, resume, capability
//! queries, and state-change notifications.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Recording configuration, enumerations, and errors
//! - **Application**: The recorder proxy, event delivery, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (stream host channel, XDG config store)
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
