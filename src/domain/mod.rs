//! Domain layer - Recording value objects and errors
//!
//! Contains the configuration model, enumerations, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use recording::{
    AndroidAudioSource, AndroidRecordConfiguration, AudioEncoder, InputDevice,
    IosAudioCategoryOption, IosCategoryOptions, IosRecordConfiguration, RecorderConfiguration,
    RecorderConfigurationBuilder, RecorderState, StateChangeEvent, Timeout,
};
