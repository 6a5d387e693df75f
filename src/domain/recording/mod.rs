//! Recording value objects exchanged with the host

#[macro_use]
mod wire;

pub mod android;
pub mod configuration;
pub mod device;
pub mod encoder;
pub mod ios;
pub mod state;
pub mod timeout;

pub use android::{AndroidAudioSource, AndroidRecordConfiguration};
pub use configuration::{RecorderConfiguration, RecorderConfigurationBuilder};
pub use device::InputDevice;
pub use encoder::AudioEncoder;
pub use ios::{IosAudioCategoryOption, IosCategoryOptions, IosRecordConfiguration};
pub use state::{RecorderState, StateChangeEvent};
pub use timeout::Timeout;
