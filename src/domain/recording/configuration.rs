//! Recorder configuration value object

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::android::AndroidRecordConfiguration;
use super::device::InputDevice;
use super::encoder::AudioEncoder;
use super::ios::IosRecordConfiguration;
use crate::domain::error::InvalidArgument;

/// Default channel count (stereo)
pub const DEFAULT_CHANNELS: u8 = 2;

/// Default sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default bit rate in bits per second
pub const DEFAULT_BIT_RATE: u32 = 128_000;

/// How a recording session should behave.
///
/// Immutable once built. Use [`RecorderConfiguration::to_builder`] to derive
/// a modified copy; the builder re-validates on [`build`](RecorderConfigurationBuilder::build).
///
/// Serializes to the mapping the host expects: one entry per field, enums as
/// their wire strings, sub-configurations as nested mappings, and `device`
/// omitted when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecorderConfigurationBuilder")]
pub struct RecorderConfiguration {
    encoder: AudioEncoder,
    suppress_noise: bool,
    cancel_echo: bool,
    auto_gain: bool,
    channels: u8,
    sample_rate: u32,
    bit_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<InputDevice>,
    android_configuration: AndroidRecordConfiguration,
    ios_configuration: IosRecordConfiguration,
}

impl RecorderConfiguration {
    /// Start building a configuration from defaults
    pub fn builder() -> RecorderConfigurationBuilder {
        RecorderConfigurationBuilder::default()
    }

    /// Builder pre-filled with this configuration's values
    pub fn to_builder(&self) -> RecorderConfigurationBuilder {
        RecorderConfigurationBuilder {
            encoder: self.encoder,
            suppress_noise: self.suppress_noise,
            cancel_echo: self.cancel_echo,
            auto_gain: self.auto_gain,
            channels: self.channels,
            sample_rate: self.sample_rate,
            bit_rate: self.bit_rate,
            device: self.device.clone(),
            android_configuration: self.android_configuration.clone(),
            ios_configuration: self.ios_configuration.clone(),
        }
    }

    pub fn encoder(&self) -> AudioEncoder {
        self.encoder
    }

    pub fn suppress_noise(&self) -> bool {
        self.suppress_noise
    }

    pub fn cancel_echo(&self) -> bool {
        self.cancel_echo
    }

    pub fn auto_gain(&self) -> bool {
        self.auto_gain
    }

    /// Channel count, always 1 or 2
    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bit_rate(&self) -> u32 {
        self.bit_rate
    }

    /// Selected input device, or `None` for the host default
    pub fn device(&self) -> Option<&InputDevice> {
        self.device.as_ref()
    }

    pub fn android_configuration(&self) -> &AndroidRecordConfiguration {
        &self.android_configuration
    }

    pub fn ios_configuration(&self) -> &IosRecordConfiguration {
        &self.ios_configuration
    }

    /// Encode as the nested mapping sent to the host
    pub fn to_wire(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Decode a mapping received from the host, validating invariants
    pub fn from_wire(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl Default for RecorderConfiguration {
    fn default() -> Self {
        Self {
            encoder: AudioEncoder::default(),
            suppress_noise: false,
            cancel_echo: false,
            auto_gain: false,
            channels: DEFAULT_CHANNELS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_rate: DEFAULT_BIT_RATE,
            device: None,
            android_configuration: AndroidRecordConfiguration::default(),
            ios_configuration: IosRecordConfiguration::default(),
        }
    }
}

/// Unvalidated field set for a [`RecorderConfiguration`].
///
/// Also the decode target for wire mappings and config files: absent fields
/// take their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecorderConfigurationBuilder {
    encoder: AudioEncoder,
    suppress_noise: bool,
    cancel_echo: bool,
    auto_gain: bool,
    channels: u8,
    sample_rate: u32,
    bit_rate: u32,
    device: Option<InputDevice>,
    android_configuration: AndroidRecordConfiguration,
    ios_configuration: IosRecordConfiguration,
}

impl Default for RecorderConfigurationBuilder {
    fn default() -> Self {
        RecorderConfiguration::default().to_builder()
    }
}

impl RecorderConfigurationBuilder {
    pub fn encoder(mut self, encoder: AudioEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn suppress_noise(mut self, enabled: bool) -> Self {
        self.suppress_noise = enabled;
        self
    }

    pub fn cancel_echo(mut self, enabled: bool) -> Self {
        self.cancel_echo = enabled;
        self
    }

    pub fn auto_gain(mut self, enabled: bool) -> Self {
        self.auto_gain = enabled;
        self
    }

    pub fn channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn bit_rate(mut self, bit_rate: u32) -> Self {
        self.bit_rate = bit_rate;
        self
    }

    pub fn device(mut self, device: Option<InputDevice>) -> Self {
        self.device = device;
        self
    }

    pub fn android_configuration(mut self, config: AndroidRecordConfiguration) -> Self {
        self.android_configuration = config;
        self
    }

    pub fn ios_configuration(mut self, config: IosRecordConfiguration) -> Self {
        self.ios_configuration = config;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<RecorderConfiguration, InvalidArgument> {
        if !matches!(self.channels, 1 | 2) {
            return Err(InvalidArgument::new(
                "channels",
                format!("must be 1 or 2, got {}", self.channels),
            ));
        }
        if self.sample_rate == 0 {
            return Err(InvalidArgument::new("sample_rate", "must be positive"));
        }
        if self.bit_rate == 0 {
            return Err(InvalidArgument::new("bit_rate", "must be positive"));
        }

        Ok(RecorderConfiguration {
            encoder: self.encoder,
            suppress_noise: self.suppress_noise,
            cancel_echo: self.cancel_echo,
            auto_gain: self.auto_gain,
            channels: self.channels,
            sample_rate: self.sample_rate,
            bit_rate: self.bit_rate,
            device: self.device,
            android_configuration: self.android_configuration,
            ios_configuration: self.ios_configuration,
        })
    }
}

impl TryFrom<RecorderConfigurationBuilder> for RecorderConfiguration {
    type Error = InvalidArgument;

    fn try_from(builder: RecorderConfigurationBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
