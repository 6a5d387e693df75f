//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::recording::{AudioEncoder, RecorderConfiguration, Timeout};
use crate::infrastructure::host::HostAddress;

/// Recorder Bridge - control a native audio recording host
#[derive(Parser, Debug)]
#[command(name = "recorder-bridge")]
#[command(version)]
#[command(about = "Send audio recording commands to a native recording host")]
#[command(long_about = None)]
pub struct Cli {
    /// Host address (unix:<path>, tcp:<host>:<port>, or a socket path)
    #[arg(long, value_name = "ADDR", global = true)]
    pub host: Option<String>,

    /// Time to wait for each host response (e.g., 500ms, 10s, 1m)
    #[arg(short = 't', long, value_name = "TIME", global = true)]
    pub timeout: Option<String>,

    /// Host runs in a web context (output path optional for start)
    #[arg(long, global = true)]
    pub web: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start recording
    Start(StartArgs),
    /// Stop recording and print the output path
    Stop,
    /// Cancel recording without producing output
    Cancel,
    /// Pause recording
    Pause,
    /// Resume a paused recording
    Resume,
    /// Show whether the host is recording, paused, or stopped
    Status,
    /// List input devices
    Devices,
    /// Check recording permission
    Permission,
    /// Check whether the host supports an encoder
    Supports {
        /// Encoder to check
        encoder: EncoderArg,
    },
    /// Print state changes until interrupted
    Watch,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Per-call recording options; unset values come from the configured default
#[derive(Args, Debug, Default)]
pub struct StartArgs {
    /// Output file path (required unless --web)
    pub path: Option<String>,

    /// Audio encoder
    #[arg(short = 'e', long, value_name = "ENCODER")]
    pub encoder: Option<EncoderArg>,

    /// Channel count (1 or 2)
    #[arg(short = 'c', long, value_name = "N")]
    pub channels: Option<u8>,

    /// Sample rate in Hz
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<u32>,

    /// Bit rate in bits per second
    #[arg(long, value_name = "BPS")]
    pub bit_rate: Option<u32>,

    /// Enable noise suppression
    #[arg(long)]
    pub suppress_noise: bool,

    /// Enable echo cancellation
    #[arg(long)]
    pub cancel_echo: bool,

    /// Enable automatic gain control
    #[arg(long)]
    pub auto_gain: bool,

    /// Input device id (see `devices`)
    #[arg(short = 'd', long, value_name = "ID")]
    pub device: Option<String>,
}

impl StartArgs {
    /// Check if any flag overrides the default configuration
    pub fn has_overrides(&self) -> bool {
        self.encoder.is_some()
            || self.channels.is_some()
            || self.sample_rate.is_some()
            || self.bit_rate.is_some()
            || self.suppress_noise
            || self.cancel_echo
            || self.auto_gain
            || self.device.is_some()
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Encoder argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EncoderArg {
    AacLc,
    AacEld,
    AacHe,
    AmrNb,
    AmrWb,
    Opus,
    Flac,
    Wav,
    #[value(name = "pcm16bits")]
    Pcm16Bits,
}

impl From<EncoderArg> for AudioEncoder {
    fn from(arg: EncoderArg) -> Self {
        match arg {
            EncoderArg::AacLc => AudioEncoder::AacLc,
            EncoderArg::AacEld => AudioEncoder::AacEld,
            EncoderArg::AacHe => AudioEncoder::AacHe,
            EncoderArg::AmrNb => AudioEncoder::AmrNb,
            EncoderArg::AmrWb => AudioEncoder::AmrWb,
            EncoderArg::Opus => AudioEncoder::Opus,
            EncoderArg::Flac => AudioEncoder::Flac,
            EncoderArg::Wav => AudioEncoder::Wav,
            EncoderArg::Pcm16Bits => AudioEncoder::Pcm16Bits,
        }
    }
}

/// Resolved host connection options
#[derive(Debug, Clone)]
pub struct HostOptions {
    pub address: HostAddress,
    pub timeout: Timeout,
    pub web: bool,
    pub recorder: RecorderConfiguration,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "host",
    "timeout",
    "web",
    "recorder.encoder",
    "recorder.channels",
    "recorder.sample_rate",
    "recorder.bit_rate",
    "recorder.suppress_noise",
    "recorder.cancel_echo",
    "recorder.auto_gain",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
