//! Android-specific recording options

use serde::{Deserialize, Serialize};

wire_enum! {
    /// Android `MediaRecorder.AudioSource` selection
    pub enum AndroidAudioSource ("Android audio source") {
        DefaultSource => "defaultSource",
        Mic => "mic",
        VoiceUplink => "voiceUplink",
        VoiceDownlink => "voiceDownlink",
        VoiceCall => "voiceCall",
        Camcorder => "camcorder",
        VoiceRecognition => "voiceRecognition",
        VoiceCommunication => "voiceCommunication",
        RemoteSubmix => "remoteSubMix",
        Unprocessed => "unprocessed",
        VoicePerformance => "voicePerformance",
    }
}

impl Default for AndroidAudioSource {
    fn default() -> Self {
        Self::DefaultSource
    }
}

/// Android sub-configuration of a recording session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidRecordConfiguration {
    /// Use the legacy `MediaRecorder` pipeline instead of `AudioRecord`
    pub use_legacy: bool,
    /// Mute other audio streams while recording
    pub mute_audio: bool,
    /// Let the host start and stop bluetooth SCO itself
    pub manage_bluetooth: bool,
    pub audio_source: AndroidAudioSource,
}

impl Default for AndroidRecordConfiguration {
    fn default() -> Self {
        Self {
            use_legacy: false,
            mute_audio: false,
            manage_bluetooth: true,
            audio_source: AndroidAudioSource::DefaultSource,
        }
    }
}
