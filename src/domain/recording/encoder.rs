//! Audio encoder enumeration

wire_enum! {
    /// Audio encoders a recording host may support.
    ///
    /// Availability depends on the platform; check it with
    /// `RecorderProxy::is_supported_encoder` before starting a recording.
    pub enum AudioEncoder ("audio encoder") {
        /// AAC Low Complexity, the common choice for general recording
        AacLc => "aacLc",
        /// AAC Enhanced Low Delay, for low-latency use such as VoIP
        AacEld => "aacEld",
        /// AAC High Efficiency, for lower bit rates
        AacHe => "aacHe",
        /// AMR Narrow Band speech codec
        AmrNb => "amrNb",
        /// AMR Wide Band speech codec
        AmrWb => "amrWb",
        Opus => "opus",
        /// Lossless compression
        Flac => "flac",
        /// Uncompressed WAV container
        Wav => "wav",
        /// Raw 16-bit PCM stream
        Pcm16Bits => "pcm16bits",
    }
}

impl Default for AudioEncoder {
    fn default() -> Self {
        Self::Wav
    }
}
