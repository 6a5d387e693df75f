//! iOS-specific recording options

use serde::{Deserialize, Deserializer, Serialize};

wire_enum! {
    /// `AVAudioSession.CategoryOptions` flags
    pub enum IosAudioCategoryOption ("iOS audio category option") {
        MixWithOthers => "mixWithOthers",
        DuckOthers => "duckOthers",
        AllowBluetooth => "allowBluetooth",
        DefaultToSpeaker => "defaultToSpeaker",
        InterruptSpokenAudioAndMixWithOthers => "interruptSpokenAudioAndMixWithOthers",
        AllowBluetoothA2dp => "allowBluetoothA2DP",
        AllowAirPlay => "allowAirPlay",
        OverrideMutedMicrophoneInterruption => "overrideMutedMicrophoneInterruption",
    }
}

/// Category options in the order they were added. Adding an option twice
/// keeps the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IosCategoryOptions(Vec<IosAudioCategoryOption>);

impl IosCategoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option; returns false if it was already present
    pub fn insert(&mut self, option: IosAudioCategoryOption) -> bool {
        if self.contains(&option) {
            return false;
        }
        self.0.push(option);
        true
    }

    pub fn contains(&self, option: &IosAudioCategoryOption) -> bool {
        self.0.contains(option)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IosAudioCategoryOption> {
        self.0.iter()
    }
}

impl FromIterator<IosAudioCategoryOption> for IosCategoryOptions {
    fn from_iter<I: IntoIterator<Item = IosAudioCategoryOption>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.insert(option);
        }
        options
    }
}

impl<const N: usize> From<[IosAudioCategoryOption; N]> for IosCategoryOptions {
    fn from(options: [IosAudioCategoryOption; N]) -> Self {
        options.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for IosCategoryOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let options = Vec::<IosAudioCategoryOption>::deserialize(deserializer)?;
        Ok(options.into_iter().collect())
    }
}

/// iOS sub-configuration of a recording session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IosRecordConfiguration {
    /// Audio session category options, sent as a list in insertion order
    pub options: IosCategoryOptions,
    /// Let the host activate and configure the audio session
    pub manage_audio_session: bool,
}

impl Default for IosRecordConfiguration {
    fn default() -> Self {
        Self {
            options: IosCategoryOptions::from([
                IosAudioCategoryOption::DefaultToSpeaker,
                IosAudioCategoryOption::AllowBluetooth,
                IosAudioCategoryOption::AllowBluetoothA2dp,
            ]),
            manage_audio_session: true,
        }
    }
}
