use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::command::BOX_NAMES;
use crate::spectrogram::{
    LayoutKind, Spectrogram, DEFAULT_COLOR, DEFAULT_FFT_EXPONENT, DEFAULT_GAIN,
    DEFAULT_PERIOD_SECONDS, MIN_PERIOD_SECONDS,
};

/// Returns the path to the settings file: `~/.config/spectro-rs/settings.json`
fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spectro-rs");
    path.push("settings.json");
    path
}

/// Persisted state of one spectrogram box
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSettings {
    /// Window size in samples
    pub fft_size: usize,
    pub gain: f32,
    pub period_seconds: f32,
    pub color: [f32; 3],
    pub layout: LayoutKind,
    pub visible: bool,
    pub looping: bool,
}

impl Default for BoxSettings {
    fn default() -> Self {
        Self {
            fft_size: 1 << DEFAULT_FFT_EXPONENT,
            gain: DEFAULT_GAIN,
            period_seconds: DEFAULT_PERIOD_SECONDS,
            color: DEFAULT_COLOR,
            layout: LayoutKind::Continuous,
            visible: true,
            looping: false,
        }
    }
}

impl BoxSettings {
    /// Extract the current parameters of a running spectrogram.
    pub fn from_spectrogram(spectrogram: &Spectrogram) -> Self {
        Self {
            fft_size: spectrogram.fft_size(),
            gain: spectrogram.gain(),
            period_seconds: spectrogram.period_seconds(),
            color: spectrogram.color(),
            layout: spectrogram.layout(),
            visible: spectrogram.is_visible(),
            looping: spectrogram.is_looping(),
        }
    }

    /// Apply loaded parameters to a spectrogram.
    ///
    /// Invalid values in a hand-edited file fall back to the defaults.
    pub fn apply(&self, spectrogram: &mut Spectrogram) {
        spectrogram.set_layout(self.layout);
        if let Err(e) = spectrogram.set_fft_size(self.fft_size) {
            log::warn!("Ignoring saved window: {}", e);
            spectrogram.set_window_exponent(DEFAULT_FFT_EXPONENT as i64);
        }
        let period = if self.period_seconds >= MIN_PERIOD_SECONDS && self.period_seconds.is_finite()
        {
            self.period_seconds
        } else {
            log::warn!("Ignoring invalid period {}", self.period_seconds);
            DEFAULT_PERIOD_SECONDS
        };
        spectrogram.set_period(period);
        spectrogram.set_gain(self.gain);
        spectrogram.set_rgb(self.color);
        spectrogram.set_visible(self.visible);
        spectrogram.set_looping(self.looping);
    }
}

/// Persisted application settings.
///
/// Serialized as JSON to the platform config directory.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Seconds of audio kept in the sample ring
    pub ring_seconds: f32,

    /// One entry per box, in `BOX_NAMES` order
    pub boxes: Vec<BoxSettings>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ring_seconds: 4.0,
            boxes: vec![BoxSettings::default(); BOX_NAMES.len()],
        }
    }
}

impl AppSettings {
    /// Load settings from disk, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = settings_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.normalized()
                }
                Err(e) => {
                    log::warn!("Failed to parse settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk as pretty JSON.
    pub fn save(&self) {
        let path = settings_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("Failed to write settings: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
            }
        }
    }

    /// Exactly one entry per box and a usable ring length
    fn normalized(mut self) -> Self {
        self.boxes.resize(BOX_NAMES.len(), BoxSettings::default());
        if !(self.ring_seconds > 0.0 && self.ring_seconds.is_finite()) {
            self.ring_seconds = Self::default().ring_seconds;
        }
        self
    }

    /// Extract current settings from the running spectrograms.
    pub fn from_spectrograms<'a>(
        ring_seconds: f32,
        spectrograms: impl Iterator<Item = &'a Spectrogram>,
    ) -> Self {
        Self {
            ring_seconds,
            boxes: spectrograms.map(BoxSettings::from_spectrogram).collect(),
        }
        .normalized()
    }
}
