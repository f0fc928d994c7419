//! Spectrogram module - the streaming time/frequency engine
//!
//! This module provides:
//! - `SpectralHistory` grid storage with column and flat backends
//! - Nearest-neighbour remapping between history geometries
//! - `Spectrogram`: per-refresh update driver and live reconfiguration

mod driver;
mod history;

pub use driver::{
    Spectrogram, UpdateReport, DEFAULT_COLOR, DEFAULT_FFT_EXPONENT, DEFAULT_GAIN,
    DEFAULT_PERIOD_SECONDS, MIN_PERIOD_SECONDS,
};
#[allow(unused_imports)]
pub use history::{remap, ColumnHistory, FlatHistory, LayoutKind, SpectralHistory};
