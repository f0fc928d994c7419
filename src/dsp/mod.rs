//! DSP module - spectral analysis primitives
//!
//! This module provides:
//! - `InplaceFft`: fixed-size radix-2 FFT with precomputed tables
//! - Window-size bounds shared with the reconfiguration commands

mod fft;

pub use fft::{FftError, InplaceFft, MAX_FFT_EXPONENT, MIN_FFT_EXPONENT};
