//! In-place radix-2 FFT with precomputed tables
//!
//! The engine is built for exactly one power-of-two window size. Building
//! it precomputes the bit-reversal permutation and the per-stride twiddle
//! tables; `forward()` then reuses its own scratch arrays for every call, so
//! one instance handles one transform at a time.
//!
//! ## Pipeline
//!
//! 1. Gather: read the window in bit-reversed order, applying gain
//! 2. Butterflies: iterative Cooley-Tukey, strides 1, 2, 4 ... size/2
//! 3. Magnitudes: `(2 / size) × |X[k]|` for the first `size / 2` bins
//!
//! No window function is applied before the transform.

use std::f64::consts::PI;

use thiserror::Error;

use crate::audio::SampleSource;

/// Smallest supported window exponent (64 samples)
pub const MIN_FFT_EXPONENT: u32 = 6;
/// Largest supported window exponent (16384 samples)
pub const MAX_FFT_EXPONENT: u32 = 14;

/// Errors that can occur while building an FFT engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FftError {
    #[error("Invalid FFT size {size}, must be a power of 2 and at least 2")]
    InvalidSize { size: usize },

    #[error("FFT size {size} is outside the supported range {min}..={max}")]
    OutOfRange { size: usize, min: usize, max: usize },
}

/// Fixed-size in-place FFT producing magnitude spectra
pub struct InplaceFft {
    size: usize,
    /// Scratch arrays, overwritten by every transform
    real: Vec<f32>,
    imag: Vec<f32>,
    reverse_table: Vec<usize>,
    /// `sin(-π / i)` and `cos(-π / i)`; index 0 is never read
    sin_table: Vec<f32>,
    cos_table: Vec<f32>,
}

impl InplaceFft {
    /// Build an engine for `size` samples
    ///
    /// # Errors
    /// `FftError::InvalidSize` for sizes below 2 (a 1-point transform has no
    /// magnitude bins) and for any size that is not a power of two
    pub fn new(size: usize) -> Result<Self, FftError> {
        if size < 2 || !size.is_power_of_two() {
            return Err(FftError::InvalidSize { size });
        }

        let mut reverse_table = vec![0usize; size];
        let mut limit = 1;
        let mut bit = size >> 1;
        while limit < size {
            for i in 0..limit {
                reverse_table[i + limit] = reverse_table[i] + bit;
            }
            limit <<= 1;
            bit >>= 1;
        }

        let mut sin_table = vec![0.0f32; size];
        let mut cos_table = vec![0.0f32; size];
        for i in 1..size {
            let angle = -PI / i as f64;
            sin_table[i] = angle.sin() as f32;
            cos_table[i] = angle.cos() as f32;
        }

        Ok(Self {
            size,
            real: vec![0.0; size],
            imag: vec![0.0; size],
            reverse_table,
            sin_table,
            cos_table,
        })
    }

    /// Build an engine for `2^exponent` samples
    ///
    /// The exponent is clamped to `[MIN_FFT_EXPONENT, MAX_FFT_EXPONENT]`.
    pub fn from_exponent(exponent: u32) -> Self {
        let exponent = exponent.clamp(MIN_FFT_EXPONENT, MAX_FFT_EXPONENT);
        let size = 1usize << exponent;
        // Every clamped exponent yields a valid power of two
        match Self::new(size) {
            Ok(fft) => fft,
            Err(_) => unreachable!("2^{} is a power of two", exponent),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of magnitude bins produced per transform
    pub fn half_size(&self) -> usize {
        self.size / 2
    }

    /// Bit-reversed position of index `i`
    pub fn bit_reverse(&self, i: usize) -> usize {
        self.reverse_table[i]
    }

    /// Transform the window `[start, start + size)` of `source`
    ///
    /// # Arguments
    /// * `source` - Samples to read; indices wrap around its length
    /// * `start` - Absolute index of the first sample of the window
    /// * `gain` - Multiplier applied to every sample before the transform
    /// * `spectrum` - Receives `size / 2` magnitudes; extra slots are left alone
    pub fn forward<S: SampleSource + ?Sized>(
        &mut self,
        source: &S,
        start: i64,
        gain: f32,
        spectrum: &mut [f32],
    ) {
        let Self {
            size,
            real,
            imag,
            reverse_table,
            sin_table,
            cos_table,
        } = self;
        let size = *size;

        // Bit-reversal reordering and gain in one pass
        for i in 0..size {
            let ix = start + reverse_table[i] as i64;
            real[i] = source.sample_at(ix) * gain;
            imag[i] = 0.0;
        }

        let mut half_size = 1;
        while half_size < size {
            let step_real = cos_table[half_size];
            let step_imag = sin_table[half_size];

            let mut phase_real = 1.0f32;
            let mut phase_imag = 0.0f32;

            for fft_step in 0..half_size {
                let mut i = fft_step;
                while i < size {
                    let off = i + half_size;
                    let tr = phase_real * real[off] - phase_imag * imag[off];
                    let ti = phase_real * imag[off] + phase_imag * real[off];
                    real[off] = real[i] - tr;
                    imag[off] = imag[i] - ti;
                    real[i] += tr;
                    imag[i] += ti;
                    i += half_size << 1;
                }

                let tmp_real = phase_real;
                phase_real = tmp_real * step_real - phase_imag * step_imag;
                phase_imag = tmp_real * step_imag + phase_imag * step_real;
            }

            half_size <<= 1;
        }

        let scale = 2.0 / size as f32;
        for (bin, out) in spectrum.iter_mut().take(size / 2).enumerate() {
            let (re, im) = (real[bin], imag[bin]);
            *out = scale * (re * re + im * im).sqrt();
        }
    }
}
