//! Sample ring shared between the capture thread and the render loop
//!
//! The ring always holds `seconds × sample_rate` samples. It starts out
//! silent and is continuously overwritten by the producer; nothing is ever
//! "consumed". Readers take snapshots of the write position and the
//! cumulative sample count and index into the ring from there.
//!
//! ## Design Notes
//!
//! Storage is a slice of relaxed atomics holding `f32` bit patterns rather
//! than an `Arc<Mutex<_>>`. The audio callback never waits on the UI, and
//! the UI never waits on the audio callback. A reader may see a position
//! that is a few samples behind the latest write, which is fine for
//! visualisation.

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Anything the FFT engine can pull a window of samples from
///
/// Indices are absolute and may be negative or exceed `len()`; they are
/// wrapped onto the source with Euclidean modulo.
pub trait SampleSource {
    /// Number of distinct samples before indices wrap
    fn len(&self) -> usize;

    /// Sample at `index`, wrapped into `[0, len)`
    fn sample_at(&self, index: i64) -> f32;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SampleSource for [f32] {
    fn len(&self) -> usize {
        <[f32]>::len(self)
    }

    fn sample_at(&self, index: i64) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self[wrap_index(index, <[f32]>::len(self))]
    }
}

fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Fixed-capacity circular store of recent mono audio
///
/// This is the explicit audio context: the capture thread gets one clone
/// and calls `write()`, every spectrogram gets another and only reads.
///
/// ## Example
///
/// ```ignore
/// let ring = SampleRing::new(48_000, 4.0);
///
/// // In the audio callback:
/// for &sample in block {
///     ring.write(sample);
/// }
///
/// // In the render loop:
/// let latest = ring.sample_at(ring.sample_ix() as i64 - 1);
/// ```
pub struct SampleRing {
    inner: Arc<RingInner>,
}

struct RingInner {
    /// Sample storage (`f32::to_bits`)
    samples: Box<[AtomicU32]>,
    /// Next slot to be written, always `< samples.len()`
    write_pos: AtomicUsize,
    /// Samples written since creation
    sample_ix: AtomicU64,
    sample_rate: u32,
}

impl SampleRing {
    /// Create a silent ring holding `seconds` of audio at `sample_rate`
    ///
    /// The capacity is at least one sample.
    pub fn new(sample_rate: u32, seconds: f32) -> Self {
        let capacity = ((sample_rate as f64 * seconds as f64).round() as usize).max(1);
        Self::with_capacity(sample_rate, capacity)
    }

    /// Create a silent ring with an exact capacity in samples
    pub fn with_capacity(sample_rate: u32, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let samples = (0..capacity)
            .map(|_| AtomicU32::new(0.0f32.to_bits()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            inner: Arc::new(RingInner {
                samples,
                write_pos: AtomicUsize::new(0),
                sample_ix: AtomicU64::new(0),
                sample_rate,
            }),
        }
    }

    /// Append one sample at the write position and advance it
    ///
    /// Only the producer may call this.
    pub fn write(&self, sample: f32) {
        let inner = &*self.inner;
        let len = inner.samples.len();
        let pos = inner.write_pos.load(Ordering::Relaxed);
        inner.samples[pos].store(sample.to_bits(), Ordering::Relaxed);
        inner.write_pos.store((pos + 1) % len, Ordering::Release);
        inner.sample_ix.fetch_add(1, Ordering::Release);
    }

    /// Append a block of samples, oldest first
    #[cfg(test)]
    pub fn write_block(&self, block: &[f32]) {
        for &sample in block {
            self.write(sample);
        }
    }

    /// Sample at an absolute index, wrapped modulo capacity
    pub fn read(&self, index: i64) -> f32 {
        let samples = &self.inner.samples;
        f32::from_bits(samples[wrap_index(index, samples.len())].load(Ordering::Relaxed))
    }

    /// Current write position in `[0, capacity)`
    pub fn write_pos(&self) -> usize {
        self.inner.write_pos.load(Ordering::Acquire)
    }

    /// Total number of samples written since the ring was created
    pub fn sample_ix(&self) -> u64 {
        self.inner.sample_ix.load(Ordering::Acquire)
    }

    pub fn capacity(&self) -> usize {
        self.inner.samples.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.inner.sample_rate
    }

    /// Length of the ring in seconds
    pub fn seconds(&self) -> f32 {
        self.capacity() as f32 / self.inner.sample_rate.max(1) as f32
    }

    /// Share the ring with another context
    pub fn clone_ref(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Clone for SampleRing {
    fn clone(&self) -> Self {
        self.clone_ref()
    }
}

impl SampleSource for SampleRing {
    fn len(&self) -> usize {
        self.capacity()
    }

    fn sample_at(&self, index: i64) -> f32 {
        self.read(index)
    }
}
