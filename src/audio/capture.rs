//! Audio capture - feeds the sample ring from a cpal input stream
//!
//! Opening the microphone is what fixes the sample rate, so the ring is
//! allocated here rather than up front. Until capture starts the
//! spectrograms read from a silent placeholder ring.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample};
use thiserror::Error;

use super::ring::SampleRing;

/// Errors that can occur while opening the input stream
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No input device found")]
    NoInputDevice,

    #[error("Failed to get input config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("Failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("Unsupported sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),
}

/// Push one interleaved input block into the ring
///
/// Only the first channel of each frame is kept.
fn write_input_samples<T>(data: &[T], channels: usize, ring: &SampleRing)
where
    T: Sample,
    f32: FromSample<T>,
{
    for frame in data.chunks(channels.max(1)) {
        ring.write(frame[0].to_sample::<f32>());
    }
}

/// Live microphone capture
///
/// Owns the cpal input stream; dropping the stream stops the callback.
pub struct AudioCapture {
    /// The input stream (kept alive to continue capturing)
    stream: Option<cpal::Stream>,

    /// Ring the running stream writes into
    ring: Option<SampleRing>,

    /// Status message
    pub status: String,
}

impl Default for AudioCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCapture {
    pub fn new() -> Self {
        Self {
            stream: None,
            ring: None,
            status: "Microphone closed".to_string(),
        }
    }

    /// Check if the input stream is running
    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the default input device and start filling a new ring
    ///
    /// # Arguments
    /// * `ring_seconds` - Length of audio history kept in the ring
    ///
    /// # Returns
    /// The ring the stream writes into. Calling this while already running
    /// returns the existing ring.
    pub fn start(&mut self, ring_seconds: f32) -> Result<SampleRing, CaptureError> {
        if let (Some(_), Some(ring)) = (&self.stream, &self.ring) {
            return Ok(ring.clone_ref());
        }

        match self.open(ring_seconds) {
            Ok((stream, ring)) => {
                self.status = format!(
                    "Listening at {} Hz ({:.1}s ring)",
                    ring.sample_rate(),
                    ring.seconds()
                );
                self.stream = Some(stream);
                self.ring = Some(ring.clone_ref());
                log::info!("Audio capture started");
                Ok(ring)
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
                log::error!("Failed to start capture: {}", e);
                Err(e)
            }
        }
    }

    fn open(&self, ring_seconds: f32) -> Result<(cpal::Stream, SampleRing), CaptureError> {
        log::info!("Starting audio capture...");

        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(CaptureError::NoInputDevice)?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using input device: {}", device_name);

        let config = device.default_input_config()?;
        log::info!("Audio config: {:?}", config);

        let channels = config.channels() as usize;
        let ring = SampleRing::new(config.sample_rate().0, ring_seconds);

        let sample_format = config.sample_format();
        log::info!("Sample format: {:?}", sample_format);

        let err_fn = |err: cpal::StreamError| log::error!("Audio stream error: {}", err);
        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                let ring = ring.clone_ref();
                device.build_input_stream(
                    &config.into(),
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        write_input_samples(data, channels, &ring);
                    },
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::I16 => {
                let ring = ring.clone_ref();
                device.build_input_stream(
                    &config.into(),
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        write_input_samples(data, channels, &ring);
                    },
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::U16 => {
                let ring = ring.clone_ref();
                device.build_input_stream(
                    &config.into(),
                    move |data: &[u16], _: &cpal::InputCallbackInfo| {
                        write_input_samples(data, channels, &ring);
                    },
                    err_fn,
                    None,
                )?
            }
            format => return Err(CaptureError::UnsupportedFormat(format)),
        };

        stream.play()?;
        Ok((stream, ring))
    }

    /// Stop capturing; the last ring keeps its contents
    pub fn stop(&mut self) {
        self.stream = None;
        self.status = "Microphone closed".to_string();
        log::info!("Audio capture stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_channel() {
        let ring = SampleRing::with_capacity(48_000, 8);
        let stereo = [0.25f32, -1.0, 0.5, -1.0, 0.75, -1.0];
        write_input_samples(&stereo, 2, &ring);

        assert_eq!(ring.sample_ix(), 3);
        assert_eq!(ring.read(0), 0.25);
        assert_eq!(ring.read(1), 0.5);
        assert_eq!(ring.read(2), 0.75);
    }

    #[test]
    fn test_converts_integer_formats() {
        let ring = SampleRing::with_capacity(48_000, 4);
        write_input_samples(&[i16::MIN, 0i16], 1, &ring);
        assert_eq!(ring.read(0), -1.0);
        assert_eq!(ring.read(1), 0.0);

        write_input_samples(&[32_768u16], 1, &ring);
        assert_eq!(ring.read(2), 0.0);
    }

    #[test]
    fn test_new_capture_is_idle() {
        let capture = AudioCapture::new();
        assert!(!capture.is_running());
    }
}
