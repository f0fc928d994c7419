//! Audio module - live input and sample buffering
//!
//! This module provides:
//! - Sample ring shared between the capture thread and the render loop
//! - Capture engine for cpal microphone input

mod capture;
mod ring;

// Re-export public types
pub use capture::{AudioCapture, CaptureError};
pub use ring::{SampleRing, SampleSource};
