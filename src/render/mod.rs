//! Render module - UI components for visualization
//!
//! This module provides:
//! - Spectrogram display widget
//! - Grid splits placing the four boxes

mod grid;
mod spectrogram_view;

pub use grid::GridSplits;
pub use spectrogram_view::SpectrogramView;
