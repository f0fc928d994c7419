//! Spectral history storage and geometry remapping
//!
//! A history is a grid of `width` columns × `bins` magnitudes. Two backends
//! implement the same `SpectralHistory` trait:
//!
//! - `ColumnHistory`: one vector per column, convenient for CPU drawing
//! - `FlatHistory`: one contiguous buffer addressed `column × bins + bin`,
//!   addressed like a 2-D texture
//!
//! `remap()` resamples any history onto any other with nearest-neighbour
//! lookup on both axes, so reconfiguration keeps what was already drawn.

use serde::{Deserialize, Serialize};

/// Read/write access to a grid of magnitudes indexed by (column, bin)
pub trait SpectralHistory {
    /// Number of columns along the time axis
    fn width(&self) -> usize;

    /// Number of magnitude bins per column
    fn bins(&self) -> usize;

    fn column(&self, column: usize) -> &[f32];

    fn column_mut(&mut self, column: usize) -> &mut [f32];

    fn magnitude(&self, column: usize, bin: usize) -> f32 {
        self.column(column)[bin]
    }

    fn set_magnitude(&mut self, column: usize, bin: usize, value: f32) {
        self.column_mut(column)[bin] = value;
    }

    /// Reset every magnitude to silence
    fn clear(&mut self) {
        for column in 0..self.width() {
            self.column_mut(column).fill(0.0);
        }
    }
}

/// One heap-allocated spectrum per column
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnHistory {
    columns: Vec<Vec<f32>>,
    bins: usize,
}

impl ColumnHistory {
    /// Create a silent history
    pub fn new(width: usize, bins: usize) -> Self {
        Self {
            columns: vec![vec![0.0; bins]; width],
            bins,
        }
    }
}

impl SpectralHistory for ColumnHistory {
    fn width(&self) -> usize {
        self.columns.len()
    }

    fn bins(&self) -> usize {
        self.bins
    }

    fn column(&self, column: usize) -> &[f32] {
        &self.columns[column]
    }

    fn column_mut(&mut self, column: usize) -> &mut [f32] {
        &mut self.columns[column]
    }
}

/// All columns packed into one buffer
#[derive(Clone, Debug, PartialEq)]
pub struct FlatHistory {
    data: Vec<f32>,
    width: usize,
    bins: usize,
}

impl FlatHistory {
    /// Create a silent history
    pub fn new(width: usize, bins: usize) -> Self {
        Self {
            data: vec![0.0; width * bins],
            width,
            bins,
        }
    }
}

impl SpectralHistory for FlatHistory {
    fn width(&self) -> usize {
        self.width
    }

    fn bins(&self) -> usize {
        self.bins
    }

    fn column(&self, column: usize) -> &[f32] {
        let start = column * self.bins;
        &self.data[start..start + self.bins]
    }

    fn column_mut(&mut self, column: usize) -> &mut [f32] {
        let start = column * self.bins;
        &mut self.data[start..start + self.bins]
    }

    fn clear(&mut self) {
        self.data.fill(0.0);
    }
}

/// Storage layout and cursor strategy of a spectrogram
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    /// One column per slot of the whole sample ring, each with a fixed
    /// window end position
    Columns,
    /// One column per display pixel, driven by the cumulative sample count
    Continuous,
}

impl LayoutKind {
    pub fn all() -> &'static [LayoutKind] {
        &[LayoutKind::Columns, LayoutKind::Continuous]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutKind::Columns => "columns",
            LayoutKind::Continuous => "continuous",
        }
    }

    /// Look up a layout by its command name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }

    /// Allocate a silent history with this layout's backend
    pub fn allocate(&self, width: usize, bins: usize) -> Box<dyn SpectralHistory> {
        match self {
            LayoutKind::Columns => Box::new(ColumnHistory::new(width, bins)),
            LayoutKind::Continuous => Box::new(FlatHistory::new(width, bins)),
        }
    }
}

/// Resample `old` onto the geometry of `new`
///
/// ```text
/// new[c][b] = old[floor(old_width × c / new_width)][floor(old_bins × b / new_bins)]
/// ```
///
/// An empty `old` (no columns or no bins) leaves `new` silent.
pub fn remap(old: &dyn SpectralHistory, new: &mut dyn SpectralHistory) {
    let (old_width, old_bins) = (old.width(), old.bins());
    let (new_width, new_bins) = (new.width(), new.bins());

    if old_width == 0 || old_bins == 0 {
        new.clear();
        return;
    }

    for column in 0..new_width {
        let old_column = old.column(old_width * column / new_width);
        let target = new.column_mut(column);
        for (bin, value) in target.iter_mut().enumerate() {
            *value = old_column[old_bins * bin / new_bins];
        }
    }
}
