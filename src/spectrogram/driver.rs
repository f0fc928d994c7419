//! Per-refresh update driver and live reconfiguration
//!
//! A `Spectrogram` owns one FFT engine, one spectral history and the cursor
//! separating computed columns from due ones. Once per display refresh the
//! render loop calls `update()`, which snapshots the sample ring, works out
//! which columns became due since the last refresh and transforms one
//! window per column.
//!
//! ## Cursor strategies
//!
//! - `Columns`: the history spans the whole ring. Each column has a fixed
//!   window end position inside the ring, and the cursor is the first column
//!   whose window is not complete yet. When the write position falls behind
//!   the cursor column's window end, the ring has lapped and the scan for the
//!   new cursor restarts from column 0.
//! - `Continuous`: the history spans `period_seconds`, one column per
//!   display pixel, and the cursor follows the cumulative sample count.
//!   A gap of a full period or more recomputes every column from the latest
//!   period of audio.
//!
//! Reconfiguration (window size, period, display width, layout) reallocates
//! the history and remaps the old contents into it.

use crate::audio::SampleRing;
use crate::dsp::{FftError, InplaceFft, MAX_FFT_EXPONENT, MIN_FFT_EXPONENT};

use super::history::{remap, LayoutKind, SpectralHistory};

/// 8192-sample windows
pub const DEFAULT_FFT_EXPONENT: u32 = 13;
pub const DEFAULT_GAIN: f32 = 100.0;
pub const DEFAULT_PERIOD_SECONDS: f32 = 4.0;
/// Shortest period accepted from the command line or settings file
pub const MIN_PERIOD_SECONDS: f32 = 0.1;
/// Upper bound on `columns × bins` of one history (16 MiB of `f32`)
const MAX_HISTORY_CELLS: usize = 1 << 22;
/// RGB weights in percent
pub const DEFAULT_COLOR: [f32; 3] = [100.0, 25.0, 25.0];

/// What a single `update()` did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Number of columns transformed during this refresh
    pub computed: usize,
    /// Column the next refresh will continue from
    pub cursor_column: usize,
}

enum Cursor {
    Columns {
        /// Ring position at which each column's window ends
        due_sample_ixs: Vec<i64>,
        /// Next column to compute; `due_sample_ixs.len()` once the lap is done
        last_column: usize,
    },
    Continuous {
        /// Cumulative sample count seen by the previous refresh
        last_sample_ix: u64,
    },
}

/// Window end position of every column when `columns` columns share a ring
/// of `total_samples`
fn due_sample_ixs(columns: usize, total_samples: usize, half_fft_size: usize) -> Vec<i64> {
    let samples_per_column = total_samples as f64 / columns as f64;
    (0..columns)
        .map(|column| {
            ((column as f64 + 0.5) * samples_per_column).round() as i64 + half_fft_size as i64
        })
        .collect()
}

/// Index of the first column whose window has not fully arrived at `pos`
///
/// Returns `due.len()` when every window from the cursor onwards is complete.
fn latest_column(due: &[i64], last_column: usize, pos: i64) -> usize {
    if due.is_empty() {
        return 0;
    }

    // Write position behind the cursor means the ring lapped
    let mut column = match due.get(last_column) {
        Some(&end) if pos >= end => last_column,
        _ => 0,
    };

    for _ in 0..due.len() {
        if pos <= due[column] {
            return column;
        }
        column = (column + 1) % due.len();
    }
    due.len()
}

/// A live spectrogram over a shared sample ring
pub struct Spectrogram {
    ring: SampleRing,
    layout: LayoutKind,
    fft: InplaceFft,
    history: Box<dyn SpectralHistory>,
    cursor: Cursor,

    /// Observed width of the render target in pixels (0 = not observed yet)
    display_width: usize,
    period_seconds: f32,
    gain: f32,
    color: [f32; 3],
    visible: bool,
    looping: bool,
}

impl Spectrogram {
    /// Create a silent spectrogram with default parameters
    ///
    /// The history stays empty until the first `resize()`.
    pub fn new(ring: SampleRing, layout: LayoutKind) -> Self {
        let fft = InplaceFft::from_exponent(DEFAULT_FFT_EXPONENT);
        let history = layout.allocate(0, fft.half_size());
        let last_sample_ix = ring.sample_ix();

        let mut spectrogram = Self {
            ring,
            layout,
            fft,
            history,
            cursor: Cursor::Continuous { last_sample_ix },
            display_width: 0,
            period_seconds: DEFAULT_PERIOD_SECONDS,
            gain: DEFAULT_GAIN,
            color: DEFAULT_COLOR,
            visible: true,
            looping: false,
        };
        spectrogram.reset_cursor(true);
        spectrogram
    }

    /// Number of history columns implied by the current geometry
    fn column_count(&self) -> usize {
        if self.display_width == 0 {
            return 0;
        }
        let columns = match self.layout {
            LayoutKind::Columns => {
                let ratio = self.ring.seconds() as f64 / self.period_seconds as f64;
                (self.display_width as f64 * ratio).round() as usize
            }
            LayoutKind::Continuous => self.display_width,
        };

        // At most one column per ring sample and a bounded allocation
        let limit = (MAX_HISTORY_CELLS / self.fft.half_size().max(1))
            .min(self.ring.capacity())
            .max(1);
        if columns > limit {
            log::warn!("Capping spectral history at {} columns (wanted {})", limit, columns);
        }
        columns.clamp(1, limit)
    }

    /// Samples covered by one pass across the continuous history
    fn samples_per_period(&self) -> u64 {
        ((self.period_seconds as f64 * self.ring.sample_rate() as f64).round() as u64).max(1)
    }

    fn reset_cursor(&mut self, keep_sample_ix: bool) {
        self.cursor = match self.layout {
            LayoutKind::Columns => Cursor::Columns {
                due_sample_ixs: due_sample_ixs(
                    self.history.width(),
                    self.ring.capacity(),
                    self.fft.half_size(),
                ),
                last_column: 0,
            },
            LayoutKind::Continuous => {
                let last_sample_ix = match self.cursor {
                    Cursor::Continuous { last_sample_ix } if keep_sample_ix => last_sample_ix,
                    _ => self.ring.sample_ix(),
                };
                Cursor::Continuous { last_sample_ix }
            }
        };
    }

    /// Allocate a history for the current geometry and remap the old one into it
    fn reallocate(&mut self, keep_sample_ix: bool) {
        let width = self.column_count();
        let bins = self.fft.half_size();

        let mut history = self.layout.allocate(width, bins);
        remap(self.history.as_ref(), history.as_mut());
        log::debug!(
            "Spectral history {}x{} -> {}x{} ({})",
            self.history.width(),
            self.history.bins(),
            width,
            bins,
            self.layout.name()
        );

        self.history = history;
        self.reset_cursor(keep_sample_ix);
    }

    /// Switch to a new sample ring, e.g. once capture has started
    pub fn set_ring(&mut self, ring: SampleRing) {
        self.ring = ring;
        self.reallocate(false);
    }

    /// Observe the render target width
    ///
    /// A change remaps the history along the time axis.
    pub fn resize(&mut self, display_width: usize) {
        if display_width == self.display_width {
            return;
        }
        self.display_width = display_width;
        self.reallocate(true);
    }

    /// Set the window size from a base-2 exponent, clamped to [6, 14]
    ///
    /// # Returns
    /// The resulting window size in samples
    pub fn set_window_exponent(&mut self, exponent: i64) -> usize {
        let exponent = exponent.clamp(MIN_FFT_EXPONENT as i64, MAX_FFT_EXPONENT as i64) as u32;
        self.install_fft(InplaceFft::from_exponent(exponent));
        self.fft.size()
    }

    /// Set the window size directly
    ///
    /// # Errors
    /// `FftError::InvalidSize` if `size` is not a power of two and
    /// `FftError::OutOfRange` outside `2^6..=2^14`. The spectrogram is left
    /// unchanged in either case.
    pub fn set_fft_size(&mut self, size: usize) -> Result<(), FftError> {
        let (min, max) = (1 << MIN_FFT_EXPONENT, 1 << MAX_FFT_EXPONENT);
        if !(min..=max).contains(&size) {
            return Err(FftError::OutOfRange { size, min, max });
        }
        let fft = InplaceFft::new(size)?;
        self.install_fft(fft);
        Ok(())
    }

    fn install_fft(&mut self, fft: InplaceFft) {
        let resized = fft.size() != self.fft.size();
        self.fft = fft;
        if resized {
            log::info!("FFT size set to {}", self.fft.size());
            self.reallocate(true);
        }
    }

    /// Set how many seconds one pass across the display covers
    ///
    /// `seconds` must be positive; callers validate it against
    /// `MIN_PERIOD_SECONDS`.
    pub fn set_period(&mut self, seconds: f32) {
        debug_assert!(seconds > 0.0, "period must be positive");
        self.period_seconds = seconds;
        log::info!("Period set to {}s", seconds);
        self.reallocate(true);
    }

    /// Scale samples before the transform; applies to new columns only
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
        log::info!("Gain set to {}", gain);
    }

    pub fn set_rgb(&mut self, color: [f32; 3]) {
        self.color = color;
    }

    /// Hiding clears the history and stops recomputation until shown again
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.history.clear();
        }
        log::info!("Visibility set to {}", visible);
    }

    /// Looping freezes the history while the cursor keeps moving
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        log::info!("Looping set to {}", looping);
    }

    pub fn set_layout(&mut self, layout: LayoutKind) {
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        log::info!("Layout set to {}", layout.name());
        self.reallocate(false);
    }

    /// Compute every column that became due since the previous refresh
    pub fn update(&mut self) -> UpdateReport {
        let width = self.history.width();
        if width == 0 {
            return UpdateReport::default();
        }

        let compute = self.visible && !self.looping;
        let fft_size = self.fft.size() as i64;
        let samples_per_period = self.samples_per_period();

        match &mut self.cursor {
            Cursor::Columns {
                due_sample_ixs,
                last_column,
            } => {
                let pos = self.ring.write_pos() as i64;
                let end = latest_column(due_sample_ixs, *last_column, pos);

                let mut computed = 0;
                if compute {
                    let wrapped = end < *last_column;
                    let tail = *last_column..if wrapped { width } else { end };
                    let head = 0..if wrapped { end } else { 0 };
                    for column in tail.chain(head) {
                        let start = due_sample_ixs[column] - fft_size;
                        self.fft
                            .forward(&self.ring, start, self.gain, self.history.column_mut(column));
                        computed += 1;
                    }
                }
                *last_column = end;

                UpdateReport {
                    computed,
                    cursor_column: end % width,
                }
            }
            Cursor::Continuous { last_sample_ix } => {
                let curr = self.ring.sample_ix();
                let prev = (*last_sample_ix).min(curr);
                *last_sample_ix = curr;

                let w = width as u128;
                let n = samples_per_period as u128;
                let abs_prev = (prev as u128 * w / n) as u64;
                let abs_curr = (curr as u128 * w / n) as u64;
                let cursor_column = (abs_curr % width as u64) as usize;

                if !compute {
                    return UpdateReport {
                        computed: 0,
                        cursor_column,
                    };
                }

                let due = abs_curr - abs_prev;
                let mut first = if due >= width as u64 {
                    log::debug!("Spectrogram fell {} columns behind, recomputing all", due);
                    abs_curr - width as u64
                } else {
                    abs_prev
                };

                // Skip columns whose window has already been overwritten
                let oldest_end = curr as i128 - self.ring.capacity() as i128 + fft_size as i128;
                if oldest_end > 0 {
                    let w = w as i128;
                    let n = n as i128;
                    let oldest_column = ((oldest_end * w + n - 1) / n - 1) as u64;
                    first = first.max(oldest_column).min(abs_curr);
                }
                let count = (abs_curr - first) as usize;

                // Absolute column `a` is due once the count reaches its right edge
                for a in first..abs_curr {
                    let column = (a % width as u64) as usize;
                    let end = ((a + 1) as u128 * n / w) as i64;
                    self.fft.forward(
                        &self.ring,
                        end - fft_size,
                        self.gain,
                        self.history.column_mut(column),
                    );
                }

                UpdateReport {
                    computed: count,
                    cursor_column,
                }
            }
        }
    }

    pub fn history(&self) -> &dyn SpectralHistory {
        self.history.as_ref()
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn fft_size(&self) -> usize {
        self.fft.size()
    }

    pub fn display_width(&self) -> usize {
        self.display_width
    }

    pub fn period_seconds(&self) -> f32 {
        self.period_seconds
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 kHz, one second ring
    fn test_ring() -> SampleRing {
        SampleRing::with_capacity(1000, 1000)
    }

    /// 10 columns over one second with 64-sample windows and unit gain
    fn small(ring: &SampleRing, layout: LayoutKind) -> Spectrogram {
        let mut spectrogram = Spectrogram::new(ring.clone_ref(), layout);
        spectrogram.set_window_exponent(6);
        spectrogram.set_period(1.0);
        spectrogram.set_gain(1.0);
        spectrogram.resize(10);
        spectrogram
    }

    fn all_zero(spectrogram: &Spectrogram) -> bool {
        let history = spectrogram.history();
        (0..history.width()).all(|c| history.column(c).iter().all(|&m| m == 0.0))
    }

    #[test]
    fn test_due_sample_ixs() {
        assert_eq!(due_sample_ixs(4, 1000, 32), vec![157, 407, 657, 907]);
    }

    #[test]
    fn test_latest_column_scans_forward() {
        let due = [82, 182, 282, 382];
        assert_eq!(latest_column(&due, 0, 0), 0);
        assert_eq!(latest_column(&due, 0, 300), 3);
        assert_eq!(latest_column(&due, 1, 182), 1);
        // Lapped: position is behind the cursor's window end
        assert_eq!(latest_column(&due, 3, 100), 1);
        assert_eq!(latest_column(&[], 0, 100), 0);
    }

    #[test]
    fn test_latest_column_scan_is_bounded() {
        // Position past every window end must not spin forever
        let due = [10, 20, 30];
        assert_eq!(latest_column(&due, 0, 500), 3);
        assert_eq!(latest_column(&due, 2, 31), 3);
    }

    #[test]
    fn test_columns_completes_lap_past_last_window() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);

        // Window ends are 82 ... 982; position 990 has passed all of them
        ring.write_block(&[1.0; 990]);
        let report = spectrogram.update();
        assert_eq!(report.computed, 10);
        assert_eq!(report.cursor_column, 0);
        assert!((spectrogram.history().magnitude(9, 0) - 2.0).abs() < 1e-5);
        assert_eq!(spectrogram.update().computed, 0);

        // Next lap starts once the position falls behind column 0 again
        ring.write_block(&[1.0; 50]);
        assert_eq!(spectrogram.update().computed, 0);
        ring.write_block(&[1.0; 60]);
        let report = spectrogram.update();
        assert_eq!(report.computed, 1);
        assert_eq!(report.cursor_column, 1);
    }

    #[test]
    fn test_unobserved_geometry_is_a_no_op() {
        let ring = test_ring();
        let mut spectrogram = Spectrogram::new(ring.clone_ref(), LayoutKind::Continuous);
        ring.write_block(&[1.0; 500]);
        assert_eq!(spectrogram.update(), UpdateReport::default());
        assert_eq!(spectrogram.history().width(), 0);
    }

    #[test]
    fn test_no_audio_renders_silence() {
        for &layout in LayoutKind::all() {
            let ring = test_ring();
            let mut spectrogram = small(&ring, layout);
            spectrogram.update();
            assert!(all_zero(&spectrogram));
        }
    }

    #[test]
    fn test_continuous_computes_due_columns() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        assert_eq!(spectrogram.history().width(), 10);
        assert_eq!(spectrogram.history().bins(), 32);

        ring.write_block(&[0.5; 250]);
        let report = spectrogram.update();
        assert_eq!(report.computed, 2);
        assert_eq!(report.cursor_column, 2);

        // Nothing new arrived
        let report = spectrogram.update();
        assert_eq!(report.computed, 0);
        assert_eq!(report.cursor_column, 2);
    }

    #[test]
    fn test_continuous_wraps_around_display() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        ring.write_block(&[0.0; 850]);
        spectrogram.update();

        ring.write_block(&[0.0; 300]);
        let report = spectrogram.update();
        // Columns 8, 9, 0 became due
        assert_eq!(report.computed, 3);
        assert_eq!(report.cursor_column, 1);
    }

    #[test]
    fn test_continuous_full_lap_recomputes_every_column() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        ring.write_block(&[1.0; 1000]);

        let report = spectrogram.update();
        assert_eq!(report.computed, 10);
        // Ring is all ones: every window sees the DC-only signal
        let history = spectrogram.history();
        for c in 0..10 {
            assert!((history.magnitude(c, 0) - 2.0).abs() < 1e-5);
            assert!(history.magnitude(c, 5).abs() < 1e-4);
        }

        ring.write_block(&[0.0; 3500]);
        assert_eq!(spectrogram.update().computed, 10);
    }

    #[test]
    fn test_gain_scales_new_columns() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        ring.write_block(&[1.0; 1000]);
        spectrogram.set_gain(3.0);
        spectrogram.update();
        assert!((spectrogram.history().magnitude(4, 0) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_columns_computes_completed_windows() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);
        assert_eq!(spectrogram.history().width(), 10);

        // Window ends are 82, 182, ... 982
        ring.write_block(&[0.0; 300]);
        let report = spectrogram.update();
        assert_eq!(report.computed, 3);
        assert_eq!(report.cursor_column, 3);

        // Ring laps to position 100: columns 3..9 and 0 are due
        ring.write_block(&[0.0; 800]);
        let report = spectrogram.update();
        assert_eq!(report.computed, 8);
        assert_eq!(report.cursor_column, 1);
    }

    #[test]
    fn test_columns_reads_window_ending_at_due_index() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);
        ring.write_block(&[1.0; 950]);

        let report = spectrogram.update();
        assert_eq!(report.computed, 9);
        let history = spectrogram.history();
        for c in 0..9 {
            assert!((history.magnitude(c, 0) - 2.0).abs() < 1e-5);
        }
        // Window for column 9 ends at 982, not there yet
        assert_eq!(history.magnitude(9, 0), 0.0);
    }

    #[test]
    fn test_looping_freezes_history() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        spectrogram.set_looping(true);
        ring.write_block(&[1.0; 600]);

        let report = spectrogram.update();
        assert_eq!(report.computed, 0);
        assert_eq!(report.cursor_column, 6);
        assert!(all_zero(&spectrogram));

        // Resuming only computes what arrives afterwards
        spectrogram.set_looping(false);
        assert_eq!(spectrogram.update().computed, 0);
        ring.write_block(&[1.0; 100]);
        assert_eq!(spectrogram.update().computed, 1);
    }

    #[test]
    fn test_hidden_clears_and_suppresses() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);
        ring.write_block(&[1.0; 950]);
        spectrogram.update();
        assert!(!all_zero(&spectrogram));

        spectrogram.set_visible(false);
        assert!(all_zero(&spectrogram));
        ring.write_block(&[1.0; 20]);
        assert_eq!(spectrogram.update().computed, 0);
        assert!(all_zero(&spectrogram));
    }

    #[test]
    fn test_resize_remaps_time_axis() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        for c in 0..10 {
            spectrogram.history.set_magnitude(c, 0, c as f32);
        }

        spectrogram.resize(5);
        let history = spectrogram.history();
        assert_eq!(history.width(), 5);
        for i in 0..5 {
            assert_eq!(history.magnitude(i, 0), (2 * i) as f32);
        }
    }

    #[test]
    fn test_window_exponent_clamps_and_remaps_bins() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        for b in 0..32 {
            spectrogram.history.set_magnitude(0, b, b as f32);
        }

        assert_eq!(spectrogram.set_window_exponent(7), 128);
        let history = spectrogram.history();
        assert_eq!(history.bins(), 64);
        for b in 0..64 {
            assert_eq!(history.magnitude(0, b), (b / 2) as f32);
        }

        assert_eq!(spectrogram.set_window_exponent(20), 16384);
        assert_eq!(spectrogram.set_window_exponent(-3), 64);
        assert_eq!(spectrogram.fft_size(), 64);
    }

    #[test]
    fn test_invalid_fft_size_leaves_state_untouched() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);
        assert_eq!(
            spectrogram.set_fft_size(100),
            Err(FftError::InvalidSize { size: 100 })
        );
        assert_eq!(spectrogram.fft_size(), 64);
        assert_eq!(spectrogram.history().bins(), 32);

        assert_eq!(
            spectrogram.set_fft_size(1 << 20),
            Err(FftError::OutOfRange {
                size: 1 << 20,
                min: 64,
                max: 16384
            })
        );
        assert_eq!(spectrogram.fft_size(), 64);

        assert!(spectrogram.set_fft_size(256).is_ok());
        assert_eq!(spectrogram.history().bins(), 128);
    }

    #[test]
    fn test_period_changes_column_count() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);
        spectrogram.set_period(0.5);
        assert_eq!(spectrogram.history().width(), 20);

        let mut continuous = small(&ring, LayoutKind::Continuous);
        continuous.set_period(0.5);
        assert_eq!(continuous.history().width(), 10);
        ring.write_block(&[0.0; 250]);
        // Half-second period: 250 samples cross five columns
        assert_eq!(continuous.update().computed, 5);
    }

    #[test]
    fn test_column_count_is_bounded_by_ring() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);
        // 10 px × 1 s / 1 ms would be 10 000 columns over a 1000-sample ring
        spectrogram.set_period(0.001);
        assert_eq!(spectrogram.history().width(), 1000);

        ring.write_block(&[0.0; 2500]);
        assert!(spectrogram.update().computed <= 1000);
    }

    #[test]
    fn test_column_count_is_bounded_by_memory() {
        // 100 s ring at 1 kHz, 8192 bins per column
        let ring = SampleRing::with_capacity(1000, 100_000);
        let mut spectrogram = Spectrogram::new(ring.clone_ref(), LayoutKind::Columns);
        spectrogram.set_window_exponent(14);
        spectrogram.set_period(1.0);
        spectrogram.resize(100);

        // Uncapped this would be 100 × 100 = 10 000 columns
        let history = spectrogram.history();
        assert_eq!(history.width(), MAX_HISTORY_CELLS / 8192);
        assert_eq!(history.bins(), 8192);
    }

    #[test]
    fn test_continuous_catch_up_stays_inside_ring() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        // Two-second period over a one-second ring
        spectrogram.set_period(2.0);
        ring.write_block(&[1.0; 3000]);

        // Columns 5..9 of this pass ended before sample 2064 and are gone
        let report = spectrogram.update();
        assert_eq!(report.computed, 5);
        assert_eq!(report.cursor_column, 5);
        let history = spectrogram.history();
        for c in 0..5 {
            assert!((history.magnitude(c, 0) - 2.0).abs() < 1e-5);
        }
        for c in 5..10 {
            assert_eq!(history.magnitude(c, 0), 0.0);
        }
    }

    #[test]
    fn test_layout_switch_keeps_history() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Columns);
        ring.write_block(&[1.0; 950]);
        spectrogram.update();

        spectrogram.set_layout(LayoutKind::Continuous);
        assert_eq!(spectrogram.layout(), LayoutKind::Continuous);
        assert!((spectrogram.history().magnitude(3, 0) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_ring_restarts_cursor() {
        let ring = test_ring();
        let mut spectrogram = small(&ring, LayoutKind::Continuous);
        ring.write_block(&[0.0; 700]);
        spectrogram.update();

        let live = SampleRing::with_capacity(1000, 2000);
        spectrogram.set_ring(live.clone_ref());
        assert_eq!(spectrogram.update().computed, 0);
        live.write_block(&[0.0; 100]);
        assert_eq!(spectrogram.update().computed, 1);
    }
}
