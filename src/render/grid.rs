//! Placement of the four boxes inside the central panel
//!
//! Boxes `a` and `b` share the top row, `c` and `d` the bottom row. Each row
//! has its own split point, and a third split sets the height of the top
//! row. `shuffle` moves all three, which resizes every box and makes the
//! spectrograms remap their histories.

use eframe::egui::{pos2, vec2, Rect};
use rand::Rng;

/// Split points as fractions of the panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSplits {
    /// Share of the top row taken by box `a`
    pub top: f32,
    /// Share of the bottom row taken by box `c`
    pub bottom: f32,
    /// Share of the height taken by the top row
    pub vertical: f32,
}

impl Default for GridSplits {
    fn default() -> Self {
        Self {
            top: 0.5,
            bottom: 0.5,
            vertical: 0.5,
        }
    }
}

impl GridSplits {
    /// Random whole-percent splits
    ///
    /// Row splits fall in 25..=75% and differ by at least 20 points so the
    /// rows never line up; the top row takes 15..=85% of the height.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (top, bottom) = loop {
            let top: u32 = rng.gen_range(25..=75);
            let bottom: u32 = rng.gen_range(25..=75);
            if top.abs_diff(bottom) >= 20 {
                break (top, bottom);
            }
        };
        let vertical: u32 = rng.gen_range(15..=85);

        Self {
            top: top as f32 / 100.0,
            bottom: bottom as f32 / 100.0,
            vertical: vertical as f32 / 100.0,
        }
    }

    /// Rects of boxes `a`-`d` inside `full`, `gap` points apart
    pub fn box_rects(&self, full: Rect, gap: f32) -> [Rect; 4] {
        let top_height = ((full.height() - gap) * self.vertical).max(0.0);
        let bottom_height = (full.height() - gap - top_height).max(0.0);

        let row = |y: f32, height: f32, split: f32| {
            let left = ((full.width() - gap) * split).max(0.0);
            let right = (full.width() - gap - left).max(0.0);
            [
                Rect::from_min_size(pos2(full.min.x, y), vec2(left, height)),
                Rect::from_min_size(pos2(full.min.x + left + gap, y), vec2(right, height)),
            ]
        };

        let [a, b] = row(full.min.y, top_height, self.top);
        let [c, d] = row(full.min.y + top_height + gap, bottom_height, self.bottom);
        [a, b, c, d]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SampleRing;
    use crate::spectrogram::{LayoutKind, Spectrogram};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn panel() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(802.0, 602.0))
    }

    #[test]
    fn test_default_is_even() {
        let rects = GridSplits::default().box_rects(panel(), 2.0);
        for rect in rects {
            assert_eq!(rect.width(), 400.0);
            assert_eq!(rect.height(), 300.0);
        }
        assert_eq!(rects[1].min, pos2(402.0, 0.0));
        assert_eq!(rects[2].min, pos2(0.0, 302.0));
        assert_eq!(rects[3].max, pos2(802.0, 602.0));
    }

    #[test]
    fn test_shuffled_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let splits = GridSplits::shuffled(&mut rng);
            assert!((0.25..=0.75).contains(&splits.top));
            assert!((0.25..=0.75).contains(&splits.bottom));
            assert!((splits.top - splits.bottom).abs() >= 0.2 - 1e-6);
            assert!((0.15..=0.85).contains(&splits.vertical));
        }
    }

    #[test]
    fn test_rows_split_independently() {
        let splits = GridSplits {
            top: 0.25,
            bottom: 0.75,
            vertical: 0.5,
        };
        let [a, b, c, d] = splits.box_rects(panel(), 2.0);
        assert_eq!(a.width(), 200.0);
        assert_eq!(b.width(), 600.0);
        assert_eq!(c.width(), 600.0);
        assert_eq!(d.width(), 200.0);
    }

    #[test]
    fn test_moving_a_split_resizes_the_history() {
        let ring = SampleRing::with_capacity(1000, 4000);
        let mut spectrogram = Spectrogram::new(ring, LayoutKind::Continuous);
        spectrogram.set_window_exponent(6);

        let even = GridSplits::default().box_rects(panel(), 2.0);
        spectrogram.resize(even[0].width().round() as usize);
        assert_eq!(spectrogram.history().width(), 400);

        let moved = GridSplits {
            top: 0.3,
            ..GridSplits::default()
        };
        let rects = moved.box_rects(panel(), 2.0);
        spectrogram.resize(rects[0].width().round() as usize);
        assert_eq!(spectrogram.history().width(), 240);
    }
}
