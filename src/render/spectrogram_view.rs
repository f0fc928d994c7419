//! Spectrogram display widget
//!
//! Paints a spectral history into an egui texture every frame.
//!
//! ## Coordinate System
//!
//! - X is time. Continuous boxes wipe left to right, with the region just
//!   behind the cursor faded out; column boxes scroll, newest column at the
//!   right edge.
//! - Y is frequency, bin 0 at the bottom.
//!
//! Luminance is `magnitude × 8`, weighted per channel by the box colour
//! (in percent) and clamped to full brightness.

use eframe::egui::{self, Align2, Color32, ColorImage, FontId, Pos2, Rect, TextureOptions};

use crate::spectrogram::{LayoutKind, Spectrogram, UpdateReport};

/// Widest fade behind the continuous cursor, in pixels
const MAX_CURSOR_FADE: f32 = 64.0;

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Brightness of one channel
fn channel(magnitude: f32, weight: f32, fade: f32) -> u8 {
    let value = (magnitude * 8.0 * weight * 0.01).clamp(0.0, 1.0) * fade;
    (value * 255.0).round() as u8
}

/// Fade applied to pixel column `x` given the cursor position
fn cursor_fade(x: usize, cursor_x: usize, width: usize) -> f32 {
    let past_cursor_by = (x + width - cursor_x % width.max(1)) % width.max(1);
    let fade_width = MAX_CURSOR_FADE.min(width as f32 * 0.3);
    smoothstep(0.0, fade_width, past_cursor_by as f32)
}

/// History column shown at screen column `x` of a scrolling display
///
/// `cursor` is the next column to be computed, so the newest column is the
/// one just before it.
fn scrolling_column(x: usize, display_width: usize, cursor: usize, columns: usize) -> usize {
    let span = columns.min(display_width);
    let back = (display_width - 1 - x) * span / display_width;
    (cursor + 2 * columns - 1 - back) % columns
}

/// History bin shown at image row `y` (row 0 at the top)
fn row_bin(y: usize, height: usize, bins: usize) -> usize {
    (height - 1 - y) * bins / height
}

/// Spectrogram display widget
///
/// Holds the texture the history is uploaded into.
pub struct SpectrogramView {
    name: String,
    texture: Option<egui::TextureHandle>,
}

impl SpectrogramView {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            texture: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the image for the current history
    fn render_image(spectrogram: &Spectrogram, report: &UpdateReport, height: usize) -> ColorImage {
        let history = spectrogram.history();
        let width = spectrogram.display_width().max(1);
        let height = height.min(history.bins()).max(1);
        let mut image = ColorImage::new([width, height], Color32::BLACK);

        let columns = history.width();
        if columns == 0 || history.bins() == 0 || !spectrogram.is_visible() {
            return image;
        }

        let [r, g, b] = spectrogram.color();
        for x in 0..width {
            let (column, fade) = match spectrogram.layout() {
                LayoutKind::Continuous => {
                    (x.min(columns - 1), cursor_fade(x, report.cursor_column, width))
                }
                LayoutKind::Columns => {
                    (scrolling_column(x, width, report.cursor_column, columns), 1.0)
                }
            };

            let spectrum = history.column(column);
            for y in 0..height {
                let magnitude = spectrum[row_bin(y, height, spectrum.len())];
                image.pixels[y * width + x] = Color32::from_rgb(
                    channel(magnitude, r, fade),
                    channel(magnitude, g, fade),
                    channel(magnitude, b, fade),
                );
            }
        }

        image
    }

    /// Draw the spectrogram into `rect`
    ///
    /// # Arguments
    /// * `ui` - The egui UI context
    /// * `rect` - Area allocated for this box
    /// * `spectrogram` - Spectrogram to draw, already updated this frame
    /// * `report` - Result of this frame's update (for the cursor position)
    pub fn paint(
        &mut self,
        ui: &egui::Ui,
        rect: Rect,
        spectrogram: &Spectrogram,
        report: &UpdateReport,
    ) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::BLACK);

        let image = Self::render_image(spectrogram, report, rect.height().max(1.0) as usize);
        if let Some(texture) = &mut self.texture {
            texture.set(image, TextureOptions::NEAREST);
        } else {
            self.texture = Some(ui.ctx().load_texture(
                format!("spectrogram-{}", self.name),
                image,
                TextureOptions::NEAREST,
            ));
        }

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }

        let mut label = self.name.clone();
        if !spectrogram.is_visible() {
            label.push_str(" (off)");
        } else if spectrogram.is_looping() {
            label.push_str(" (loop)");
        }
        painter.text(
            rect.left_top() + egui::vec2(4.0, 2.0),
            Align2::LEFT_TOP,
            label,
            FontId::monospace(12.0),
            Color32::from_gray(140),
        );
    }
}
