//! spectro-rs - Live Spectrogram
//!
//! This application turns live microphone input into scrolling
//! time/frequency images.
//!
//! ## Layout
//! - Four spectrogram boxes (`a`-`d`) in a 2×2 grid; `shuffle` moves the splits
//! - A command line at the bottom; type `mic` to start listening
//!
//! Each frame, every box observes its on-screen width, computes the
//! columns that became due since the previous frame, and repaints.

use eframe::egui;

mod audio;
mod command;
mod dsp;
mod render;
mod settings;
mod spectrogram;

use audio::{AudioCapture, SampleRing};
use command::{BoxAction, Command, BOX_NAMES};
use render::{GridSplits, SpectrogramView};
use settings::AppSettings;
use spectrogram::Spectrogram;

/// Sample rate of the silent ring shown before the microphone opens
const PLACEHOLDER_SAMPLE_RATE: u32 = 48_000;

/// Space between boxes in points
const BOX_GAP: f32 = 2.0;

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting spectro-rs");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("spectro-rs"),
        ..Default::default()
    };

    eframe::run_native(
        "spectro-rs",
        options,
        Box::new(|cc| Ok(Box::new(SpectroApp::new(cc)))),
    )
}

/// One spectrogram and the widget that draws it
struct VizBox {
    spectrogram: Spectrogram,
    view: SpectrogramView,
}

/// Main application state
struct SpectroApp {
    capture: AudioCapture,
    ring_seconds: f32,
    boxes: Vec<VizBox>,
    splits: GridSplits,

    command_input: String,
    status: String,
}

impl SpectroApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();

        // Silent until the microphone is opened
        let ring = SampleRing::new(PLACEHOLDER_SAMPLE_RATE, settings.ring_seconds);

        let boxes = BOX_NAMES
            .iter()
            .zip(&settings.boxes)
            .map(|(name, box_settings)| {
                let mut spectrogram = Spectrogram::new(ring.clone_ref(), box_settings.layout);
                box_settings.apply(&mut spectrogram);
                VizBox {
                    spectrogram,
                    view: SpectrogramView::new(name),
                }
            })
            .collect();

        Self {
            capture: AudioCapture::new(),
            ring_seconds: settings.ring_seconds,
            boxes,
            splits: GridSplits::default(),
            command_input: String::new(),
            status: "Type 'mic' to start".to_string(),
        }
    }

    fn save_settings(&self) {
        AppSettings::from_spectrograms(
            self.ring_seconds,
            self.boxes.iter().map(|viz| &viz.spectrogram),
        )
        .save();
    }

    /// Start capture and point every box at the live ring
    fn open_mic(&mut self) {
        if self.capture.is_running() {
            return;
        }
        if let Ok(ring) = self.capture.start(self.ring_seconds) {
            for viz in &mut self.boxes {
                viz.spectrogram.set_ring(ring.clone_ref());
            }
        }
    }

    fn run_command(&mut self, ctx: &egui::Context, input: &str) {
        match command::parse(input) {
            Ok(command) => {
                self.apply(ctx, command);
                self.save_settings();
            }
            Err(e) => {
                log::warn!("Rejected command '{}': {}", input, e);
                self.status = format!("'{}': {}", input, e);
            }
        }
    }

    fn apply(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::Fullscreen => ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true)),
            Command::OpenMic => self.open_mic(),
            Command::CloseMic => self.capture.stop(),
            Command::Shuffle => {
                self.splits = GridSplits::shuffled(&mut rand::thread_rng());
                log::info!("Grid splits set to {:?}", self.splits);
                self.status = format!(
                    "Splits {:.0}% / {:.0}% / {:.0}%",
                    self.splits.top * 100.0,
                    self.splits.bottom * 100.0,
                    self.splits.vertical * 100.0
                );
            }
            Command::Box { index, action } => {
                let name = BOX_NAMES[index];
                let spectrogram = &mut self.boxes[index].spectrogram;
                self.status = match action {
                    BoxAction::Show => {
                        spectrogram.set_visible(true);
                        spectrogram.set_looping(false);
                        format!("{}: on", name)
                    }
                    BoxAction::Hide => {
                        spectrogram.set_visible(false);
                        format!("{}: off", name)
                    }
                    BoxAction::Loop => {
                        spectrogram.set_looping(true);
                        format!("{}: looping", name)
                    }
                    BoxAction::WindowExponent(exponent) => {
                        let size = spectrogram.set_window_exponent(exponent);
                        format!("{}: {}-sample window", name, size)
                    }
                    BoxAction::Gain(gain) => {
                        spectrogram.set_gain(gain);
                        format!("{}: gain {}", name, gain)
                    }
                    BoxAction::Period(seconds) => {
                        spectrogram.set_period(seconds);
                        format!("{}: {}s period", name, seconds)
                    }
                    BoxAction::Rgb(color) => {
                        spectrogram.set_rgb(color);
                        format!("{}: rgb {} {} {}", name, color[0], color[1], color[2])
                    }
                    BoxAction::Layout(layout) => {
                        spectrogram.set_layout(layout);
                        format!("{}: {} layout", name, layout.name())
                    }
                };
            }
        }
    }
}

impl eframe::App for SpectroApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();

        // Command line
        egui::TopBottomPanel::bottom("command_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.command_input)
                        .hint_text("mic | a fft 12 | b period 2")
                        .desired_width(260.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    let input = std::mem::take(&mut self.command_input);
                    self.run_command(ctx, &input);
                    response.request_focus();
                }

                ui.separator();
                ui.label(&self.capture.status);
                ui.separator();
                ui.label(&self.status);
            });
        });

        // Spectrogram grid
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let full = ui.available_rect_before_wrap();
                let rects = self.splits.box_rects(full, BOX_GAP);

                for (viz, rect) in self.boxes.iter_mut().zip(rects) {
                    viz.spectrogram.resize(rect.width().round() as usize);
                    let report = viz.spectrogram.update();
                    if report.computed > 0 {
                        log::trace!("{}: {} new columns", viz.view.name(), report.computed);
                    }
                    viz.view.paint(ui, rect, &viz.spectrogram, &report);
                }

                ui.allocate_rect(full, egui::Sense::hover());
            });
    }
}
