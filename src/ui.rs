//! UI layer
//! -----------------------
//! Top bar:
//!   • Run / Pause (disabled once the walk settles)
//!   • Restart (re-seeds the start point and clears the canvas)
//!   • Fixed-width progress readout
//!   • Stats window toggle
//!
//! Central panel:
//!   • The 800×800 chaos canvas, aspect-fit, over the dark clear color.
//!
//! Stats window (floating):
//!   • Monospace, fixed-width columns to avoid jitter
//!   • Progress bar plus points/sec over a half-second window

use eframe::{egui, egui::ColorImage};
use egui::{Context, Margin, TextureHandle, TextureOptions, Vec2};
use std::time::{Duration, Instant};

use crate::engine::{ChaosEngine, ChaosStats, CANVAS_DIM};

/// Clear color behind the canvas.
const CLEAR_COLOR: egui::Color32 = egui::Color32::from_rgb(0x1C, 0x0D, 0x0D);

/// Main egui app.
pub struct ChaosApp {
    // Core engine
    engine: ChaosEngine,

    // Canvas texture (engine output) and the last generation uploaded to GPU.
    canvas_texture: Option<TextureHandle>,
    last_uploaded_generation: u64,

    // Whether the walk advances each frame.
    running: bool,

    // HUD options
    show_stats_window: bool,

    // Half-second window for the points/sec readout.
    window_started_at: Instant,
    points_at_window_start: u64,
    points_per_second: f32,
}

/// Fit an image of size (img_w, img_h) inside the available area while preserving aspect.
fn fit_image_inside(available: Vec2, img_w: usize, img_h: usize) -> Vec2 {
    if img_w == 0 || img_h == 0 {
        return Vec2::ZERO;
    }
    let aw = available.x.max(1.0);
    let ah = available.y.max(1.0);
    let iw = img_w as f32;
    let ih = img_h as f32;
    let scale = (aw / iw).min(ah / ih);
    Vec2::new((iw * scale).floor(), (ih * scale).floor())
}

impl ChaosApp {
    /// Constructor used by `main.rs`: takes an already-created engine.
    pub fn new(engine: ChaosEngine) -> Self {
        Self {
            engine,
            canvas_texture: None,
            // Force the first frame to upload whatever the engine holds.
            last_uploaded_generation: u64::MAX,
            running: true,
            show_stats_window: true,
            window_started_at: Instant::now(),
            points_at_window_start: 0,
            points_per_second: 0.0,
        }
    }

    // -----------------------------
    // Textures & drawing helpers
    // -----------------------------

    /// Upload the engine canvas to a texture when the generation changes.
    fn maybe_upload_canvas(&mut self, ctx: &Context) {
        let (pixels_rgb, w, h, generation) = self.engine.capture_snapshot();
        if generation == self.last_uploaded_generation {
            return; // nothing new to upload this frame
        }

        let color_img = ColorImage::from_rgb([w, h], &pixels_rgb);
        match &mut self.canvas_texture {
            Some(tex) => tex.set(color_img, TextureOptions::NEAREST),
            None => {
                let tex = ctx.load_texture("canvas", color_img, TextureOptions::NEAREST);
                self.canvas_texture = Some(tex);
            }
        }
        self.last_uploaded_generation = generation;
    }

    /// Draw one texture with aspect fit inside the current `ui`.
    fn draw_image_aspect_fit(ui: &mut egui::Ui, tex: &TextureHandle, img_w: usize, img_h: usize) {
        let available = ui.available_size();
        let size = fit_image_inside(available, img_w, img_h);
        if size != Vec2::ZERO {
            let image = egui::Image::new(tex).fit_to_exact_size(size);
            ui.add(image);
        } else {
            ui.label("No content");
        }
    }

    /// Flush the points/sec window every half second.
    fn refresh_rate_window(&mut self, stats: &ChaosStats) {
        let elapsed = self.window_started_at.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            // saturating: a restart drops points_plotted back to zero
            let plotted = stats.points_plotted.saturating_sub(self.points_at_window_start);
            self.points_per_second = plotted as f32 / elapsed.max(0.001);
            self.points_at_window_start = stats.points_plotted;
            self.window_started_at = Instant::now();
        }
    }

    // -----------------------------
    // Bars & windows
    // -----------------------------

    /// Top bar with the run controls and a fixed-width progress readout.
    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let settled = self.engine.is_settled();

            ui.add_enabled_ui(!settled, |ui| {
                let btn_label = if self.running { "⏸ Pause" } else { "▶ Run" };
                if ui.button(btn_label).clicked() {
                    self.running = !self.running;
                }
            });

            if ui
                .button("↺ Restart")
                .on_hover_text("Draw a fresh start point and clear the canvas")
                .clicked()
            {
                self.engine.reset();
                // Force re-upload of the blank canvas even while paused.
                self.last_uploaded_generation = u64::MAX;
            }

            ui.separator();

            // Fixed-width readout prevents jitter.
            let stats = self.engine.capture_stats_snapshot();
            ui.monospace(format!(
                "{:>5.1}%  remaining: {:>9}",
                stats.progress_percent(),
                self.engine.remaining_iterations()
            ));
            if settled {
                ui.colored_label(egui::Color32::from_rgb(50, 200, 50), "settled");
            }

            ui.separator();

            ui.checkbox(&mut self.show_stats_window, "📊 Show Stats");
        });
    }

    /// Content for the floating stats window.
    fn stats_window_content(&mut self, ui: &mut egui::Ui) {
        let stats: ChaosStats = self.engine.capture_stats_snapshot();

        ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);

        // --- State indicator ---
        ui.horizontal(|ui| {
            ui.label("State:");
            let (text, color) = if self.engine.is_settled() {
                ("Settled", egui::Color32::from_rgb(50, 200, 50))
            } else if self.running {
                ("Generating", egui::Color32::GRAY)
            } else {
                ("Paused", egui::Color32::from_rgb(255, 165, 0))
            };
            ui.colored_label(color, text);
        });

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        ui.heading("Walk");
        ui.separator();

        let point = self.engine.current_point();
        ui.label(format!("Point:         ({:>3}, {:>3})", point.x, point.y));
        ui.label(format!("Points plotted:{:>12}", stats.points_plotted));
        ui.label(format!("Remaining:     {:>12}", stats.remaining_iterations));
        ui.label(format!("Batches:       {:>12}", stats.batches));

        ui.add_space(12.0);

        ui.heading("Performance");
        ui.separator();

        ui.label(format!("Points/sec:    {:>8.0}", self.points_per_second));

        ui.add_space(12.0);

        ui.add(
            egui::ProgressBar::new(stats.progress_percent() / 100.0)
                .show_percentage(),
        );
    }
}

impl eframe::App for ChaosApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Advance the walk one batch per displayed frame, then upload the
        // latest canvas (if the generation advanced) before painting UI.
        if self.running {
            self.engine.step_batch();
        }
        let stats = self.engine.capture_stats_snapshot();
        self.refresh_rate_window(&stats);
        self.maybe_upload_canvas(ctx);

        // ---------- Top bar ----------
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.top_bar(ui);
        });

        // ---------- Central panel ----------
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(CLEAR_COLOR)
                    .inner_margin(Margin::symmetric(4.0, 4.0)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    if let Some(tex) = &self.canvas_texture {
                        Self::draw_image_aspect_fit(ui, tex, CANVAS_DIM, CANVAS_DIM);
                    } else {
                        ui.centered_and_justified(|ui| ui.label("Canvas (no content yet)"));
                    }
                });
            });

        // ---------- Floating Stats Window ----------
        if self.show_stats_window {
            egui::Window::new("📊 Statistics")
                .default_pos([10.0, 60.0])
                .default_size([320.0, 240.0])
                .resizable(true)
                .collapsible(true)
                .show(ctx, |ui| {
                    self.stats_window_content(ui);
                });
        }

        // Keep repainting so generation advances without input events.
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
