//! egui renderer for the analysis window.

mod analysis_panel;
mod results_panel;
pub mod style;

use crate::config::AppSettings;
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, Margin, RichText, TextureHandle};
use std::time::Duration;

/// Smallest window size that keeps the result card readable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(560.0, 640.0);
/// Heading shown above the selection card.
pub const APP_HEADING: &str = "Medical Image Analysis";

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    /// Uploaded preview, keyed by the selection it was built from.
    preview_tex: Option<(u64, TextureHandle)>,
}

impl EguiApp {
    /// Create the app for already-loaded settings.
    pub fn new(settings: AppSettings) -> Result<Self, String> {
        let controller = EguiController::new(settings)
            .map_err(|err| format!("Invalid configuration: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
            preview_tex: None,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("MedLens").strong().color(palette.text_primary));
                    ui.separator();
                    ui.label(
                        RichText::new(self.controller.settings().service.endpoint.as_str())
                            .small()
                            .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button("Logs")
                            .on_hover_text("Open the log folder")
                            .clicked()
                        {
                            self.controller.open_logs_folder();
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                });
            });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.controller.select_dropped_files(dropped);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.handle_dropped_files(ctx);
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(APP_HEADING);
                    });
                    ui.add_space(12.0);
                    self.render_analysis_panel(ui);
                    ui.add_space(12.0);
                    self.render_results_panel(ui);
                });
        });
        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}
