use super::EguiApp;
use super::style;
use crate::egui_app::state::{PreviewStatus, SelectedImage};
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, TextureOptions, Ui};

const PREVIEW_MAX_HEIGHT: f32 = 360.0;

impl EguiApp {
    /// Selection card: file buttons, preview, analyze button and error banner.
    pub(super) fn render_analysis_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let hovering_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke = if hovering_files {
            egui::Stroke::new(2.0, palette.accent_blue)
        } else {
            style::card_stroke()
        };
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(stroke)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                self.render_file_row(ui);
                ui.add_space(8.0);
                self.render_preview(ui);
                ui.add_space(8.0);
                self.render_analyze_button(ui);
                if let Some(message) = self.controller.ui.analysis.error_message() {
                    ui.add_space(8.0);
                    render_error_banner(ui, message);
                }
            });
    }

    fn render_file_row(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let analyzing = self.controller.ui.analysis.is_analyzing();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!analyzing, egui::Button::new("Choose image…"))
                .clicked()
            {
                self.controller.select_file_via_dialog();
            }
            let selected_name = self
                .controller
                .ui
                .analysis
                .selected()
                .map(|image| image.name.clone());
            match selected_name {
                Some(name) => {
                    ui.label(RichText::new(name).color(palette.text_primary));
                    if ui.small_button("Clear").clicked() {
                        self.controller.clear_selection();
                    }
                }
                None => {
                    ui.label(
                        RichText::new("or drop an image onto the window")
                            .color(palette.text_muted),
                    );
                }
            }
        });
    }

    fn render_preview(&mut self, ui: &mut Ui) {
        let Some(image) = self.controller.ui.analysis.selected() else {
            self.preview_tex = None;
            return;
        };
        match &image.preview {
            PreviewStatus::Loading => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Loading preview…");
                });
            }
            PreviewStatus::Failed(_) => {}
            PreviewStatus::Ready(_) => {
                let texture = preview_texture(ui.ctx(), &mut self.preview_tex, image);
                if let Some(texture) = texture {
                    ui.vertical_centered(|ui| {
                        ui.add(
                            egui::Image::new(&texture)
                                .max_width(ui.available_width())
                                .max_height(PREVIEW_MAX_HEIGHT)
                                .maintain_aspect_ratio(true),
                        );
                    });
                }
            }
        }
    }

    fn render_analyze_button(&mut self, ui: &mut Ui) {
        let analyzing = self.controller.ui.analysis.is_analyzing();
        let enabled = self.controller.ui.analysis.can_analyze();
        let label = if analyzing { "Analyzing..." } else { "Analyze Image" };
        ui.horizontal(|ui| {
            let button = egui::Button::new(RichText::new(label).strong())
                .min_size(egui::vec2(160.0, 32.0));
            if ui.add_enabled(enabled, button).clicked() {
                self.controller.analyze();
            }
            if analyzing {
                ui.add(egui::Spinner::new());
            }
        });
    }
}

/// Texture for the selection's preview, uploading it once per selection.
fn preview_texture(
    ctx: &egui::Context,
    cache: &mut Option<(u64, egui::TextureHandle)>,
    image: &SelectedImage,
) -> Option<egui::TextureHandle> {
    if let Some((id, texture)) = cache {
        if *id == image.selection_id {
            return Some(texture.clone());
        }
    }
    let preview = image.preview()?;
    let texture = ctx.load_texture(
        format!("preview-{}", image.selection_id),
        preview.image.clone(),
        TextureOptions::LINEAR,
    );
    *cache = Some((image.selection_id, texture.clone()));
    Some(texture)
}

fn render_error_banner(ui: &mut Ui, message: &str) {
    let palette = style::palette();
    Frame::new()
        .fill(palette.error.gamma_multiply(0.2))
        .stroke(egui::Stroke::new(1.0, palette.error))
        .corner_radius(CornerRadius::same(4))
        .inner_margin(Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(message).color(palette.error));
        });
}
