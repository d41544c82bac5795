use super::EguiApp;
use super::style;
use crate::formatting::{AnalysisReport, NO_PRECAUTIONS_PLACEHOLDER};
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Ui};

impl EguiApp {
    /// Result card; drawn only after a successful analysis.
    pub(super) fn render_results_panel(&mut self, ui: &mut Ui) {
        let Some(report) = self.controller.ui.analysis.report() else {
            return;
        };
        let palette = style::palette();
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(style::card_stroke())
            .corner_radius(CornerRadius::same(6))
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                render_report(ui, report);
            });
    }
}

fn render_report(ui: &mut Ui, report: &AnalysisReport) {
    let palette = style::palette();
    ui.label(RichText::new("Caption").small().color(palette.text_muted));
    ui.label(RichText::new(&report.caption).size(16.0));
    if let Some(kind) = &report.image_type {
        ui.add_space(6.0);
        ui.label(RichText::new(format!("Image type: {kind}")).color(palette.text_muted));
    }
    if let Some(context) = &report.context {
        ui.add_space(10.0);
        ui.label(RichText::new("Details").small().color(palette.text_muted));
        ui.label(context);
    }

    ui.add_space(10.0);
    ui.label(RichText::new("Severity").small().color(palette.text_muted));
    ui.add(
        egui::ProgressBar::new(report.severity_fraction())
            .fill(palette.severity_fill)
            .desired_height(14.0),
    );
    ui.label(report.severity_label());

    ui.add_space(10.0);
    ui.label(RichText::new("Precautions").small().color(palette.text_muted));
    let entries = report.precautions.entries();
    if entries.is_empty() {
        ui.label(format!("• {NO_PRECAUTIONS_PLACEHOLDER}"));
        return;
    }
    for entry in entries {
        ui.horizontal_wrapped(|ui| {
            ui.label("•");
            if entry.description.is_empty() {
                ui.label(RichText::new(&entry.title).strong());
            } else {
                ui.label(RichText::new(format!("{}:", entry.title)).strong());
                ui.label(&entry.description);
            }
        });
    }
}
