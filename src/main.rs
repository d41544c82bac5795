#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based MedLens UI.
use eframe::egui;
use medlens::egui_app::ui::{APP_HEADING, EguiApp, MIN_VIEWPORT_SIZE};
use medlens::{config, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default();

    let viewport = egui::ViewportBuilder::default()
        .with_title(APP_HEADING)
        .with_inner_size([900.0, 900.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "MedLens",
        native_options,
        Box::new(move |_cc| {
            let app = settings
                .map_err(|err| format!("Failed to load config: {err}"))
                .and_then(EguiApp::new);
            match app {
                Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
                Err(message) => {
                    tracing::error!("{message}");
                    Ok(Box::new(LaunchError { message }) as Box<dyn eframe::App>)
                }
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
