use super::jobs::{AnalysisJob, PreviewLoadJob};
use super::*;
use crate::egui_app::state::SelectedImage;
use crate::preview::{IMAGE_EXTENSIONS, has_image_extension};
use rfd::FileDialog;
use std::path::PathBuf;

impl EguiController {
    /// Pick an image through the native file dialog.
    pub fn select_file_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.select_file(path);
    }

    /// Select the first dropped file that looks like an image.
    pub fn select_dropped_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        match paths.into_iter().find(|path| has_image_extension(path)) {
            Some(path) => self.select_file(path),
            None => self.set_status("Dropped file is not a supported image", StatusTone::Warning),
        }
    }

    /// Make `path` the current file, discarding any previous result or error.
    ///
    /// The preview is decoded on a worker; `analyze` stays disabled until it arrives.
    pub fn select_file(&mut self, path: PathBuf) {
        if let Some(token) = self.ui.analysis.in_flight_token() {
            tracing::info!(
                token = token.0,
                "Selection changed during analysis; the pending result will be dropped"
            );
        }
        let selection_id = self.jobs.next_selection_id();
        let image = SelectedImage::new(selection_id, path.clone());
        tracing::info!("Selected {}", path.display());
        self.set_status(format!("Loading preview for {}", image.name), StatusTone::Busy);
        self.ui.analysis.select(image);
        self.jobs.request_preview(PreviewLoadJob {
            selection_id,
            path,
            max_dimension: self.settings.preview.max_dimension,
        });
    }

    /// Forget the current file and any result.
    pub fn clear_selection(&mut self) {
        self.ui.analysis.clear();
        self.ui.status = StatusBarState::idle();
    }

    /// Submit the selected file. No-op without a ready preview or while a request runs.
    pub fn analyze(&mut self) {
        if !self.ui.analysis.can_analyze() {
            return;
        }
        let Some(image) = self.ui.analysis.selected() else {
            return;
        };
        let path = image.path.clone();
        let name = image.name.clone();
        let token = self.jobs.next_request_token();
        if !self.ui.analysis.begin_analysis(token) {
            return;
        }
        tracing::info!(token = token.0, "Analyzing {}", path.display());
        self.set_status(format!("Analyzing {name}…"), StatusTone::Busy);
        self.jobs.begin_analysis(AnalysisJob {
            token,
            path,
            client: self.client.clone(),
        });
    }
}
