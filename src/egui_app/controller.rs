//! Owns the UI state and drives preview and analysis work.

mod analysis;
mod background_jobs;
mod jobs;


use crate::analysis_api::AnalysisClient;
use crate::config::{AppSettings, ConfigError};
use crate::egui_app::state::{StatusBarState, UiState};
use crate::egui_app::ui::style::StatusTone;
use jobs::ControllerJobs;

/// Maintains app state and bridges the analysis client to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    settings: AppSettings,
    client: AnalysisClient,
    jobs: ControllerJobs,
}

impl EguiController {
    /// Build a controller for the given settings, validating the service endpoint.
    pub fn new(settings: AppSettings) -> Result<Self, ConfigError> {
        let client = AnalysisClient::new(&settings.service)?;
        tracing::info!("Analysis endpoint: {}", client.endpoint());
        Ok(Self {
            ui: UiState::default(),
            settings,
            client,
            jobs: ControllerJobs::new(),
        })
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Apply finished background work. Call once per frame.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
    }

    /// Whether a worker result is still expected, so the UI keeps repainting.
    pub fn is_busy(&self) -> bool {
        self.jobs.has_pending_work()
    }

    /// Open the log directory in the system file browser.
    pub fn open_logs_folder(&mut self) {
        let result = crate::app_dirs::logs_dir()
            .map_err(|err| err.to_string())
            .and_then(|dir| open::that(&dir).map_err(|err| err.to_string()));
        if let Err(err) = result {
            tracing::warn!("Failed to open logs folder: {err}");
            self.set_status(format!("Could not open logs folder: {err}"), StatusTone::Error);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }
}
