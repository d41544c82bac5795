//! Shared state types for the egui UI.

mod analysis;
mod status;

pub use analysis::*;
pub use status::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    /// Selection, preview and analysis progress as one value.
    pub analysis: AnalysisPhase,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            analysis: AnalysisPhase::Idle,
        }
    }
}
