use super::jobs::{AnalysisJobResult, JobMessage, PreviewLoadResult};
use super::*;
use crate::analysis_api::AnalysisError;
use crate::egui_app::state::PreviewStatus;
use crate::formatting::AnalysisReport;

impl EguiController {
    pub(super) fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::PreviewLoaded(message) => self.handle_preview_loaded(message),
                JobMessage::AnalysisFinished(message) => self.handle_analysis_finished(message),
            }
        }
    }

    fn handle_preview_loaded(&mut self, message: PreviewLoadResult) {
        self.jobs.clear_preview();
        let Some(name) = self.ui.analysis.selected().map(|image| image.name.clone()) else {
            return;
        };
        let (status, tone, text) = match message.result {
            Ok(preview) => {
                let [width, height] = preview.source_size;
                (
                    PreviewStatus::Ready(preview),
                    StatusTone::Info,
                    format!("{name} ready ({width}×{height})"),
                )
            }
            Err(err) => {
                let text = err.to_string();
                (PreviewStatus::Failed(text.clone()), StatusTone::Error, text)
            }
        };
        if self.ui.analysis.apply_preview(message.selection_id, status) {
            self.set_status(text, tone);
        } else {
            tracing::debug!(
                selection_id = message.selection_id,
                "Dropping preview for a previous selection"
            );
        }
    }

    fn handle_analysis_finished(&mut self, message: AnalysisJobResult) {
        self.jobs.clear_analysis();
        if self.ui.analysis.in_flight_token() != Some(message.token) {
            tracing::debug!(token = message.token.0, "Dropping stale analysis result");
            return;
        }
        let name = self
            .ui
            .analysis
            .selected()
            .map(|image| image.name.clone())
            .unwrap_or_default();
        match message.result {
            Ok(result) => {
                let report = AnalysisReport::from_result(&result);
                tracing::info!(
                    token = message.token.0,
                    severity = ?report.severity,
                    "Analysis finished in {:.1}s",
                    message.elapsed.as_secs_f32()
                );
                self.ui.analysis.finish_analysis(message.token, Ok(report));
                self.set_status(format!("Analysis complete for {name}"), StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!(token = message.token.0, "Analysis error: {err}");
                let tone = match err {
                    AnalysisError::Rejected => StatusTone::Warning,
                    _ => StatusTone::Error,
                };
                let text = err.user_message();
                self.ui.analysis.finish_analysis(message.token, Err(text.clone()));
                self.set_status(text, tone);
            }
        }
    }
}
