use crate::analysis_api::{AnalysisClient, AnalysisError, AnalysisResult};
use crate::egui_app::state::RequestToken;
use crate::preview::{self, ImagePreview, PreviewError};
use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
    time::{Duration, Instant},
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PreviewLoaded(PreviewLoadResult),
    AnalysisFinished(AnalysisJobResult),
}

#[derive(Debug)]
pub(crate) struct PreviewLoadJob {
    pub(crate) selection_id: u64,
    pub(crate) path: PathBuf,
    pub(crate) max_dimension: u32,
}

#[derive(Debug)]
pub(crate) struct PreviewLoadResult {
    pub(crate) selection_id: u64,
    pub(crate) result: Result<ImagePreview, PreviewError>,
}

pub(crate) struct AnalysisJob {
    pub(crate) token: RequestToken,
    pub(crate) path: PathBuf,
    pub(crate) client: AnalysisClient,
}

#[derive(Debug)]
pub(crate) struct AnalysisJobResult {
    pub(crate) token: RequestToken,
    pub(crate) elapsed: Duration,
    pub(crate) result: Result<AnalysisResult, AnalysisError>,
}

pub(crate) struct ControllerJobs {
    preview_job_tx: Sender<PreviewLoadJob>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_selection_id: u64,
    next_request_token: u64,
    pending_previews: usize,
    analyses_in_flight: usize,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        let (preview_job_tx, preview_result_rx) = spawn_preview_loader();
        let jobs = Self {
            preview_job_tx,
            message_tx,
            message_rx,
            next_selection_id: 1,
            next_request_token: 1,
            pending_previews: 0,
            analyses_in_flight: 0,
        };
        jobs.forward_preview_results(preview_result_rx);
        jobs
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    fn forward_preview_results(&self, rx: Receiver<PreviewLoadResult>) {
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            while let Ok(message) = rx.recv() {
                let _ = tx.send(JobMessage::PreviewLoaded(message));
            }
        });
    }

    pub(super) fn next_selection_id(&mut self) -> u64 {
        let id = self.next_selection_id;
        self.next_selection_id = self.next_selection_id.wrapping_add(1).max(1);
        id
    }

    pub(super) fn next_request_token(&mut self) -> RequestToken {
        let token = RequestToken(self.next_request_token);
        self.next_request_token = self.next_request_token.wrapping_add(1).max(1);
        token
    }

    pub(super) fn request_preview(&mut self, job: PreviewLoadJob) {
        match self.preview_job_tx.send(job) {
            Ok(()) => self.pending_previews += 1,
            Err(err) => {
                // Worker is gone; answer inline so the selection does not hang in Loading.
                let job = err.0;
                tracing::warn!("Preview worker unavailable; decoding on the UI thread");
                let result = preview::load_preview(&job.path, job.max_dimension);
                self.pending_previews += 1;
                let _ = self.message_tx.send(JobMessage::PreviewLoaded(PreviewLoadResult {
                    selection_id: job.selection_id,
                    result,
                }));
            }
        }
    }

    pub(super) fn clear_preview(&mut self) {
        self.pending_previews = self.pending_previews.saturating_sub(1);
    }

    pub(super) fn begin_analysis(&mut self, job: AnalysisJob) {
        self.analyses_in_flight += 1;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let started = Instant::now();
            let result = job.client.analyze_file(&job.path);
            let _ = tx.send(JobMessage::AnalysisFinished(AnalysisJobResult {
                token: job.token,
                elapsed: started.elapsed(),
                result,
            }));
        });
    }

    pub(super) fn clear_analysis(&mut self) {
        self.analyses_in_flight = self.analyses_in_flight.saturating_sub(1);
    }

    /// True while any worker still owes the UI a message.
    pub(super) fn has_pending_work(&self) -> bool {
        self.pending_previews > 0 || self.analyses_in_flight > 0
    }
}

fn spawn_preview_loader() -> (Sender<PreviewLoadJob>, Receiver<PreviewLoadResult>) {
    let (tx, rx) = std::sync::mpsc::channel::<PreviewLoadJob>();
    let (result_tx, result_rx) = std::sync::mpsc::channel::<PreviewLoadResult>();
    thread::spawn(move || {
        while let Ok(job) = rx.recv() {
            let result = preview::load_preview(&job.path, job.max_dimension);
            if let Err(err) = &result {
                tracing::warn!("Preview failed: {err}");
            }
            let _ = result_tx.send(PreviewLoadResult {
                selection_id: job.selection_id,
                result,
            });
        }
    });
    (tx, result_rx)
}
