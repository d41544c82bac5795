use std::path::PathBuf;

use crate::formatting::AnalysisReport;
use crate::preview::ImagePreview;

/// Identifies one `analyze` attempt; later attempts always compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// Progress of decoding the selected file for display.
#[derive(Clone, Debug)]
pub enum PreviewStatus {
    Loading,
    Ready(ImagePreview),
    Failed(String),
}

/// The file currently chosen by the user.
#[derive(Clone, Debug)]
pub struct SelectedImage {
    /// Bumped on every selection so late preview results can be recognized.
    pub selection_id: u64,
    pub path: PathBuf,
    /// File name shown in the UI.
    pub name: String,
    pub preview: PreviewStatus,
}

impl SelectedImage {
    pub fn new(selection_id: u64, path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            selection_id,
            path,
            name,
            preview: PreviewStatus::Loading,
        }
    }

    pub fn preview(&self) -> Option<&ImagePreview> {
        match &self.preview {
            PreviewStatus::Ready(preview) => Some(preview),
            _ => None,
        }
    }
}

/// Where the component is in its select → analyze cycle.
///
/// Holding everything in one value keeps combinations such as "loading with
/// an error shown" unrepresentable.
#[derive(Clone, Debug, Default)]
pub enum AnalysisPhase {
    /// Nothing selected.
    #[default]
    Idle,
    /// A file is selected; its preview may still be decoding.
    FileSelected { image: SelectedImage },
    /// A request for `token` is in flight.
    Analyzing {
        image: SelectedImage,
        token: RequestToken,
    },
    Succeeded {
        image: SelectedImage,
        report: AnalysisReport,
    },
    /// The last attempt failed; `error` is the banner text.
    Failed { image: SelectedImage, error: String },
}

impl AnalysisPhase {
    pub fn selected(&self) -> Option<&SelectedImage> {
        match self {
            Self::Idle => None,
            Self::FileSelected { image }
            | Self::Analyzing { image, .. }
            | Self::Succeeded { image, .. }
            | Self::Failed { image, .. } => Some(image),
        }
    }

    fn selected_mut(&mut self) -> Option<&mut SelectedImage> {
        match self {
            Self::Idle => None,
            Self::FileSelected { image }
            | Self::Analyzing { image, .. }
            | Self::Succeeded { image, .. }
            | Self::Failed { image, .. } => Some(image),
        }
    }

    /// True while a request is outstanding.
    pub fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing { .. })
    }

    pub fn in_flight_token(&self) -> Option<RequestToken> {
        match self {
            Self::Analyzing { token, .. } => Some(*token),
            _ => None,
        }
    }

    /// A new attempt may start: preview decoded and nothing in flight.
    pub fn can_analyze(&self) -> bool {
        !self.is_analyzing()
            && self
                .selected()
                .is_some_and(|image| image.preview().is_some())
    }

    /// Banner text, from either the last attempt or a failed preview.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => match self.selected().map(|image| &image.preview) {
                Some(PreviewStatus::Failed(message)) => Some(message),
                _ => None,
            },
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Self::Succeeded { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Replace whatever came before with a fresh selection.
    pub fn select(&mut self, image: SelectedImage) {
        *self = Self::FileSelected { image };
    }

    /// Return to [`AnalysisPhase::Idle`], dropping any in-flight request.
    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Store a decoded preview. Returns `false` for an outdated selection.
    pub fn apply_preview(&mut self, selection_id: u64, preview: PreviewStatus) -> bool {
        match self.selected_mut() {
            Some(image) if image.selection_id == selection_id => {
                image.preview = preview;
                true
            }
            _ => false,
        }
    }

    /// Enter [`AnalysisPhase::Analyzing`]. Returns `false` when not allowed.
    pub fn begin_analysis(&mut self, token: RequestToken) -> bool {
        if !self.can_analyze() {
            return false;
        }
        match std::mem::take(self) {
            Self::FileSelected { image }
            | Self::Succeeded { image, .. }
            | Self::Failed { image, .. } => {
                *self = Self::Analyzing { image, token };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Apply the outcome for `token`. Returns `false` and changes nothing when stale.
    pub fn finish_analysis(
        &mut self,
        token: RequestToken,
        outcome: Result<AnalysisReport, String>,
    ) -> bool {
        if self.in_flight_token() != Some(token) {
            return false;
        }
        let Self::Analyzing { image, .. } = std::mem::take(self) else {
            return false;
        };
        *self = match outcome {
            Ok(report) => Self::Succeeded { image, report },
            Err(error) => Self::Failed { image, error },
        };
        true
    }
}
