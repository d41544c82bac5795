//! Turns raw analysis output into display-ready fragments.
//!
//! Everything here is pure: the controller calls [`AnalysisReport::from_result`]
//! once per successful response and the renderer only reads the report.

use crate::analysis_api::AnalysisResult;

/// Caption shown when the service did not produce one.
pub const NO_CAPTION_PLACEHOLDER: &str = "No caption available";
/// List item shown when no well-formed precaution survives parsing.
pub const NO_PRECAUTIONS_PLACEHOLDER: &str = "No precautions provided.";

/// One recommended action parsed from the precautions block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecautionEntry {
    /// Short label before the first colon.
    pub title: String,
    /// Sentence after the first colon; may itself contain colons.
    pub description: String,
}

/// Parsed precautions, or the explicit "nothing usable" fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Precautions {
    /// At least one well-formed entry.
    Entries(Vec<PrecautionEntry>),
    /// No line ended with a full stop.
    NoneProvided,
}

impl Precautions {
    /// Entries to render, empty for the fallback.
    pub fn entries(&self) -> &[PrecautionEntry] {
        match self {
            Self::Entries(entries) => entries,
            Self::NoneProvided => &[],
        }
    }
}

/// Display-ready projection of an [`AnalysisResult`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport {
    pub caption: String,
    pub image_type: Option<String>,
    /// Enhanced context cut back to its last complete sentence.
    pub context: Option<String>,
    /// Severity in whole percent, `None` when the service omitted it.
    pub severity: Option<u8>,
    pub precautions: Precautions,
}

impl AnalysisReport {
    /// Derive every display fragment from a successful response.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            caption: caption_or_placeholder(result.alt_text.as_deref()).to_string(),
            image_type: result
                .image_type
                .as_deref()
                .map(str::trim)
                .filter(|kind| !kind.is_empty())
                .map(str::to_string),
            context: result
                .enhanced_context
                .as_deref()
                .filter(|context| !context.is_empty())
                .map(|context| truncate_to_last_sentence(context).to_string()),
            severity: result.severity.map(clamp_severity),
            precautions: parse_precautions(result.precautions.as_deref().unwrap_or("")),
        }
    }

    /// Bar fill in `0.0..=1.0`.
    pub fn severity_fraction(&self) -> f32 {
        f32::from(self.severity.unwrap_or(0)) / 100.0
    }

    /// Label drawn under the severity bar.
    pub fn severity_label(&self) -> String {
        match self.severity {
            Some(percent) => severity_label(percent),
            None => "Severity unavailable".to_string(),
        }
    }
}

/// Return `text` up to and including its last `.`, or unchanged when there is none.
pub fn truncate_to_last_sentence(text: &str) -> &str {
    match text.rfind('.') {
        Some(index) => &text[..=index],
        None => text,
    }
}

/// Parse a newline-delimited precautions block into title/description pairs.
///
/// Lines that do not end with `.` are treated as cut off and dropped.
pub fn parse_precautions(text: &str) -> Precautions {
    let entries: Vec<PrecautionEntry> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| line.ends_with('.'))
        .map(|line| match line.split_once(':') {
            Some((title, description)) => PrecautionEntry {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
            },
            None => PrecautionEntry {
                title: line.to_string(),
                description: String::new(),
            },
        })
        .collect();
    if entries.is_empty() {
        Precautions::NoneProvided
    } else {
        Precautions::Entries(entries)
    }
}

pub fn caption_or_placeholder(alt_text: Option<&str>) -> &str {
    match alt_text {
        Some(caption) if !caption.is_empty() => caption,
        _ => NO_CAPTION_PLACEHOLDER,
    }
}

/// Round a raw severity to whole percent within `0..=100`.
pub fn clamp_severity(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

pub fn severity_label(percent: u8) -> String {
    format!("{percent}% Serious")
}
