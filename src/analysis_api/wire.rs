use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Error text the service returns when the caption has no medical terms.
pub const SERVICE_REJECTION_SENTINEL: &str = "Upload a medical-related image.";
/// Banner text shown instead of the raw rejection.
pub const REJECTED_IMAGE_MESSAGE: &str = "Please upload a medical-related image.";

/// Request body sent to the analysis route.
#[derive(Clone, Debug, Serialize)]
pub struct AnalyzeRequest {
    /// Base64 of the raw file bytes, without a data-URL prefix.
    pub image: String,
}

/// Response body of the analysis route.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_context: Option<String>,
    /// Percentage in `0..=100`; integral in practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<f64>,
    /// Newline-delimited `Title: description.` lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precautions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure modes of one analysis attempt.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The service decided the image is not medical.
    #[error("{}", SERVICE_REJECTION_SENTINEL)]
    Rejected,
    /// Any other error string reported by the service.
    #[error("{0}")]
    Service(String),
    /// Connection, timeout or TLS failure.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The body could not be read or decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// The selected file could not be read for upload.
    #[error("Failed to read {path}: {source}")]
    ReadImage {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AnalysisError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected => REJECTED_IMAGE_MESSAGE.to_string(),
            other => format!("Analysis failed: {other}"),
        }
    }
}

/// Interpret a response body, whatever its HTTP status.
pub(super) fn parse_response(status: u16, body: &str) -> Result<AnalysisResult, AnalysisError> {
    let success = (200..300).contains(&status);
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(if success {
            AnalysisError::InvalidResponse("Empty response body".to_string())
        } else {
            AnalysisError::Service(format!("HTTP {status}"))
        });
    }
    let parsed: AnalysisResult = match serde_json::from_str(trimmed) {
        Ok(parsed) => parsed,
        Err(err) if success => {
            return Err(AnalysisError::InvalidResponse(err.to_string()));
        }
        Err(_) => {
            return Err(AnalysisError::Service(format!("HTTP {status}: {trimmed}")));
        }
    };
    match parsed.error.as_deref() {
        Some(SERVICE_REJECTION_SENTINEL) => Err(AnalysisError::Rejected),
        Some(message) if !message.is_empty() => Err(AnalysisError::Service(message.to_string())),
        _ if !success => Err(AnalysisError::Service(format!("HTTP {status}"))),
        _ => Ok(parsed),
    }
}
