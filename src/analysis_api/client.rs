use std::path::Path;

use base64::Engine;
use url::Url;

use crate::config::{ConfigError, ServiceSettings};
use crate::http_client;

use super::wire::{AnalysisError, AnalysisResult, AnalyzeRequest, parse_response};

/// Blocking client for the analysis route; cheap to clone into worker threads.
#[derive(Clone)]
pub struct AnalysisClient {
    agent: ureq::Agent,
    endpoint: Url,
    max_response_bytes: usize,
}

impl AnalysisClient {
    /// Build a client from validated service settings.
    pub fn new(settings: &ServiceSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::agent(settings),
            endpoint: settings.endpoint_url()?,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Read `path`, encode it and submit it. Encoding always finishes before the request starts.
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisResult, AnalysisError> {
        let bytes = std::fs::read(path).map_err(|source| AnalysisError::ReadImage {
            path: path.to_path_buf(),
            source,
        })?;
        self.analyze_bytes(&bytes)
    }

    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalyzeRequest {
            image: encode_image(bytes),
        };
        tracing::debug!(
            endpoint = %self.endpoint,
            payload_len = request.image.len(),
            "Submitting image for analysis"
        );
        self.send(&request)
    }

    fn send(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AnalysisError> {
        let call = self
            .agent
            .post(self.endpoint.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");
        let (status, response) = match call.send_json(request) {
            Ok(response) => (response.status(), response),
            Err(ureq::Error::Status(code, response)) => (code, response),
            Err(ureq::Error::Transport(err)) => {
                return Err(AnalysisError::Transport(err.to_string()));
            }
        };
        let body = http_client::read_response_text(response, self.max_response_bytes)
            .map_err(|err| AnalysisError::InvalidResponse(err.to_string()))?;
        parse_response(status, &body)
    }
}

/// Standard base64 of the raw file bytes, as the service expects.
pub fn encode_image(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::{json_response, serve_once};
    use std::time::Duration;

    fn client_for(base: &str) -> AnalysisClient {
        AnalysisClient::new(&ServiceSettings {
            endpoint: format!("{base}/api/analyze-medical-image"),
            read_timeout_secs: 5,
            ..ServiceSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn posts_base64_json_body() {
        let (base, request_rx) = serve_once(json_response(
            "200 OK",
            r#"{"altText":"an mri of a brain","severity":50}"#,
        ));
        let result = client_for(&base).analyze_bytes(b"\x89PNG fake").unwrap();
        assert_eq!(result.alt_text.as_deref(), Some("an mri of a brain"));

        let request = request_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(request.starts_with("POST /api/analyze-medical-image "));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.contains(&format!(r#"{{"image":"{}"}}"#, encode_image(b"\x89PNG fake"))));
    }

    #[test]
    fn rejection_status_body_is_parsed() {
        let (base, _) = serve_once(json_response(
            "400 BAD REQUEST",
            r#"{"error":"Upload a medical-related image."}"#,
        ));
        let err = client_for(&base).analyze_bytes(b"cat").unwrap_err();
        assert!(matches!(err, AnalysisError::Rejected));
    }

    #[test]
    fn server_error_message_is_surfaced() {
        let (base, _) = serve_once(json_response(
            "500 INTERNAL SERVER ERROR",
            r#"{"error":"internal failure"}"#,
        ));
        let err = client_for(&base).analyze_bytes(b"x").unwrap_err();
        assert_eq!(err.user_message(), "Analysis failed: internal failure");
    }

    #[test]
    fn unreachable_service_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client_for(&format!("http://{addr}"))
            .analyze_bytes(b"x")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Transport(_)));
        assert!(err.user_message().starts_with("Analysis failed: HTTP error:"));
    }

    #[test]
    fn missing_file_is_reported_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_for("http://127.0.0.1:9");
        let err = client.analyze_file(&dir.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, AnalysisError::ReadImage { .. }));
    }

    #[test]
    fn encodes_with_standard_alphabet_and_padding() {
        assert_eq!(encode_image(b"\xfb\xff"), "+/8=");
    }
}
