use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Endpoint used when the settings file does not name one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/analyze-medical-image";

const MIN_RESPONSE_BYTES: usize = 1024;
const MIN_PREVIEW_DIMENSION: u32 = 64;
const MAX_PREVIEW_DIMENSION: u32 = 8192;

/// App settings that belong in the TOML config file.
///
/// Config sections: `[service]`, `[preview]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Remote analysis service options.
    #[serde(default)]
    pub service: ServiceSettings,
    /// Image preview options.
    #[serde(default)]
    pub preview: PreviewSettings,
}

impl AppSettings {
    /// Clamp values that would make the app misbehave back into a sane range.
    pub(crate) fn normalized(mut self) -> Self {
        self.service.endpoint = self.service.endpoint.trim().to_string();
        if self.service.endpoint.is_empty() {
            self.service.endpoint = default_endpoint();
        }
        self.service.connect_timeout_secs = self.service.connect_timeout_secs.max(1);
        self.service.read_timeout_secs = self.service.read_timeout_secs.max(1);
        self.service.write_timeout_secs = self.service.write_timeout_secs.max(1);
        self.service.max_response_bytes = self.service.max_response_bytes.max(MIN_RESPONSE_BYTES);
        self.preview.max_dimension = self
            .preview
            .max_dimension
            .clamp(MIN_PREVIEW_DIMENSION, MAX_PREVIEW_DIMENSION);
        self
    }
}

/// Connection settings for the analysis service.
///
/// Config keys: `endpoint`, `connect_timeout_secs`, `read_timeout_secs`,
/// `write_timeout_secs`, `max_response_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Full URL of the analysis route.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// The service runs captioning plus two completions per request, so reads are slow.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Upper bound on the accepted response body size.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ServiceSettings {
    /// Parse and validate the configured endpoint.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: source.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme `{other}`"),
            }),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

/// Preview rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Longest edge, in pixels, of the decoded preview texture.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    120
}

fn default_write_timeout_secs() -> u64 {
    30
}

fn default_max_response_bytes() -> usize {
    1024 * 1024
}

fn default_max_dimension() -> u32 {
    1024
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// The configured service endpoint is not a usable URL.
    #[error("Invalid service endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint {
        /// Endpoint as written in the config.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}
