//! Library exports shared by the desktop app, the CLI and integration tests.
/// Client for the image analysis service.
pub mod analysis_api;
/// Application directory helpers.
pub mod app_dirs;
/// Persisted TOML settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Display formatting of analysis results.
pub mod formatting;
/// Tracing setup with rotating log files.
pub mod logging;
/// Image decoding for previews.
pub mod preview;

pub(crate) mod http_client;
