use super::types::DEFAULT_ENDPOINT;
use super::*;
use crate::app_dirs::{APP_DIR_NAME, ConfigBaseGuard};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let settings = load_from_path(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings, AppSettings::default());
    assert_eq!(settings.service.endpoint, DEFAULT_ENDPOINT);
}

#[test]
fn saves_settings_to_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("cfg.toml");
    let mut settings = AppSettings::default();
    settings.service.endpoint = "https://analysis.example.org/api/analyze-medical-image".into();
    settings.service.read_timeout_secs = 45;
    settings.preview.max_dimension = 512;

    save_to_path(&settings, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[service]"));
    assert!(text.contains("read_timeout_secs = 45"));
    assert_eq!(load_from_path(&path).unwrap(), settings);
}

#[test]
fn partial_file_fills_missing_keys_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    std::fs::write(&path, "[service]\nendpoint = \"http://10.0.0.2:8080/analyze\"\n").unwrap();

    let settings = load_from_path(&path).unwrap();

    assert_eq!(settings.service.endpoint, "http://10.0.0.2:8080/analyze");
    assert_eq!(settings.service.read_timeout_secs, 120);
    assert_eq!(settings.preview, PreviewSettings::default());
}

#[test]
fn out_of_range_values_are_clamped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    std::fs::write(
        &path,
        "[service]\nendpoint = \"  \"\nread_timeout_secs = 0\nmax_response_bytes = 3\n\n[preview]\nmax_dimension = 100000\n",
    )
    .unwrap();

    let settings = load_from_path(&path).unwrap();

    assert_eq!(settings.service.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(settings.service.read_timeout_secs, 1);
    assert_eq!(settings.service.max_response_bytes, 1024);
    assert_eq!(settings.preview.max_dimension, 8192);
}

#[test]
fn invalid_toml_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    std::fs::write(&path, "[service\nendpoint = 1").unwrap();

    let err = load_from_path(&path).unwrap_err();

    assert!(matches!(err, ConfigError::ParseToml { .. }));
    assert!(err.to_string().contains("cfg.toml"));
}

#[test]
fn endpoint_validation_rejects_non_http_schemes() {
    let mut service = ServiceSettings::default();
    assert_eq!(service.endpoint_url().unwrap().port(), Some(5000));

    service.endpoint = "ftp://127.0.0.1/analyze".into();
    let err = service.endpoint_url().unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));

    service.endpoint = "not a url".into();
    assert!(matches!(
        service.endpoint_url(),
        Err(ConfigError::InvalidEndpoint { .. })
    ));
}

#[test]
fn first_launch_writes_default_file() {
    let dir = tempdir().unwrap();
    let _guard = ConfigBaseGuard::set(dir.path().to_path_buf());

    let settings = load_or_default().unwrap();

    assert_eq!(settings, AppSettings::default());
    assert!(dir.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME).is_file());
}
