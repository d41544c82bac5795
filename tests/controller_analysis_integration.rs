mod support;

use support::{fake_service::FakeService, images::write_test_png, medlens_env::MedlensEnvGuard};

use medlens::config;
use medlens::egui_app::controller::EguiController;
use medlens::egui_app::state::AnalysisPhase;
use std::{path::PathBuf, time::Duration};
use tempfile::TempDir;

struct ControllerHarness {
    _config: MedlensEnvGuard,
    temp: TempDir,
    pub controller: EguiController,
}

impl ControllerHarness {
    fn new(endpoint: &str) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let config_home = temp.path().join("config");
        std::fs::create_dir_all(&config_home).expect("create config dir");
        let env = MedlensEnvGuard::set_config_home(config_home);

        let mut settings = config::load_or_default().expect("load settings");
        settings.service.endpoint = endpoint.to_string();
        settings.service.read_timeout_secs = 5;
        config::save(&settings).expect("save settings");
        let settings = config::load_or_default().expect("reload settings");

        let controller = EguiController::new(settings).expect("build controller");
        Self {
            _config: env,
            temp,
            controller,
        }
    }

    fn image(&self, name: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        write_test_png(&path, 32, 24);
        path
    }

    fn wait_until(&mut self, done: impl Fn(&EguiController) -> bool) {
        for _ in 0..500 {
            self.controller.tick();
            if done(&self.controller) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("timed out waiting for controller");
    }
}

#[test]
fn first_launch_writes_editable_config() {
    let harness = ControllerHarness::new("http://127.0.0.1:9/api/analyze-medical-image");
    let path = config::config_path().expect("config path");
    assert!(path.starts_with(harness.temp.path().join("config")));
    let text = std::fs::read_to_string(path).expect("read config");
    assert!(text.contains("http://127.0.0.1:9/api/analyze-medical-image"));
    assert_eq!(harness.controller.settings().service.read_timeout_secs, 5);
}

#[test]
fn select_and_analyze_produces_report() {
    let service = FakeService::respond_once(
        "200 OK",
        r#"{"altText":"a chest x-ray","imageType":"X-ray","enhancedContext":"Clear lungs. No",
            "severity":12.6,"precautions":"Follow-up: see a doctor in two weeks."}"#,
    );
    let mut harness = ControllerHarness::new(&service.endpoint);
    let image = harness.image("chest.png");

    harness.controller.select_file(image);
    harness.wait_until(|c| c.ui.analysis.can_analyze());
    harness.controller.analyze();
    assert!(harness.controller.ui.analysis.is_analyzing());
    harness.wait_until(|c| !c.ui.analysis.is_analyzing());

    let request = service.received();
    assert!(request.starts_with("POST /api/analyze-medical-image"));
    assert!(request.contains(r#"{"image":"iVBORw0KGgo"#));

    let report = harness.controller.ui.analysis.report().expect("report");
    assert_eq!(report.caption, "a chest x-ray");
    assert_eq!(report.image_type.as_deref(), Some("X-ray"));
    assert_eq!(report.context.as_deref(), Some("Clear lungs."));
    assert_eq!(report.severity_label(), "13% Serious");
    assert_eq!(report.precautions.entries()[0].title, "Follow-up");
}

#[test]
fn missing_fields_fall_back_to_placeholders() {
    let service = FakeService::respond_once("200 OK", "{}");
    let mut harness = ControllerHarness::new(&service.endpoint);
    let image = harness.image("blank.png");

    harness.controller.select_file(image);
    harness.wait_until(|c| c.ui.analysis.can_analyze());
    harness.controller.analyze();
    harness.wait_until(|c| !c.ui.analysis.is_analyzing());

    let report = harness.controller.ui.analysis.report().expect("report");
    assert_eq!(report.caption, "No caption available");
    assert_eq!(report.context, None);
    assert_eq!(report.severity_label(), "Severity unavailable");
    assert!(report.precautions.entries().is_empty());
}

#[test]
fn rejection_then_new_selection_clears_error() {
    let service = FakeService::respond_once(
        "400 BAD REQUEST",
        r#"{"error":"Upload a medical-related image."}"#,
    );
    let mut harness = ControllerHarness::new(&service.endpoint);
    let cat = harness.image("cat.png");

    harness.controller.select_file(cat);
    harness.wait_until(|c| c.ui.analysis.can_analyze());
    harness.controller.analyze();
    harness.wait_until(|c| !c.ui.analysis.is_analyzing());
    assert_eq!(
        harness.controller.ui.analysis.error_message(),
        Some("Please upload a medical-related image.")
    );

    let knee = harness.image("knee.png");
    harness.controller.select_file(knee);
    assert_eq!(harness.controller.ui.analysis.error_message(), None);
    assert!(matches!(
        harness.controller.ui.analysis,
        AnalysisPhase::FileSelected { .. }
    ));
}
