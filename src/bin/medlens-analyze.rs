//! Submit one image to the analysis service and print the formatted report.

use medlens::analysis_api::AnalysisClient;
use medlens::config;
use medlens::formatting::{AnalysisReport, NO_PRECAUTIONS_PLACEHOLDER};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let mut settings =
        config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
    if let Some(endpoint) = options.endpoint {
        settings.service.endpoint = endpoint;
    }
    let client = AnalysisClient::new(&settings.service).map_err(|err| err.to_string())?;
    let result = client
        .analyze_file(&options.image)
        .map_err(|err| err.user_message())?;

    if options.json {
        let text = serde_json::to_string_pretty(&result).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }
    print!("{}", render_report(&AnalysisReport::from_result(&result)));
    Ok(())
}

struct CliOptions {
    image: PathBuf,
    endpoint: Option<String>,
    json: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut image: Option<PathBuf> = None;
    let mut endpoint: Option<String> = None;
    let mut json = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--image" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--image requires a value".to_string())?;
                image = Some(PathBuf::from(value));
            }
            "--endpoint" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--endpoint requires a value".to_string())?;
                endpoint = Some(value.clone());
            }
            "--json" => json = true,
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let Some(image) = image else {
        return Err("--image is required".to_string());
    };
    Ok(Some(CliOptions {
        image,
        endpoint,
        json,
    }))
}

fn help_text() -> String {
    [
        "medlens-analyze",
        "",
        "Usage:",
        "  medlens-analyze --image <path> [--endpoint <url>] [--json]",
        "",
        "Options:",
        "  --endpoint <url>  Override the service endpoint from config.toml",
        "  --json            Print the raw service response instead of the report",
    ]
    .join("\n")
}

fn render_report(report: &AnalysisReport) -> String {
    let mut out = format!("Caption: {}\n", report.caption);
    if let Some(kind) = &report.image_type {
        out.push_str(&format!("Image type: {kind}\n"));
    }
    if let Some(context) = &report.context {
        out.push_str(&format!("Details: {context}\n"));
    }
    out.push_str(&format!("Severity: {}\n", report.severity_label()));
    out.push_str("Precautions:\n");
    let entries = report.precautions.entries();
    if entries.is_empty() {
        out.push_str(&format!("  - {NO_PRECAUTIONS_PLACEHOLDER}\n"));
    }
    for entry in entries {
        if entry.description.is_empty() {
            out.push_str(&format!("  - {}\n", entry.title));
        } else {
            out.push_str(&format!("  - {}: {}\n", entry.title, entry.description));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use medlens::formatting::{PrecautionEntry, Precautions};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_args(args(&["--image", "a.png", "--endpoint", "http://x/y", "--json"]))
            .unwrap()
            .unwrap();
        assert_eq!(options.image, PathBuf::from("a.png"));
        assert_eq!(options.endpoint.as_deref(), Some("http://x/y"));
        assert!(options.json);
    }

    #[test]
    fn image_is_required() {
        assert_eq!(
            parse_args(args(&["--json"])).err().as_deref(),
            Some("--image is required")
        );
        assert!(parse_args(args(&["--image"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }

    #[test]
    fn report_lists_precautions_or_placeholder() {
        let mut report = AnalysisReport {
            caption: "an x-ray".into(),
            image_type: None,
            context: Some("Looks fine.".into()),
            severity: Some(12),
            precautions: Precautions::NoneProvided,
        };
        assert_eq!(
            render_report(&report),
            "Caption: an x-ray\nDetails: Looks fine.\nSeverity: 12% Serious\nPrecautions:\n  - No precautions provided.\n"
        );
        report.precautions = Precautions::Entries(vec![PrecautionEntry {
            title: "Rest".into(),
            description: "stay off it.".into(),
        }]);
        assert!(render_report(&report).ends_with("  - Rest: stay off it.\n"));
    }
}
