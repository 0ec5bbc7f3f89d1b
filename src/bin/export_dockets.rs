use docket_config::Settings;
use docket_openapi::ApiDoc;
use std::path::{Path, PathBuf};
use swagger_dockets::{export_dockets, telemetry};
use utoipa::OpenApi;

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs/assets/openapi")
}

/// `-` or no argument selects the bundled demo document.
fn load_source(arg: Option<&str>) -> Result<utoipa::openapi::OpenApi, Box<dyn std::error::Error>> {
    match arg {
        None | Some("-") => Ok(ApiDoc::openapi()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
    }
}

fn load_settings(arg: Option<&str>) -> Result<Settings, Box<dyn std::error::Error>> {
    match arg {
        None | Some("-") => Ok(Settings::discover()),
        Some(path) => Ok(Settings::load(Path::new(path))?),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("export_dockets")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = load_settings(args.first().map(String::as_str))?;
    let source = load_source(args.get(1).map(String::as_str))?;
    let output_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(default_output_dir);

    let written = export_dockets(&settings.swagger, &source, &output_dir)?;
    for path in &written {
        eprintln!(
            "Wrote {}",
            path.canonicalize().unwrap_or_else(|_| path.clone()).display()
        );
    }

    Ok(())
}
