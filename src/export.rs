use docket_config::SwaggerProperties;
use docket_core::{DocketError, DocketResolver};
use docket_openapi::{DocketBuilder, SwaggerUiConfig, UiUrl};
use std::path::{Path, PathBuf};
use utoipa::openapi::OpenApi;

/// File swagger-ui reads its group list and display settings from.
pub const UI_CONFIG_FILE: &str = "swagger-config.json";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Docket(#[from] DocketError),
    #[error("failed to encode document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Group name as a file stem.
pub fn file_stem(group_name: &str) -> String {
    group_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Write one `<group>.json` per resolved docket plus [`UI_CONFIG_FILE`].
///
/// Returns the written paths; nothing is written when swagger is disabled.
pub fn export_dockets(
    properties: &SwaggerProperties,
    source: &OpenApi,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    if !properties.is_enabled() {
        tracing::info!("swagger disabled; no documents exported");
        return Ok(Vec::new());
    }

    let resolver = DocketResolver::new(properties)?;
    let definitions = resolver.definitions()?;
    let documents = DocketBuilder::new(source).build_all(&definitions);

    create_dir(out_dir)?;

    let mut written = Vec::with_capacity(documents.len() + 1);
    let mut urls = Vec::with_capacity(documents.len());
    for (group_name, document) in &documents {
        let file_name = format!("{}.json", file_stem(group_name));
        let path = out_dir.join(&file_name);
        write(&path, serde_json::to_string_pretty(document)?)?;

        urls.push(UiUrl::new(group_name, &file_name));
        written.push(path);
    }

    let ui = SwaggerUiConfig::new(&properties.ui_config, urls);
    let ui_path = out_dir.join(UI_CONFIG_FILE);
    write(&ui_path, serde_json::to_string_pretty(&ui)?)?;
    written.push(ui_path);

    tracing::info!(
        dockets = documents.len(),
        out_dir = %out_dir.display(),
        "exported swagger dockets"
    );
    Ok(written)
}

fn create_dir(path: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: String) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
