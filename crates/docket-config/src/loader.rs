use crate::model::SwaggerProperties;
use hocon::HoconLoader;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment overrides look like `SWAGGER__DOCKET__USERS__TITLE`.
pub const ENV_PREFIX: &str = "SWAGGER";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(String),
    #[error("failed to load HOCON configuration: {0}")]
    Hocon(String),
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

/// Source formats accepted by [`Settings::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Hocon,
    Yaml,
    Toml,
    Json,
}

/// Root of a settings file: everything lives under the `swagger` key.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub swagger: SwaggerProperties,
}

impl Settings {
    /// Try `application.conf`, then `application.yml`, then built-in defaults.
    pub fn discover() -> Self {
        for candidate in ["application.conf", "application.yml"] {
            match Self::load(candidate) {
                Ok(settings) => return settings,
                Err(e) => tracing::debug!("skipping {}: {}", candidate, e),
            }
        }

        tracing::warn!("No swagger settings file found. Falling back to defaults.");
        Self::default()
    }

    /// Load by file extension: `.conf` goes through HOCON, everything else
    /// through the `config` crate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("conf") | Some("hocon") => Self::from_hocon_path(path),
            _ => Self::from_file(path),
        }
    }

    /// Load from a HOCON file.
    pub fn from_hocon_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let settings: Settings = HoconLoader::new()
            .load_file(path)
            .map_err(|e| ConfigError::Hocon(e.to_string()))?
            .resolve()
            .map_err(|e| ConfigError::Hocon(e.to_string()))?;

        tracing::info!(
            path = %path.display(),
            dockets = settings.swagger.docket.len(),
            "loaded swagger settings"
        );
        Ok(settings)
    }

    /// Load a yaml/toml/json file layered with `SWAGGER__*` environment
    /// overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_file_with_env(path.as_ref(), std::env::vars())
    }

    fn from_file_with_env<I>(path: &Path, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let settings: Settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment(vars))
            .build()?
            .try_deserialize()?;

        tracing::info!(
            path = %path.display(),
            dockets = settings.swagger.docket.len(),
            "loaded swagger settings"
        );
        Ok(settings)
    }

    /// Parse settings from an in-memory source. No environment layering.
    pub fn parse(text: &str, format: Format) -> Result<Self, ConfigError> {
        let file_format = match format {
            Format::Hocon => {
                return HoconLoader::new()
                    .load_str(text)
                    .map_err(|e| ConfigError::Hocon(e.to_string()))?
                    .resolve()
                    .map_err(|e| ConfigError::Hocon(e.to_string()));
            }
            Format::Yaml => config::FileFormat::Yaml,
            Format::Toml => config::FileFormat::Toml,
            Format::Json => config::FileFormat::Json,
        };

        let settings = config::Config::builder()
            .add_source(config::File::from_str(text, file_format))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

fn environment<I>(vars: I) -> config::Environment
where
    I: IntoIterator<Item = (String, String)>,
{
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .keep_prefix(true)
        .try_parsing(true)
        .source(Some(kebab_keys(vars)))
}

/// Settings keys are kebab-case but variable names can only carry `_`.
/// `SWAGGER__UI_CONFIG__DOC_EXPANSION` becomes `SWAGGER__UI-CONFIG__DOC-EXPANSION`;
/// the segment naming a docket is kept as written.
fn kebab_keys<I>(vars: I) -> config::Map<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = format!("{ENV_PREFIX}{ENV_SEPARATOR}");
    vars.into_iter()
        .filter(|(key, _)| key.to_ascii_uppercase().starts_with(&prefix))
        .map(|(key, value)| (kebab_key(&key), value))
        .collect()
}

fn kebab_key(key: &str) -> String {
    let segments: Vec<&str> = key.split(ENV_SEPARATOR).collect();
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let docket_name = i == 2 && segments[1].eq_ignore_ascii_case("docket");
            if i == 0 || docket_name {
                (*segment).to_string()
            } else {
                segment.replace('_', "-")
            }
        })
        .collect::<Vec<_>>()
        .join(ENV_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML: &str = r#"
swagger:
  title: Pet Store
  version: 1.0.0
  contact:
    name: store team
    email: store@example.com
  docket:
    pets:
      title: Pets
      base-path:
        - /pets/**
    stores:
      description: Stores only
"#;

    #[test]
    fn yaml_source_binds_dockets_in_order() {
        let settings = Settings::parse(YAML, Format::Yaml).unwrap();
        let swagger = settings.swagger;

        assert_eq!(swagger.defaults.title, "Pet Store");
        assert_eq!(swagger.defaults.version, "1.0.0");
        let names: Vec<&str> = swagger.docket.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["pets", "stores"]);
        assert_eq!(swagger.docket["pets"].base_path, vec!["/pets/**".to_string()]);
        assert_eq!(swagger.docket["stores"].title, "");
    }

    #[test]
    fn hocon_source_binds() {
        let text = r#"
swagger {
  title = "Pet Store"
  apply-default-response-messages = false
  authorization {
    type = BasicAuth
  }
  global-response-message {
    get = [ { code = 500, message = "boom" } ]
  }
}
"#;
        let settings = Settings::parse(text, Format::Hocon).unwrap();
        let swagger = settings.swagger;

        assert_eq!(swagger.defaults.title, "Pet Store");
        assert!(!swagger.apply_default_response_messages);
        assert_eq!(swagger.authorization.auth_type, "BasicAuth");
        assert_eq!(swagger.authorization.key_name, "TOKEN");
        let table = swagger.global_response_message.unwrap();
        assert_eq!(table.get[0].code, 500);
        assert!(table.post.is_empty());
    }

    #[test]
    fn missing_swagger_root_yields_defaults() {
        let settings = Settings::parse("server:\n  port: 8080\n", Format::Yaml).unwrap();
        assert_eq!(settings.swagger, SwaggerProperties::default());
    }

    #[test]
    fn load_reads_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.swagger.docket.len(), 2);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load("does/not/exist.yml").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)), "unexpected error: {err}");
    }

    fn yaml_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn environment_overrides_keys_the_file_sets() {
        let file = yaml_file(
            "swagger:\n  version: 1.0.0\n  docket:\n    pets:\n      title: Pets\n      base-package: a\n",
        );

        let settings = Settings::from_file_with_env(
            file.path(),
            vars(&[
                ("SWAGGER__DOCKET__PETS__BASE_PACKAGE", "b"),
                ("SWAGGER__VERSION", "3"),
                ("SWAGGER__UI_CONFIG__DOC_EXPANSION", "list"),
                ("SWAGGER__APPLY_DEFAULT_RESPONSE_MESSAGES", "false"),
                ("OTHER__VERSION", "9"),
            ]),
        )
        .unwrap();
        let swagger = settings.swagger;

        assert_eq!(swagger.docket["pets"].base_package, "b");
        assert_eq!(swagger.docket["pets"].title, "Pets");
        assert_eq!(swagger.defaults.version, "3");
        assert_eq!(swagger.ui_config.doc_expansion, "list");
        assert!(!swagger.apply_default_response_messages);
    }

    #[test]
    fn environment_keeps_docket_names_verbatim() {
        let file = yaml_file("swagger:\n  title: Store\n");

        let settings = Settings::from_file_with_env(
            file.path(),
            vars(&[("SWAGGER__DOCKET__PET_STORE__TERMS_OF_SERVICE_URL", "http://tos")]),
        )
        .unwrap();

        assert_eq!(
            settings.swagger.docket["pet_store"].terms_of_service_url,
            "http://tos"
        );
    }

    #[test]
    fn kebab_key_rewrites_every_segment_but_the_docket_name() {
        assert_eq!(
            kebab_key("SWAGGER__DOCKET__PET_STORE__BASE_PACKAGE"),
            "SWAGGER__DOCKET__PET_STORE__BASE-PACKAGE"
        );
        assert_eq!(
            kebab_key("SWAGGER__GLOBAL_RESPONSE_MESSAGE__GET"),
            "SWAGGER__GLOBAL-RESPONSE-MESSAGE__GET"
        );
        assert_eq!(kebab_key("SWAGGER__DOCKET"), "SWAGGER__DOCKET");
    }

    #[test]
    fn numeric_and_boolean_scalars_bind_as_text_in_every_format() {
        let sources = [
            (
                Format::Yaml,
                "swagger:\n  version: 1.0\n  global-operation-parameters:\n    - name: TOKEN\n      required: true\n",
            ),
            (
                Format::Hocon,
                "swagger {\n  version = 1.0\n  global-operation-parameters = [ { name = TOKEN, required = true } ]\n}\n",
            ),
            (
                Format::Toml,
                "[swagger]\nversion = 1.0\n[[swagger.global-operation-parameters]]\nname = \"TOKEN\"\nrequired = true\n",
            ),
            (
                Format::Json,
                r#"{ "swagger": { "version": 1.0, "global-operation-parameters": [ { "name": "TOKEN", "required": true } ] } }"#,
            ),
        ];

        for (format, text) in sources {
            let settings = Settings::parse(text, format)
                .unwrap_or_else(|e| panic!("{format:?} should parse: {e}"));
            let defaults = settings.swagger.defaults;
            assert_eq!(defaults.version, "1.0", "{format:?}");
            assert_eq!(defaults.global_operation_parameters[0].name, "TOKEN", "{format:?}");
            assert_eq!(defaults.global_operation_parameters[0].required, "true", "{format:?}");
        }
    }

    #[test]
    fn defaults_and_dockets_accept_the_same_scalars() {
        let settings = Settings::parse(
            "swagger:\n  version: 2\n  docket:\n    pets:\n      version: 2\n",
            Format::Yaml,
        )
        .unwrap();

        assert_eq!(settings.swagger.defaults.version, "2");
        assert_eq!(settings.swagger.docket["pets"].version, "2");
    }
}
