use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One named documentation group.
///
/// String fields are never absent: a missing key binds to `""`, which is what
/// the default-merge pass tests for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocketInfo {
    #[serde(deserialize_with = "crate::de::string")]
    pub title: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub description: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub version: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub license: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub license_url: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub terms_of_service_url: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub host: String,
    /// Handler selection scope, matched against operation tags.
    #[serde(deserialize_with = "crate::de::string")]
    pub base_package: String,
    /// Ant-style include patterns.
    pub base_path: Vec<String>,
    /// Ant-style exclude patterns.
    pub exclude_path: Vec<String>,
    pub contact: Option<Contact>,
    pub global_operation_parameters: Vec<GlobalOperationParameter>,
    pub ignored_parameter_types: IndexSet<String>,
}

/// Contact block. Each field tracks absence separately from an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "crate::de::optional_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "crate::de::optional_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "crate::de::optional_string")]
    pub email: Option<String>,
}

impl Contact {
    pub fn new(name: &str, url: &str, email: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            email: Some(email.to_string()),
        }
    }
}

/// Parameter injected into every documented operation unless a docket
/// overrides it by `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalOperationParameter {
    #[serde(deserialize_with = "crate::de::string")]
    pub name: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub description: String,
    /// Type reference, e.g. `string` or a component schema name.
    #[serde(deserialize_with = "crate::de::string")]
    pub model_ref: String,
    /// One of `header`, `query`, `path`, `body`, `form`.
    #[serde(deserialize_with = "crate::de::string")]
    pub parameter_type: String,
    /// String-encoded boolean.
    #[serde(deserialize_with = "crate::de::string")]
    pub required: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalResponseMessageBody {
    pub code: u16,
    #[serde(deserialize_with = "crate::de::string")]
    pub message: String,
    #[serde(deserialize_with = "crate::de::optional_string")]
    pub model_ref: Option<String>,
}

/// Response messages applied to every operation, per HTTP method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalResponseMessage {
    pub post: Vec<GlobalResponseMessageBody>,
    pub get: Vec<GlobalResponseMessageBody>,
    pub put: Vec<GlobalResponseMessageBody>,
    pub patch: Vec<GlobalResponseMessageBody>,
    pub delete: Vec<GlobalResponseMessageBody>,
    pub head: Vec<GlobalResponseMessageBody>,
    pub options: Vec<GlobalResponseMessageBody>,
    pub trace: Vec<GlobalResponseMessageBody>,
}

/// Global authorization settings shared by every docket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Authorization {
    /// Security scheme id, also used as the security reference.
    #[serde(deserialize_with = "crate::de::string")]
    pub name: String,
    /// `ApiKey` | `BasicAuth` | `None`, compared case-insensitively.
    #[serde(rename = "type", deserialize_with = "crate::de::string")]
    pub auth_type: String,
    /// Header carrying the api key.
    #[serde(deserialize_with = "crate::de::string")]
    pub key_name: String,
    /// Paths requiring authorization.
    #[serde(deserialize_with = "crate::de::string")]
    pub auth_regex: String,
}

impl Default for Authorization {
    fn default() -> Self {
        Self {
            name: "Authorization".to_string(),
            auth_type: "ApiKey".to_string(),
            key_name: "TOKEN".to_string(),
            auth_regex: "^.*$".to_string(),
        }
    }
}

/// swagger-ui display settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UiConfig {
    #[serde(deserialize_with = "crate::de::string")]
    pub api_sorter: String,
    pub json_editor: bool,
    pub show_request_headers: bool,
    /// Comma separated list of methods the "try it out" button is enabled for.
    #[serde(deserialize_with = "crate::de::string")]
    pub submit_methods: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub doc_expansion: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub default_model_rendering: String,
    #[serde(deserialize_with = "crate::de::optional_string")]
    pub validator_url: Option<String>,
    /// Milliseconds.
    pub request_timeout: u64,
    pub deep_linking: bool,
    pub display_operation_id: bool,
    pub default_models_expand_depth: i32,
    pub default_model_expand_depth: i32,
    pub display_request_duration: bool,
    pub filter: bool,
    #[serde(deserialize_with = "crate::de::string")]
    pub operations_sorter: String,
    #[serde(deserialize_with = "crate::de::string")]
    pub tags_sorter: String,
    pub show_extensions: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_sorter: "alpha".to_string(),
            json_editor: false,
            show_request_headers: true,
            submit_methods: "get,post,put,delete,patch".to_string(),
            doc_expansion: "none".to_string(),
            default_model_rendering: "schema".to_string(),
            validator_url: None,
            request_timeout: 10_000,
            deep_linking: true,
            display_operation_id: false,
            default_models_expand_depth: 1,
            default_model_expand_depth: 1,
            display_request_duration: false,
            filter: false,
            operations_sorter: "alpha".to_string(),
            tags_sorter: "alpha".to_string(),
            show_extensions: false,
        }
    }
}

/// Everything bound under the `swagger` key.
///
/// The flattened [`DocketInfo`] doubles as the default source for every named
/// docket, and as the only docket when `docket` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SwaggerProperties {
    #[serde(flatten)]
    pub defaults: DocketInfo,
    pub enabled: Option<bool>,
    pub docket: IndexMap<String, DocketInfo>,
    pub ui_config: UiConfig,
    pub apply_default_response_messages: bool,
    pub global_response_message: Option<GlobalResponseMessage>,
    pub authorization: Authorization,
}

impl Default for SwaggerProperties {
    fn default() -> Self {
        Self {
            defaults: DocketInfo::default(),
            enabled: None,
            docket: IndexMap::new(),
            ui_config: UiConfig::default(),
            apply_default_response_messages: true,
            global_response_message: None,
            authorization: Authorization::default(),
        }
    }
}

impl SwaggerProperties {
    /// An absent `enabled` flag counts as enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}
