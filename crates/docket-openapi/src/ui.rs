use docket_config::UiConfig;
use serde::Serialize;

/// One entry in swagger-ui's group drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UiUrl {
    pub name: String,
    pub url: String,
}

impl UiUrl {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Contents of swagger-ui's `swagger-config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerUiConfig {
    pub urls: Vec<UiUrl>,
    pub apis_sorter: String,
    pub json_editor: bool,
    pub show_request_headers: bool,
    pub supported_submit_methods: Vec<String>,
    pub doc_expansion: String,
    pub default_model_rendering: String,
    /// `null` disables the online validator badge.
    pub validator_url: Option<String>,
    pub request_timeout: u64,
    pub deep_linking: bool,
    pub display_operation_id: bool,
    pub default_models_expand_depth: i32,
    pub default_model_expand_depth: i32,
    pub display_request_duration: bool,
    pub filter: bool,
    pub operations_sorter: String,
    pub tags_sorter: String,
    pub show_extensions: bool,
}

impl SwaggerUiConfig {
    pub fn new<I>(ui: &UiConfig, urls: I) -> Self
    where
        I: IntoIterator<Item = UiUrl>,
    {
        let supported_submit_methods = ui
            .submit_methods
            .split(',')
            .map(|method| method.trim().to_ascii_lowercase())
            .filter(|method| !method.is_empty())
            .collect();

        Self {
            urls: urls.into_iter().collect(),
            apis_sorter: ui.api_sorter.clone(),
            json_editor: ui.json_editor,
            show_request_headers: ui.show_request_headers,
            supported_submit_methods,
            doc_expansion: ui.doc_expansion.clone(),
            default_model_rendering: ui.default_model_rendering.clone(),
            validator_url: ui.validator_url.clone(),
            request_timeout: ui.request_timeout,
            deep_linking: ui.deep_linking,
            display_operation_id: ui.display_operation_id,
            default_models_expand_depth: ui.default_models_expand_depth,
            default_model_expand_depth: ui.default_model_expand_depth,
            display_request_duration: ui.display_request_duration,
            filter: ui.filter,
            operations_sorter: ui.operations_sorter.clone(),
            tags_sorter: ui.tags_sorter.clone(),
            show_extensions: ui.show_extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_swagger_ui_shape() {
        let ui = UiConfig {
            submit_methods: "GET, post,,".to_string(),
            ..UiConfig::default()
        };

        let config = SwaggerUiConfig::new(&ui, [UiUrl::new("pets", "pets.json")]);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["urls"][0]["name"], "pets");
        assert_eq!(json["urls"][0]["url"], "pets.json");
        assert_eq!(json["supportedSubmitMethods"], serde_json::json!(["get", "post"]));
        assert_eq!(json["docExpansion"], "none");
        assert_eq!(json["defaultModelRendering"], "schema");
        assert_eq!(json["validatorUrl"], serde_json::Value::Null);
        assert_eq!(json["requestTimeout"], 10_000);
        assert_eq!(json["deepLinking"], true);
    }
}
