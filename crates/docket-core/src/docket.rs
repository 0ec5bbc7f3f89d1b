use crate::error::DocketError;
use crate::parameters::{self, OperationParameter};
use crate::paths::PathSelector;
use crate::responses::ResponseMessageTable;
use crate::security::{self, SecurityContext, SecuritySchemeSpec};
use docket_config::{DocketInfo, SwaggerProperties};

/// Document-level metadata. Absent contact fields render as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiInfo {
    pub title: String,
    pub description: String,
    pub version: String,
    pub license: String,
    pub license_url: String,
    pub terms_of_service_url: String,
    pub contact: ApiContact,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiContact {
    pub name: String,
    pub url: String,
    pub email: String,
}

impl From<&DocketInfo> for ApiInfo {
    fn from(info: &DocketInfo) -> Self {
        let contact = info
            .contact
            .as_ref()
            .map(|c| ApiContact {
                name: c.name.clone().unwrap_or_default(),
                url: c.url.clone().unwrap_or_default(),
                email: c.email.clone().unwrap_or_default(),
            })
            .unwrap_or_default();

        Self {
            title: info.title.clone(),
            description: info.description.clone(),
            version: info.version.clone(),
            license: info.license.clone(),
            license_url: info.license_url.clone(),
            terms_of_service_url: info.terms_of_service_url.clone(),
            contact,
        }
    }
}

/// Selects operations by tag. Tags name the handler module, so a package
/// selects itself and its `::` children; an empty package selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSelector {
    base_package: String,
}

impl PackageSelector {
    pub fn new(base_package: &str) -> Self {
        Self {
            base_package: base_package.trim().to_string(),
        }
    }

    pub fn selects<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        if self.base_package.is_empty() {
            return true;
        }
        tags.iter().any(|tag| {
            let tag = tag.as_ref();
            tag == self.base_package
                || tag
                    .strip_prefix(self.base_package.as_str())
                    .is_some_and(|rest| rest.starts_with("::"))
        })
    }
}

/// Everything needed to build one docket's document.
#[derive(Debug, Clone)]
pub struct DocketDefinition {
    pub group_name: String,
    pub host: String,
    pub api_info: ApiInfo,
    pub security_contexts: Vec<SecurityContext>,
    pub security_scheme: Option<SecuritySchemeSpec>,
    pub operation_parameters: Vec<OperationParameter>,
    pub paths: PathSelector,
    pub apis: PackageSelector,
    /// `None` keeps the documentation library's default responses.
    pub response_messages: Option<ResponseMessageTable>,
    pub ignored_parameter_types: Vec<String>,
}

impl DocketDefinition {
    pub fn build(
        group_name: &str,
        info: &DocketInfo,
        properties: &SwaggerProperties,
    ) -> Result<Self, DocketError> {
        let authorization = &properties.authorization;

        let response_messages = if properties.apply_default_response_messages {
            None
        } else {
            Some(
                properties
                    .global_response_message
                    .as_ref()
                    .map(ResponseMessageTable::from)
                    .unwrap_or_default(),
            )
        };

        let definition = Self {
            group_name: group_name.to_string(),
            host: info.host.clone(),
            api_info: ApiInfo::from(info),
            security_contexts: vec![SecurityContext::global(authorization)?],
            security_scheme: security::select_scheme(authorization),
            operation_parameters: parameters::assemble(
                &properties.defaults.global_operation_parameters,
                &info.global_operation_parameters,
            ),
            paths: PathSelector::new(&info.base_path, &info.exclude_path)?,
            apis: PackageSelector::new(&info.base_package),
            response_messages,
            ignored_parameter_types: info.ignored_parameter_types.iter().cloned().collect(),
        };

        tracing::debug!(
            group = %definition.group_name,
            parameters = definition.operation_parameters.len(),
            scheme = ?definition.security_scheme.as_ref().map(SecuritySchemeSpec::name),
            "built docket definition"
        );

        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterPlacement;
    use crate::responses::RequestMethod;
    use docket_config::{
        Contact, GlobalOperationParameter, GlobalResponseMessage, GlobalResponseMessageBody,
    };

    fn header(name: &str, description: &str) -> GlobalOperationParameter {
        GlobalOperationParameter {
            name: name.to_string(),
            description: description.to_string(),
            model_ref: "string".to_string(),
            parameter_type: "header".to_string(),
            required: "true".to_string(),
        }
    }

    #[test]
    fn package_selector_matches_module_prefix() {
        let selector = PackageSelector::new("store::pets");

        assert!(selector.selects(&["store::pets"]));
        assert!(selector.selects(&["other", "store::pets::toys"]));
        assert!(!selector.selects(&["store::petshop"]));
        assert!(!selector.selects::<&str>(&[]));
        assert!(PackageSelector::new("").selects::<&str>(&[]));
    }

    #[test]
    fn api_info_renders_absent_contact_fields_empty() {
        let info = DocketInfo {
            title: "Pets".to_string(),
            contact: Some(Contact {
                name: Some("team".to_string()),
                url: None,
                email: None,
            }),
            ..DocketInfo::default()
        };

        let api_info = ApiInfo::from(&info);
        assert_eq!(api_info.title, "Pets");
        assert_eq!(api_info.contact.name, "team");
        assert_eq!(api_info.contact.url, "");

        assert_eq!(ApiInfo::from(&DocketInfo::default()).contact, ApiContact::default());
    }

    #[test]
    fn definition_merges_parameters_against_top_level() {
        let mut properties = SwaggerProperties::default();
        properties.defaults.global_operation_parameters =
            vec![header("TOKEN", "global"), header("TENANT", "global")];

        let local = DocketInfo {
            global_operation_parameters: vec![header("TOKEN", "local")],
            ..DocketInfo::default()
        };

        let definition = DocketDefinition::build("pets", &local, &properties).unwrap();

        let names: Vec<&str> = definition
            .operation_parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["TENANT", "TOKEN"]);
        assert_eq!(definition.operation_parameters[1].description, "local");
        assert_eq!(
            definition.operation_parameters[0].placement,
            ParameterPlacement::Header
        );
    }

    #[test]
    fn response_table_only_without_default_messages() {
        let mut properties = SwaggerProperties::default();
        properties.global_response_message = Some(GlobalResponseMessage {
            post: vec![GlobalResponseMessageBody {
                code: 400,
                message: "bad".to_string(),
                model_ref: None,
            }],
            ..GlobalResponseMessage::default()
        });

        let with_defaults =
            DocketDefinition::build("default", &properties.defaults, &properties).unwrap();
        assert!(with_defaults.response_messages.is_none());

        properties.apply_default_response_messages = false;
        let custom = DocketDefinition::build("default", &properties.defaults, &properties).unwrap();
        let table = custom.response_messages.unwrap();
        assert_eq!(table.get(RequestMethod::Post)[0].code, 400);
    }

    #[test]
    fn missing_response_block_yields_empty_table() {
        let properties = SwaggerProperties {
            apply_default_response_messages: false,
            ..SwaggerProperties::default()
        };

        let definition =
            DocketDefinition::build("default", &properties.defaults, &properties).unwrap();
        assert!(definition.response_messages.unwrap().is_empty());
    }

    #[test]
    fn security_context_is_attached_even_without_scheme() {
        let mut properties = SwaggerProperties::default();
        properties.authorization.auth_type = "None".to_string();

        let definition =
            DocketDefinition::build("default", &properties.defaults, &properties).unwrap();

        assert!(definition.security_scheme.is_none());
        assert_eq!(definition.security_contexts.len(), 1);
    }
}
