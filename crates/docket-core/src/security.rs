use crate::error::DocketError;
use docket_config::Authorization;
use regex::Regex;

/// Scope granted by the global security reference.
pub const GLOBAL_SCOPE: &str = "global";
pub const GLOBAL_SCOPE_DESCRIPTION: &str = "accessEverything";

/// The single security scheme attached to a docket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecuritySchemeSpec {
    /// Api key carried in the `key_name` header.
    ApiKey { name: String, key_name: String },
    BasicAuth { name: String },
}

impl SecuritySchemeSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::ApiKey { name, .. } | Self::BasicAuth { name } => name,
        }
    }
}

/// `BasicAuth` and `None` are recognised case-insensitively; any other type
/// falls back to an api key.
pub fn select_scheme(authorization: &Authorization) -> Option<SecuritySchemeSpec> {
    let kind = authorization.auth_type.trim();

    if kind.eq_ignore_ascii_case("basicauth") {
        Some(SecuritySchemeSpec::BasicAuth {
            name: authorization.name.clone(),
        })
    } else if kind.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(SecuritySchemeSpec::ApiKey {
            name: authorization.name.clone(),
            key_name: authorization.key_name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationScope {
    pub scope: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityReference {
    pub reference: String,
    pub scopes: Vec<AuthorizationScope>,
}

/// Security references applied to every path matching `paths`.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    pub references: Vec<SecurityReference>,
    paths: Regex,
}

impl SecurityContext {
    /// The context every docket carries, whatever scheme was selected.
    pub fn global(authorization: &Authorization) -> Result<Self, DocketError> {
        let reference = SecurityReference {
            reference: authorization.name.clone(),
            scopes: vec![AuthorizationScope {
                scope: GLOBAL_SCOPE.to_string(),
                description: GLOBAL_SCOPE_DESCRIPTION.to_string(),
            }],
        };

        Ok(Self {
            references: vec![reference],
            paths: compile_full_match(&authorization.auth_regex)?,
        })
    }

    /// `true` when the whole path matches the context's regex.
    pub fn applies_to(&self, path: &str) -> bool {
        self.paths.is_match(path)
    }
}

fn compile_full_match(pattern: &str) -> Result<Regex, DocketError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| DocketError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
