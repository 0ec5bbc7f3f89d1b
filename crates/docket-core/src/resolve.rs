use crate::docket::DocketDefinition;
use crate::error::DocketError;
use docket_config::{Contact, DocketInfo, SwaggerProperties};
use indexmap::IndexMap;
use serde::Serialize;

/// Group name used when no named dockets are configured.
pub const DEFAULT_GROUP: &str = "default";

/// Resolve named dockets against the top-level defaults.
///
/// With no named dockets the defaults are returned verbatim under
/// [`DEFAULT_GROUP`]. Otherwise each docket inherits the defaults' scalar
/// fields where its own are empty, and the defaults' contact where it has
/// none. List fields are never inherited.
pub fn resolve(
    defaults: &DocketInfo,
    named: &IndexMap<String, DocketInfo>,
) -> IndexMap<String, DocketInfo> {
    if named.is_empty() {
        let mut only = IndexMap::with_capacity(1);
        only.insert(DEFAULT_GROUP.to_string(), defaults.clone());
        return only;
    }

    named
        .iter()
        .map(|(name, info)| (name.clone(), inherit(defaults, info.clone())))
        .collect()
}

fn inherit(defaults: &DocketInfo, mut info: DocketInfo) -> DocketInfo {
    fill_empty(&mut info.title, &defaults.title);
    fill_empty(&mut info.description, &defaults.description);
    fill_empty(&mut info.version, &defaults.version);
    fill_empty(&mut info.license, &defaults.license);
    fill_empty(&mut info.license_url, &defaults.license_url);
    fill_empty(&mut info.terms_of_service_url, &defaults.terms_of_service_url);
    fill_empty(&mut info.host, &defaults.host);
    fill_empty(&mut info.base_package, &defaults.base_package);

    // Contact fields fall back on absence only; an explicit "" is kept.
    info.contact = match info.contact.take() {
        None => defaults.contact.clone(),
        Some(contact) => Some(inherit_contact(defaults.contact.as_ref(), contact)),
    };

    info
}

fn inherit_contact(defaults: Option<&Contact>, contact: Contact) -> Contact {
    let defaults = defaults.cloned().unwrap_or_default();

    Contact {
        name: contact.name.or(defaults.name),
        url: contact.url.or(defaults.url),
        email: contact.email.or(defaults.email),
    }
}

fn fill_empty(field: &mut String, fallback: &str) {
    if field.is_empty() {
        fallback.clone_into(field);
    }
}

/// Resolved dockets for one [`SwaggerProperties`] tree.
///
/// Built once at startup; read-only afterwards.
#[derive(Debug)]
pub struct DocketResolver<'a> {
    properties: &'a SwaggerProperties,
    dockets: IndexMap<String, DocketInfo>,
}

impl<'a> DocketResolver<'a> {
    pub fn new(properties: &'a SwaggerProperties) -> Result<Self, DocketError> {
        let dockets = resolve(&properties.defaults, &properties.docket);

        if tracing::enabled!(tracing::Level::DEBUG) {
            let mut report = String::new();
            for (name, info) in &dockets {
                report.push_str(&format!("{}:\n{}", name, prettify(info, 4)?));
            }
            tracing::debug!(count = dockets.len(), "resolved swagger dockets\n{}", report);
        }

        Ok(Self {
            properties,
            dockets,
        })
    }

    pub fn properties(&self) -> &SwaggerProperties {
        self.properties
    }

    pub fn dockets(&self) -> &IndexMap<String, DocketInfo> {
        &self.dockets
    }

    pub fn get(&self, group_name: &str) -> Option<&DocketInfo> {
        self.dockets.get(group_name)
    }

    /// One builder definition per resolved docket, in resolution order.
    pub fn definitions(&self) -> Result<Vec<DocketDefinition>, DocketError> {
        self.dockets
            .iter()
            .map(|(name, info)| DocketDefinition::build(name, info, self.properties))
            .collect()
    }
}

/// Pretty-print `value` as JSON with every line indented by `indent` spaces.
pub fn prettify<T: Serialize>(value: &T, indent: usize) -> Result<String, DocketError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| DocketError::Serialize {
        type_name: std::any::type_name::<T>(),
        source,
    })?;

    let pad = " ".repeat(indent);
    Ok(json.lines().map(|line| format!("{pad}{line}\n")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DocketInfo {
        DocketInfo {
            title: "Store API".to_string(),
            description: "all of it".to_string(),
            version: "2.0".to_string(),
            license: "MIT".to_string(),
            license_url: "https://license".to_string(),
            terms_of_service_url: "https://tos".to_string(),
            host: "api.example.com".to_string(),
            base_package: "store".to_string(),
            base_path: vec!["/api/**".to_string()],
            contact: Some(Contact::new("team", "https://team", "team@example.com")),
            ..DocketInfo::default()
        }
    }

    #[test]
    fn empty_docket_map_yields_defaults_under_default_group() {
        let defaults = defaults();
        let resolved = resolve(&defaults, &IndexMap::new());

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[DEFAULT_GROUP], defaults);
    }

    #[test]
    fn empty_scalars_fall_back_to_defaults() {
        let mut named = IndexMap::new();
        named.insert("blank".to_string(), DocketInfo::default());
        named.insert(
            "custom".to_string(),
            DocketInfo {
                title: "Custom".to_string(),
                host: "custom.example.com".to_string(),
                ..DocketInfo::default()
            },
        );

        let resolved = resolve(&defaults(), &named);

        let blank = &resolved["blank"];
        assert_eq!(blank.title, "Store API");
        assert_eq!(blank.description, "all of it");
        assert_eq!(blank.version, "2.0");
        assert_eq!(blank.license, "MIT");
        assert_eq!(blank.license_url, "https://license");
        assert_eq!(blank.terms_of_service_url, "https://tos");
        assert_eq!(blank.host, "api.example.com");
        assert_eq!(blank.base_package, "store");

        let custom = &resolved["custom"];
        assert_eq!(custom.title, "Custom");
        assert_eq!(custom.host, "custom.example.com");
        assert_eq!(custom.version, "2.0");
    }

    #[test]
    fn lists_are_not_inherited() {
        let mut named = IndexMap::new();
        named.insert("blank".to_string(), DocketInfo::default());

        let resolved = resolve(&defaults(), &named);
        assert!(resolved["blank"].base_path.is_empty());
    }

    #[test]
    fn missing_contact_reuses_default_contact() {
        let mut named = IndexMap::new();
        named.insert("blank".to_string(), DocketInfo::default());

        let resolved = resolve(&defaults(), &named);
        assert_eq!(resolved["blank"].contact, defaults().contact);
    }

    #[test]
    fn contact_fields_fall_back_only_when_absent() {
        let mut named = IndexMap::new();
        named.insert(
            "partial".to_string(),
            DocketInfo {
                contact: Some(Contact {
                    name: Some("y".to_string()),
                    url: None,
                    email: Some("x".to_string()),
                }),
                ..DocketInfo::default()
            },
        );
        named.insert(
            "explicit-empty".to_string(),
            DocketInfo {
                contact: Some(Contact {
                    name: Some(String::new()),
                    url: None,
                    email: None,
                }),
                ..DocketInfo::default()
            },
        );

        let resolved = resolve(&defaults(), &named);

        let partial = resolved["partial"].contact.clone().unwrap();
        assert_eq!(partial.url.as_deref(), Some("https://team"));
        assert_eq!(partial.email.as_deref(), Some("x"));
        assert_eq!(partial.name.as_deref(), Some("y"));

        let explicit = resolved["explicit-empty"].contact.clone().unwrap();
        assert_eq!(explicit.name.as_deref(), Some(""));
        assert_eq!(explicit.email.as_deref(), Some("team@example.com"));
    }

    #[test]
    fn resolution_keeps_docket_order() {
        let mut named = IndexMap::new();
        for name in ["zeta", "alpha", "mid"] {
            named.insert(name.to_string(), DocketInfo::default());
        }

        let resolved = resolve(&defaults(), &named);
        let names: Vec<&str> = resolved.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn resolver_does_not_touch_defaults() {
        let mut properties = SwaggerProperties {
            defaults: defaults(),
            ..SwaggerProperties::default()
        };
        properties
            .docket
            .insert("pets".to_string(), DocketInfo::default());

        let resolver = DocketResolver::new(&properties).unwrap();
        assert_eq!(resolver.get("pets").unwrap().title, "Store API");
        assert!(resolver.get(DEFAULT_GROUP).is_none());
        assert_eq!(resolver.properties().defaults, defaults());
    }

    #[test]
    fn prettify_indents_each_line() {
        let rendered = prettify(&Contact::new("a", "b", "c"), 4).unwrap();

        assert!(rendered.lines().all(|line| line.starts_with("    ")));
        assert!(rendered.contains("\"name\": \"a\""));
    }
}
