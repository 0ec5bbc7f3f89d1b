use crate::schema::{references, schema_for};
use docket_core::{
    ApiInfo, DocketDefinition, OperationParameter, ParameterPlacement, RequestMethod,
    ResponseMessageTable, SecuritySchemeSpec,
};
use std::collections::BTreeSet;
use utoipa::openapi::content::Content;
use utoipa::openapi::info::{ContactBuilder, Info, InfoBuilder, LicenseBuilder};
use utoipa::openapi::path::{Operation, Parameter, ParameterBuilder, ParameterIn, PathItem};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityRequirement, SecurityScheme,
};
use utoipa::openapi::server::Server;
use utoipa::openapi::{Components, OpenApi, RefOr, Required};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Projects a source document into one document per docket.
///
/// The source is typically `ApiDoc::openapi()` for the whole application;
/// every docket starts from a copy of it.
#[derive(Clone, Copy)]
pub struct DocketBuilder<'a> {
    source: &'a OpenApi,
}

impl<'a> DocketBuilder<'a> {
    pub fn new(source: &'a OpenApi) -> Self {
        Self { source }
    }

    pub fn build(&self, definition: &DocketDefinition) -> OpenApi {
        let mut doc = self.source.clone();

        doc.info = build_info(&definition.api_info);
        if !definition.host.is_empty() {
            doc.servers = Some(vec![Server::new(definition.host.as_str())]);
        }

        select(&mut doc, definition);

        for item in doc.paths.paths.values_mut() {
            for (_, operation) in operations_mut(item) {
                add_operation_parameters(operation, &definition.operation_parameters);
            }
        }

        if let Some(scheme) = &definition.security_scheme {
            doc.components
                .get_or_insert_with(Components::new)
                .add_security_scheme(scheme.name(), security_scheme(scheme));
        }

        for context in &definition.security_contexts {
            for (path, item) in doc.paths.paths.iter_mut() {
                if !context.applies_to(path) {
                    continue;
                }
                for (_, operation) in operations_mut(item) {
                    let security = operation.security.get_or_insert_with(Vec::new);
                    for reference in &context.references {
                        let scopes = reference.scopes.iter().map(|s| s.scope.as_str());
                        security.push(SecurityRequirement::new(
                            reference.reference.as_str(),
                            scopes,
                        ));
                    }
                }
            }
        }

        if let Some(table) = &definition.response_messages {
            apply_response_messages(&mut doc, table);
        }

        remove_ignored_types(&mut doc, &definition.ignored_parameter_types);

        tracing::debug!(
            group = %definition.group_name,
            paths = doc.paths.paths.len(),
            "built docket document"
        );

        doc
    }

    /// Documents for every definition, keyed by group name, in order.
    pub fn build_all(&self, definitions: &[DocketDefinition]) -> Vec<(String, OpenApi)> {
        definitions
            .iter()
            .map(|definition| (definition.group_name.clone(), self.build(definition)))
            .collect()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn build_info(api_info: &ApiInfo) -> Info {
    let contact = &api_info.contact;
    let has_contact = !(contact.name.is_empty() && contact.url.is_empty() && contact.email.is_empty());
    let has_license = !(api_info.license.is_empty() && api_info.license_url.is_empty());

    InfoBuilder::new()
        .title(api_info.title.as_str())
        .version(api_info.version.as_str())
        .description(non_empty(&api_info.description))
        .terms_of_service(non_empty(&api_info.terms_of_service_url))
        .contact(has_contact.then(|| {
            ContactBuilder::new()
                .name(non_empty(&contact.name))
                .url(non_empty(&contact.url))
                .email(non_empty(&contact.email))
                .build()
        }))
        .license(has_license.then(|| {
            LicenseBuilder::new()
                .name(api_info.license.as_str())
                .url(non_empty(&api_info.license_url))
                .build()
        }))
        .build()
}

/// Operation slots of a path item, in table order.
fn operation_slots(item: &mut PathItem) -> [(RequestMethod, &mut Option<Operation>); 8] {
    [
        (RequestMethod::Post, &mut item.post),
        (RequestMethod::Get, &mut item.get),
        (RequestMethod::Put, &mut item.put),
        (RequestMethod::Patch, &mut item.patch),
        (RequestMethod::Delete, &mut item.delete),
        (RequestMethod::Head, &mut item.head),
        (RequestMethod::Options, &mut item.options),
        (RequestMethod::Trace, &mut item.trace),
    ]
}

fn operations_mut(item: &mut PathItem) -> impl Iterator<Item = (RequestMethod, &mut Operation)> {
    operation_slots(item)
        .into_iter()
        .filter_map(|(method, slot)| slot.as_mut().map(|operation| (method, operation)))
}

/// Keep paths accepted by the path selector and operations accepted by the
/// package selector; drop whatever ends up empty.
fn select(doc: &mut OpenApi, definition: &DocketDefinition) {
    doc.paths.paths.retain(|path, item| {
        if !definition.paths.matches(path) {
            return false;
        }

        let mut kept = 0;
        for (_, slot) in operation_slots(item) {
            let selected = slot.as_ref().is_some_and(|operation| {
                definition
                    .apis
                    .selects(operation.tags.as_deref().unwrap_or_default())
            });
            if selected {
                kept += 1;
            } else {
                *slot = None;
            }
        }
        kept > 0
    });

    let mut used_tags = BTreeSet::new();
    for item in doc.paths.paths.values_mut() {
        for (_, operation) in operations_mut(item) {
            used_tags.extend(operation.tags.iter().flatten().cloned());
        }
    }
    if let Some(tags) = doc.tags.as_mut() {
        tags.retain(|tag| used_tags.contains(&tag.name));
    }
}

fn parameter_in(placement: ParameterPlacement) -> Option<ParameterIn> {
    match placement {
        ParameterPlacement::Header => Some(ParameterIn::Header),
        ParameterPlacement::Query => Some(ParameterIn::Query),
        ParameterPlacement::Path => Some(ParameterIn::Path),
        ParameterPlacement::Body | ParameterPlacement::Form => None,
    }
}

fn required(flag: bool) -> Required {
    if flag {
        Required::True
    } else {
        Required::False
    }
}

/// Append global parameters. Parameters the operation already declares
/// (same name and location) are left alone, as is an existing request body.
fn add_operation_parameters(operation: &mut Operation, parameters: &[OperationParameter]) {
    let mut form_fields = Vec::new();

    for parameter in parameters {
        match parameter.placement {
            ParameterPlacement::Body => {
                if operation.request_body.is_none() {
                    operation.request_body = Some(
                        RequestBodyBuilder::new()
                            .description(non_empty(&parameter.description))
                            .content(JSON, Content::new(Some(schema_for(parameter.model.as_ref()))))
                            .required(Some(required(parameter.required)))
                            .build(),
                    );
                }
            }
            ParameterPlacement::Form => form_fields.push(parameter),
            placement => {
                let Some(location) = parameter_in(placement) else {
                    continue;
                };
                let declared = operation.parameters.get_or_insert_with(Vec::new);
                let exists = declared
                    .iter()
                    .any(|p| p.name == parameter.name && p.parameter_in == location);
                if !exists {
                    declared.push(build_parameter(parameter, location));
                }
            }
        }
    }

    if !form_fields.is_empty() && operation.request_body.is_none() {
        let mut form = ObjectBuilder::new().schema_type(Type::Object);
        for field in &form_fields {
            form = form.property(field.name.as_str(), schema_for(field.model.as_ref()));
            if field.required {
                form = form.required(field.name.as_str());
            }
        }
        let schema = RefOr::T(Schema::Object(form.build()));
        operation.request_body = Some(
            RequestBodyBuilder::new()
                .content(FORM, Content::new(Some(schema)))
                .required(Some(required(form_fields.iter().any(|f| f.required))))
                .build(),
        );
    }
}

fn build_parameter(parameter: &OperationParameter, location: ParameterIn) -> Parameter {
    // Path parameters are always required.
    let is_required = parameter.required || location == ParameterIn::Path;

    ParameterBuilder::new()
        .name(parameter.name.as_str())
        .parameter_in(location)
        .description(non_empty(&parameter.description))
        .required(required(is_required))
        .schema(Some(schema_for(parameter.model.as_ref())))
        .build()
}

fn security_scheme(scheme: &SecuritySchemeSpec) -> SecurityScheme {
    match scheme {
        SecuritySchemeSpec::ApiKey { key_name, .. } => {
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(key_name.as_str())))
        }
        SecuritySchemeSpec::BasicAuth { .. } => {
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic))
        }
    }
}

/// Add each method's messages to that method's operations. Status codes an
/// operation documents itself take precedence.
fn apply_response_messages(doc: &mut OpenApi, table: &ResponseMessageTable) {
    for item in doc.paths.paths.values_mut() {
        for (method, operation) in operations_mut(item) {
            for message in table.get(method) {
                let code = message.code.to_string();
                if operation.responses.responses.contains_key(&code) {
                    continue;
                }

                let mut response = ResponseBuilder::new().description(message.message.as_str());
                if let Some(model) = &message.model {
                    response = response.content(JSON, Content::new(Some(schema_for(Some(model)))));
                }
                operation
                    .responses
                    .responses
                    .insert(code, RefOr::T(response.build()));
            }
        }
    }
}

/// Drop ignored types from the document. Parameters of those types go away,
/// request body and response media types referencing them are stripped, and
/// the component schema is removed unless a kept schema still embeds it.
fn remove_ignored_types(doc: &mut OpenApi, ignored: &[String]) {
    if ignored.is_empty() {
        return;
    }
    let is_ignored = |name: &str| ignored.iter().any(|ignored| ignored == name);
    let refers = |schema: &Option<RefOr<Schema>>| {
        schema.as_ref().is_some_and(|schema| references(schema, &is_ignored))
    };

    for item in doc.paths.paths.values_mut() {
        for (_, operation) in operations_mut(item) {
            if let Some(parameters) = operation.parameters.as_mut() {
                parameters.retain(|parameter| !refers(&parameter.schema));
            }

            if let Some(body) = operation.request_body.as_mut() {
                body.content.retain(|_, content| !refers(&content.schema));
                if body.content.is_empty() {
                    operation.request_body = None;
                }
            }

            for response in operation.responses.responses.values_mut() {
                if let RefOr::T(response) = response {
                    response.content.retain(|_, content| !refers(&content.schema));
                }
            }
        }
    }

    if let Some(components) = doc.components.as_mut() {
        let embedded: BTreeSet<String> = ignored
            .iter()
            .filter(|name| {
                let wanted = |candidate: &str| candidate == name.as_str();
                components.schemas.iter().any(|(owner, schema)| {
                    !is_ignored(owner.as_str()) && references(schema, &wanted)
                })
            })
            .cloned()
            .collect();

        components
            .schemas
            .retain(|name, _| !is_ignored(name.as_str()) || embedded.contains(name));
    }
}
