use docket_config::GlobalOperationParameter;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

/// Merge docket-local parameters over the global list.
///
/// Global parameters not overridden by name keep their order and come
/// first; every local parameter follows in its own order. Local duplicates
/// are kept.
pub fn merge(
    global: &[GlobalOperationParameter],
    local: &[GlobalOperationParameter],
) -> Vec<GlobalOperationParameter> {
    if local.is_empty() {
        return global.to_vec();
    }

    let overridden: IndexSet<&str> = local.iter().map(|p| p.name.as_str()).collect();

    global
        .iter()
        .filter(|p| !overridden.contains(p.name.as_str()))
        .chain(local)
        .cloned()
        .collect()
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterPlacement {
    Header,
    Query,
    Path,
    Body,
    Form,
}

impl ParameterPlacement {
    /// Case-insensitive; anything unrecognised is a query parameter.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "header" => Self::Header,
            "path" => Self::Path,
            "body" => Self::Body,
            "form" | "formdata" => Self::Form,
            _ => Self::Query,
        }
    }
}

/// Reference to a parameter or response type, either a primitive name
/// (`string`, `int`, ...) or a component schema name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModelRef(String);

impl ModelRef {
    /// `None` for an empty reference.
    pub fn new(type_name: &str) -> Option<Self> {
        let type_name = type_name.trim();
        (!type_name.is_empty()).then(|| Self(type_name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A typed global operation parameter, ready for the document builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationParameter {
    pub name: String,
    pub description: String,
    pub model: Option<ModelRef>,
    pub placement: ParameterPlacement,
    pub required: bool,
}

impl From<&GlobalOperationParameter> for OperationParameter {
    fn from(parameter: &GlobalOperationParameter) -> Self {
        Self {
            name: parameter.name.clone(),
            description: parameter.description.clone(),
            model: ModelRef::new(&parameter.model_ref),
            placement: ParameterPlacement::parse(&parameter.parameter_type),
            required: parameter.required.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// [`merge`] followed by conversion to [`OperationParameter`]s.
pub fn assemble(
    global: &[GlobalOperationParameter],
    local: &[GlobalOperationParameter],
) -> Vec<OperationParameter> {
    merge(global, local)
        .iter()
        .map(OperationParameter::from)
        .collect()
}
