use docket_core::ModelRef;
use utoipa::openapi::schema::{
    AdditionalProperties, ArrayItems, KnownFormat, ObjectBuilder, Ref, Schema, SchemaFormat, Type,
};
use utoipa::openapi::RefOr;

/// Schema for a type reference.
///
/// Primitive names map to inline schemas; anything else is taken to be a
/// component schema name. A missing reference is a plain string.
pub fn schema_for(model: Option<&ModelRef>) -> RefOr<Schema> {
    let Some(model) = model else {
        return primitive(Type::String, None);
    };

    match model.as_str().to_ascii_lowercase().as_str() {
        "string" => primitive(Type::String, None),
        "int" | "integer" | "int32" => primitive(Type::Integer, Some(KnownFormat::Int32)),
        "long" | "int64" => primitive(Type::Integer, Some(KnownFormat::Int64)),
        "boolean" | "bool" => primitive(Type::Boolean, None),
        "number" | "double" => primitive(Type::Number, Some(KnownFormat::Double)),
        "float" => primitive(Type::Number, Some(KnownFormat::Float)),
        "file" => primitive(Type::String, Some(KnownFormat::Binary)),
        _ => RefOr::Ref(Ref::from_schema_name(model.as_str())),
    }
}

fn primitive(schema_type: Type, format: Option<KnownFormat>) -> RefOr<Schema> {
    let object = ObjectBuilder::new()
        .schema_type(schema_type)
        .format(format.map(SchemaFormat::KnownFormat))
        .build();
    RefOr::T(Schema::Object(object))
}

/// Component schema name behind a `#/components/schemas/...` reference.
pub fn referenced_schema(schema: &RefOr<Schema>) -> Option<&str> {
    match schema {
        RefOr::Ref(reference) => reference.ref_location.rsplit('/').next(),
        RefOr::T(_) => None,
    }
}

/// Whether `schema` or anything nested in it references a component schema
/// accepted by `matches`.
pub fn references<F>(schema: &RefOr<Schema>, matches: &F) -> bool
where
    F: Fn(&str) -> bool,
{
    let schema = match schema {
        RefOr::Ref(_) => return referenced_schema(schema).is_some_and(matches),
        RefOr::T(schema) => schema,
    };

    match schema {
        Schema::Object(object) => {
            object.properties.values().any(|p| references(p, matches))
                || object.additional_properties.as_deref().is_some_and(|extra| match extra {
                    AdditionalProperties::RefOr(inner) => references(inner, matches),
                    AdditionalProperties::FreeForm(_) => false,
                })
        }
        Schema::Array(array) => match &array.items {
            ArrayItems::RefOrSchema(items) => references(items, matches),
            ArrayItems::False => false,
        },
        Schema::OneOf(one_of) => one_of.items.iter().any(|s| references(s, matches)),
        Schema::AllOf(all_of) => all_of.items.iter().any(|s| references(s, matches)),
        Schema::AnyOf(any_of) => any_of.items.iter().any(|s| references(s, matches)),
        _ => false,
    }
}
