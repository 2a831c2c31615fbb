use anyhow::Context;
use serde_json::{json, Map, Value};

use crate::spec::{to_camel_case, ApiSpec, EndpointDescriptor, ResourceSchema, TypeTag};

/// OpenAPI primitive for a type tag, plus an optional `format` hint.
pub fn openapi_type(tag: &TypeTag) -> (&'static str, Option<&'static str>) {
    match tag {
        TypeTag::String | TypeTag::Text | TypeTag::Datetime => ("string", None),
        TypeTag::Boolean => ("boolean", None),
        TypeTag::Date => ("string", Some("date")),
        TypeTag::Integer => ("integer", None),
        TypeTag::Other(_) => ("string", None),
    }
}

/// Component schema name for an endpoint's owning resource (`stories` → `Story`).
///
/// Resources missing from the `ApiSpec` fall back to the table name in
/// CamelCase with a single trailing `s` removed.
pub fn schema_name_for(spec: &ApiSpec, resource: &str) -> String {
    spec.resource_for_table(resource)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| to_camel_case(resource.strip_suffix('s').unwrap_or(resource)))
}

fn schema_properties(resource: &ResourceSchema) -> Map<String, Value> {
    resource
        .fields
        .iter()
        .map(|field| {
            let (ty, format) = openapi_type(&field.tag);
            let mut property = Map::new();
            property.insert("type".to_string(), Value::from(ty));
            if let Some(format) = format {
                property.insert("format".to_string(), Value::from(format));
            }
            (field.name.clone(), Value::Object(property))
        })
        .collect()
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

/// Operation object for one endpoint.
pub fn endpoint_operation(spec: &ApiSpec, endpoint: &EndpointDescriptor) -> Value {
    let schema = schema_name_for(spec, &endpoint.resource);
    let mut op = Map::new();
    op.insert("summary".into(), Value::from(title_case(&endpoint.name)));
    op.insert("operationId".into(), Value::from(endpoint.name.clone()));
    op.insert("tags".into(), json!([endpoint.resource]));

    let params = endpoint.path_params();
    if !params.is_empty() {
        let parameters: Vec<Value> = params
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" }
                })
            })
            .collect();
        op.insert("parameters".into(), Value::Array(parameters));
    }

    if endpoint.method == http::Method::POST || endpoint.method == http::Method::PUT {
        op.insert(
            "requestBody".into(),
            json!({
                "required": true,
                "content": { "application/json": { "schema": schema_ref(&schema) } }
            }),
        );
    }

    op.insert(
        "responses".into(),
        json!({
            "200": {
                "description": "Successful response",
                "content": { "application/json": { "schema": schema_ref(&schema) } }
            }
        }),
    );
    Value::Object(op)
}

/// Build the OpenAPI 3.0 document for an `ApiSpec`.
///
/// Component schemas come from the resource field maps; paths are grouped by
/// URL template in first-seen order.
pub fn generate_openapi(spec: &ApiSpec) -> Value {
    let mut schemas = Map::new();
    for resource in spec.resources.values() {
        schemas.insert(
            resource.name.clone(),
            json!({
                "type": "object",
                "properties": Value::Object(schema_properties(resource)),
            }),
        );
    }

    let mut paths: Map<String, Value> = Map::new();
    for endpoint in &spec.endpoints {
        let item = paths
            .entry(endpoint.path.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = item {
            item.insert(
                endpoint.method.as_str().to_lowercase(),
                endpoint_operation(spec, endpoint),
            );
        }
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": spec.title,
            "version": spec.version,
            "description": spec.description,
        },
        "paths": Value::Object(paths),
        "components": { "schemas": Value::Object(schemas) },
    })
}

/// Serialize an OpenAPI document to YAML, keeping key order.
pub fn openapi_to_yaml(doc: &Value) -> anyhow::Result<String> {
    serde_yaml::to_string(doc).context("Failed to serialize OpenAPI document to YAML")
}
