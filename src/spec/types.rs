use http::Method;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Field name reserved for the external, globally-unique identifier.
pub const EXTERNAL_ID_FIELD: &str = "gid";

/// Field name reserved for free-form long text.
pub const LONG_TEXT_FIELD: &str = "notes";

/// Closed set of reference-like field names and the table each one points at.
///
/// This is the only place reference intent is declared. Everything downstream
/// (columns, relationships, schemas, accessors) reads [`FieldRole::Reference`].
pub const REFERENCE_FIELDS: &[(&str, &str)] = &[
    ("workspace", "workspaces"),
    ("project", "projects"),
    ("assignee", "users"),
    ("parent", "tasks"),
    ("task", "tasks"),
    ("created_by", "users"),
];

/// `{name}` placeholder in a URL template.
#[allow(clippy::expect_used)]
static PATH_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("path placeholder regex should be valid"));

/// Convert a snake_case string to CamelCase
///
/// Used for class names derived from table or field names.
///
/// # Example
///
/// ```
/// use clooney::spec::to_camel_case;
/// assert_eq!(to_camel_case("created_by"), "CreatedBy");
/// ```
pub fn to_camel_case(s: &str) -> String {
    s.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Primitive type tag attached to a declared field.
///
/// Unknown tags are kept verbatim in [`TypeTag::Other`] and degrade to the
/// default string representation wherever they are mapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Text,
    Boolean,
    Date,
    Datetime,
    Integer,
    Other(String),
}

impl TypeTag {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "string" => TypeTag::String,
            "text" => TypeTag::Text,
            "boolean" => TypeTag::Boolean,
            "date" => TypeTag::Date,
            "datetime" => TypeTag::Datetime,
            "integer" => TypeTag::Integer,
            other => TypeTag::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::String => "string",
            TypeTag::Text => "text",
            TypeTag::Boolean => "boolean",
            TypeTag::Date => "date",
            TypeTag::Datetime => "datetime",
            TypeTag::Integer => "integer",
            TypeTag::Other(tag) => tag,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a field plays in the generated backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRole {
    /// The external identifier (`gid`): unique, non-null, never client supplied.
    ExternalId,
    /// A reference to another table, stored as `<name>_id`.
    Reference { target: String },
    /// Unbounded text (`notes`).
    LongText,
    /// Anything else, typed through its [`TypeTag`].
    Plain,
}

impl FieldRole {
    /// Classify a field by name. The single source of reference detection.
    pub fn classify(name: &str) -> Self {
        if name == EXTERNAL_ID_FIELD {
            return FieldRole::ExternalId;
        }
        if let Some(target) = reference_target(name) {
            return FieldRole::Reference {
                target: target.to_string(),
            };
        }
        if name == LONG_TEXT_FIELD {
            return FieldRole::LongText;
        }
        FieldRole::Plain
    }
}

/// Table referenced by a reference-like field name, if the name is in the closed set.
pub fn reference_target(name: &str) -> Option<&'static str> {
    REFERENCE_FIELDS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, table)| *table)
}

/// A declared field of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub tag: TypeTag,
    pub role: FieldRole,
}

impl FieldDef {
    pub fn new(name: &str, tag: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: TypeTag::parse(tag),
            role: FieldRole::classify(name),
        }
    }

    /// Storage column name: `<name>_id` for references, the field name otherwise.
    pub fn column_name(&self) -> String {
        match self.role {
            FieldRole::Reference { .. } => format!("{}_id", self.name),
            _ => self.name.clone(),
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match &self.role {
            FieldRole::Reference { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_client_writable(&self) -> bool {
        self.role != FieldRole::ExternalId
    }
}

/// Ordered field schema of one resource (e.g. `Task`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl ResourceSchema {
    /// Build a resource from a raw, ordered `field → type tag` mapping.
    pub fn from_tags<'a, I>(name: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            name: name.to_string(),
            fields: tags
                .into_iter()
                .map(|(field, tag)| FieldDef::new(field, tag))
                .collect(),
        }
    }

    /// Lower-cased, pluralised table name (`Story` → `stories`).
    pub fn table_name(&self) -> String {
        pluralizer::pluralize(&self.name.to_lowercase(), 2, false)
    }

    /// Lower-cased singular name (`Story` → `story`).
    pub fn singular(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields a client may send on create/update (everything but `gid`).
    pub fn input_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_client_writable())
    }

    pub fn references(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.reference().is_some())
    }

    /// First reference field whose target is `table`.
    pub fn reference_to(&self, table: &str) -> Option<&FieldDef> {
        self.references().find(|f| f.reference() == Some(table))
    }
}

/// One endpoint of the described API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub method: Method,
    /// URL template with `{param}` placeholders.
    pub path: String,
    /// Operation name, used as `operationId` and handler name.
    pub name: String,
    /// Owning resource, by table name (`tasks`).
    pub resource: String,
}

impl EndpointDescriptor {
    pub fn new(method: Method, path: &str, name: &str, resource: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            name: name.to_string(),
            resource: resource.to_string(),
        }
    }

    /// `{name}` placeholders in template order, without duplicates.
    pub fn path_params(&self) -> Vec<String> {
        path_params(&self.path)
    }

    /// Literal path segments, placeholders included.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// Extract `{name}` placeholders from a URL template, order-preserving.
pub fn path_params(template: &str) -> Vec<String> {
    let mut params: Vec<String> = Vec::new();
    for caps in PATH_PARAM_RE.captures_iter(template) {
        let name = &caps[1];
        if !params.iter().any(|p| p == name) {
            params.push(name.to_string());
        }
    }
    params
}

/// The complete in-memory API description driving one generation run.
#[derive(Debug, Clone)]
pub struct ApiSpec {
    pub title: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointDescriptor>,
    /// Resources keyed by their declared name (`Task`), in declaration order.
    pub resources: IndexMap<String, ResourceSchema>,
}

impl ApiSpec {
    pub fn resource_for_table(&self, table: &str) -> Option<&ResourceSchema> {
        self.resources.values().find(|r| r.table_name() == table)
    }
}
