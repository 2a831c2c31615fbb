use indexmap::IndexMap;
use std::fmt;

use crate::spec::{ApiSpec, FieldDef, FieldRole, ResourceSchema, TypeTag, EXTERNAL_ID_FIELD};

/// Length of every bounded string column.
pub const VARCHAR_LEN: u16 = 255;

/// SQL column type emitted into DDL and mapped onto persistence entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    /// Auto-incrementing integer identity.
    Serial,
    Varchar(u16),
    Text,
    Boolean,
    Date,
    Timestamp,
    Integer,
}

impl SqlType {
    /// Fixed primitive-type table. Unknown tags fall back to a bounded varchar.
    pub fn for_tag(tag: &TypeTag) -> Self {
        match tag {
            TypeTag::String => SqlType::Varchar(VARCHAR_LEN),
            TypeTag::Text => SqlType::Text,
            TypeTag::Boolean => SqlType::Boolean,
            TypeTag::Date => SqlType::Date,
            TypeTag::Datetime => SqlType::Timestamp,
            TypeTag::Integer => SqlType::Integer,
            TypeTag::Other(_) => SqlType::Varchar(VARCHAR_LEN),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Serial => f.write_str("SERIAL"),
            SqlType::Varchar(len) => write!(f, "VARCHAR({len})"),
            SqlType::Text => f.write_str("TEXT"),
            SqlType::Boolean => f.write_str("BOOLEAN"),
            SqlType::Date => f.write_str("DATE"),
            SqlType::Timestamp => f.write_str("TIMESTAMP"),
            SqlType::Integer => f.write_str("INTEGER"),
        }
    }
}

/// Server-side column default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    CurrentTimestamp,
}

impl fmt::Display for ColumnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDefault::CurrentTimestamp => f.write_str("CURRENT_TIMESTAMP"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub sql_type: SqlType,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub default: Option<ColumnDefault>,
    /// Referenced table, for foreign-key columns.
    pub references: Option<String>,
}

impl ColumnDescriptor {
    fn new(name: &str, sql_type: SqlType) -> Self {
        Self {
            name: name.to_string(),
            sql_type,
            nullable: true,
            unique: false,
            primary_key: false,
            default: None,
            references: None,
        }
    }

    fn identity() -> Self {
        Self {
            nullable: false,
            primary_key: true,
            ..Self::new("id", SqlType::Serial)
        }
    }

    fn external_id() -> Self {
        Self {
            nullable: false,
            unique: true,
            ..Self::new(EXTERNAL_ID_FIELD, SqlType::Varchar(VARCHAR_LEN))
        }
    }

    fn timestamp(name: &str) -> Self {
        Self {
            nullable: false,
            default: Some(ColumnDefault::CurrentTimestamp),
            ..Self::new(name, SqlType::Timestamp)
        }
    }

    fn for_field(field: &FieldDef) -> Self {
        match &field.role {
            FieldRole::ExternalId => Self::external_id(),
            FieldRole::Reference { target } => Self {
                references: Some(target.clone()),
                ..Self::new(&field.column_name(), SqlType::Integer)
            },
            FieldRole::LongText => Self::new(&field.name, SqlType::Text),
            FieldRole::Plain => Self::new(&field.name, SqlType::for_tag(&field.tag)),
        }
    }

    pub fn is_timestamp(&self) -> bool {
        self.sql_type == SqlType::Timestamp && self.default.is_some()
    }
}

/// One foreign-key relationship: `field` on the owning table → `references(id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub field: String,
    pub references: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    /// Declared resource name (`Task`).
    pub resource: String,
    pub columns: Vec<ColumnDescriptor>,
    pub relationships: Vec<Relationship>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Relational schema, keyed by table name in resource declaration order.
pub type DbSchema = IndexMap<String, TableSchema>;

/// Convert a resource's declared fields into its ordered column list.
///
/// The list always opens with the identity column and closes with
/// `created_at` / `updated_at`. A resource that does not declare `gid` still
/// gets the external-id column, directly after `id`.
pub fn convert_fields_to_columns(resource: &ResourceSchema) -> Vec<ColumnDescriptor> {
    let mut columns = vec![ColumnDescriptor::identity()];
    if resource.field(EXTERNAL_ID_FIELD).is_none() {
        columns.push(ColumnDescriptor::external_id());
    }
    columns.extend(resource.fields.iter().map(ColumnDescriptor::for_field));
    columns.push(ColumnDescriptor::timestamp("created_at"));
    columns.push(ColumnDescriptor::timestamp("updated_at"));
    columns
}

/// One relationship per reference field, in declaration order.
pub fn extract_relationships(resource: &ResourceSchema) -> Vec<Relationship> {
    resource
        .references()
        .filter_map(|field| {
            field.reference().map(|target| Relationship {
                field: field.column_name(),
                references: target.to_string(),
            })
        })
        .collect()
}

pub fn analyze_resource(resource: &ResourceSchema) -> TableSchema {
    TableSchema {
        name: resource.table_name(),
        resource: resource.name.clone(),
        columns: convert_fields_to_columns(resource),
        relationships: extract_relationships(resource),
    }
}

/// Derive the relational schema for every resource of an `ApiSpec`.
pub fn analyze_schema(spec: &ApiSpec) -> DbSchema {
    let schema: DbSchema = spec
        .resources
        .values()
        .map(analyze_resource)
        .map(|table| (table.name.clone(), table))
        .collect();
    tracing::debug!(tables = schema.len(), "analyzed relational schema");
    schema
}
