use crate::analyzer::{ColumnDefault, ColumnDescriptor, SqlType};
use crate::spec::{FieldDef, FieldRole, TypeTag};

/// Python string literal with double quotes.
///
/// Control characters are escaped so the literal always stays on one line.
pub fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Annotation used for a client-writable field on the pydantic input models.
///
/// References are opaque external ids, so they are always `str`.
pub fn pydantic_input_type(field: &FieldDef) -> &'static str {
    if field.reference().is_some() {
        return "Optional[str]";
    }
    match field.tag {
        TypeTag::Boolean => "Optional[bool]",
        TypeTag::Date => "Optional[date]",
        TypeTag::Datetime => "Optional[datetime]",
        TypeTag::Integer => "Optional[int]",
        TypeTag::String | TypeTag::Text | TypeTag::Other(_) => "Optional[str]",
    }
}

/// Annotation for a server-assigned column on the response model.
pub fn pydantic_output_type(column: &ColumnDescriptor) -> String {
    let base = match column.sql_type {
        SqlType::Serial | SqlType::Integer => "int",
        SqlType::Varchar(_) | SqlType::Text => "str",
        SqlType::Boolean => "bool",
        SqlType::Date => "date",
        SqlType::Timestamp => "datetime",
    };
    if column.nullable {
        format!("Optional[{base}] = None")
    } else {
        base.to_string()
    }
}

/// Python literal used as a sample value for a field in generated tests.
///
/// Returns `None` for fields that cannot be filled without other records
/// (references) or that the server assigns (`gid`).
pub fn sample_value(resource: &str, field: &FieldDef) -> Option<String> {
    match field.role {
        FieldRole::ExternalId | FieldRole::Reference { .. } => None,
        FieldRole::LongText => Some(py_str(&format!("{resource} {}", field.name))),
        FieldRole::Plain => Some(match field.tag {
            TypeTag::Boolean => "False".to_string(),
            TypeTag::Date => py_str("2024-01-15"),
            TypeTag::Datetime => py_str("2024-01-15T09:30:00"),
            TypeTag::Integer => "1".to_string(),
            TypeTag::String | TypeTag::Text | TypeTag::Other(_) => {
                if field.name == "name" {
                    py_str(&format!("Test {resource}"))
                } else {
                    py_str(&format!("{resource} {}", field.name))
                }
            }
        }),
    }
}

/// Whether a field's sample value round-trips unchanged through the API.
pub fn is_echoed_string(field: &FieldDef) -> bool {
    matches!(field.role, FieldRole::Plain | FieldRole::LongText)
        && matches!(
            field.tag,
            TypeTag::String | TypeTag::Text | TypeTag::Other(_)
        )
}

/// SQLAlchemy type expression, with an optional module prefix (`sa.`).
pub fn sqlalchemy_type(ty: SqlType, prefix: &str) -> String {
    match ty {
        SqlType::Serial | SqlType::Integer => format!("{prefix}Integer"),
        SqlType::Varchar(len) => format!("{prefix}String({len})"),
        SqlType::Text => format!("{prefix}Text"),
        SqlType::Boolean => format!("{prefix}Boolean"),
        SqlType::Date => format!("{prefix}Date"),
        SqlType::Timestamp => format!("{prefix}DateTime(timezone=True)"),
    }
}

fn column_options(column: &ColumnDescriptor, func: &str, index_keys: bool) -> Vec<String> {
    let mut options = Vec::new();
    if column.primary_key {
        options.push("primary_key=True".to_string());
    }
    if column.unique {
        options.push("unique=True".to_string());
    }
    if let Some(ColumnDefault::CurrentTimestamp) = column.default {
        options.push(format!("server_default={func}.now()"));
        if column.name == "updated_at" {
            options.push(format!("onupdate={func}.now()"));
        }
    }
    if !column.primary_key {
        options.push(format!(
            "nullable={}",
            if column.nullable { "True" } else { "False" }
        ));
    }
    if index_keys && (column.primary_key || column.unique) {
        options.push("index=True".to_string());
    }
    options
}

/// `Column(...)` expression for a persistence entity attribute.
pub fn model_column(column: &ColumnDescriptor) -> String {
    let mut args = vec![sqlalchemy_type(column.sql_type, "")];
    if let Some(table) = &column.references {
        args.push(format!(
            "ForeignKey({}, ondelete=\"CASCADE\")",
            py_str(&format!("{table}.id"))
        ));
    }
    args.extend(column_options(column, "func", true));
    format!("Column({})", args.join(", "))
}

/// `sa.Column(...)` expression for a migration's `op.create_table`.
pub fn migration_column(column: &ColumnDescriptor) -> String {
    let ty = match column.sql_type {
        SqlType::Varchar(len) => format!("sa.String(length={len})"),
        SqlType::Timestamp => "sa.DateTime(timezone=True)".to_string(),
        other => format!("{}()", sqlalchemy_type(other, "sa.")),
    };
    let mut args = vec![py_str(&column.name), ty];
    if let Some(table) = &column.references {
        args.push(format!(
            "sa.ForeignKey({}, ondelete=\"CASCADE\")",
            py_str(&format!("{table}.id"))
        ));
    }
    args.extend(column_options(column, "sa.func", false));
    format!("sa.Column({})", args.join(", "))
}
