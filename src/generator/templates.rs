use askama::Template;

use super::plan::AccessorKind;

/// Accessor shape as template-friendly flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindFlags {
    pub get: bool,
    pub list_all: bool,
    pub list_by_parent: bool,
    pub create: bool,
    pub create_under_parent: bool,
    pub update: bool,
    pub delete: bool,
    pub unsupported: bool,
}

impl From<&AccessorKind> for KindFlags {
    fn from(kind: &AccessorKind) -> Self {
        let mut flags = KindFlags::default();
        match kind {
            AccessorKind::Get { .. } => flags.get = true,
            AccessorKind::ListAll => flags.list_all = true,
            AccessorKind::ListByParent(_) => flags.list_by_parent = true,
            AccessorKind::Create => flags.create = true,
            AccessorKind::CreateUnderParent(_) => flags.create_under_parent = true,
            AccessorKind::Update { .. } => flags.update = true,
            AccessorKind::Delete { .. } => flags.delete = true,
            AccessorKind::Unsupported { .. } => flags.unsupported = true,
        }
        flags
    }
}

// ---------------------------------------------------------------------------
// app/

/// One `name = Column(...)` line of a persistence entity.
#[derive(Debug, Clone)]
pub struct ModelColumn {
    pub name: String,
    pub expr: String,
}

#[derive(Debug, Clone)]
pub struct ModelView {
    /// Entity class name (`Task`)
    pub name: String,
    pub table: String,
    pub columns: Vec<ModelColumn>,
}

#[derive(Template)]
#[template(path = "app/models.py.txt", escape = "none")]
pub struct ModelsTemplate {
    pub models: Vec<ModelView>,
}

#[derive(Template)]
#[template(path = "app/database.py.txt", escape = "none")]
pub struct DatabaseTemplate {
    pub env_var: String,
    pub default_url: String,
}

/// An annotated attribute of a validation schema.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    pub annotation: String,
}

#[derive(Debug, Clone)]
pub struct SchemaView {
    pub name: String,
    /// Client-writable fields, shared by the create and update shapes
    pub inputs: Vec<SchemaField>,
    /// Server-assigned attributes added to the response shape
    pub outputs: Vec<SchemaField>,
}

#[derive(Template)]
#[template(path = "app/schemas.py.txt", escape = "none")]
pub struct SchemasTemplate {
    pub schemas: Vec<SchemaView>,
}

#[derive(Debug, Clone)]
pub struct CrudReference {
    pub field: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct CrudAccessor {
    pub name: String,
    pub kind: KindFlags,
    /// External-id parameter (item or parent)
    pub param: String,
    pub parent_model: String,
    /// Payload field dropped for parent-scoped creates
    pub scope_field: String,
    /// Foreign-key column that carries the parent
    pub scope_column: String,
}

#[derive(Debug, Clone)]
pub struct CrudResource {
    pub model: String,
    pub singular: String,
    /// Module-level reference map name (`TASK_REFERENCES`)
    pub references_const: String,
    pub references: Vec<CrudReference>,
    pub accessors: Vec<CrudAccessor>,
}

#[derive(Template)]
#[template(path = "app/crud.py.txt", escape = "none")]
pub struct CrudTemplate {
    pub resources: Vec<CrudResource>,
}

#[derive(Debug, Clone)]
pub struct RouteView {
    /// Handler function name (the endpoint name)
    pub handler: String,
    /// Lower-case method for the router decorator
    pub method: String,
    pub path: String,
    pub kind: KindFlags,
    pub accessor: String,
    pub param: String,
    pub model: String,
    pub parent_model: String,
    /// Parameter list of a 501 stub
    pub signature: String,
}

#[derive(Template)]
#[template(path = "app/routes.py.txt", escape = "none")]
pub struct RoutesTemplate {
    pub routes: Vec<RouteView>,
}

/// Application entry point. String fields are ready-quoted Python literals.
#[derive(Template)]
#[template(path = "app/main.py.txt", escape = "none")]
pub struct MainTemplate {
    pub title: String,
    pub version: String,
    pub description: String,
    pub api_prefix: String,
}

#[derive(Template)]
#[template(path = "app/requirements.txt.txt", escape = "none")]
pub struct RequirementsTemplate;

// ---------------------------------------------------------------------------
// tests/

/// A record factory in `tests/conftest.py`.
#[derive(Debug, Clone)]
pub struct HelperView {
    pub name: String,
    /// Created under a parent route
    pub scoped: bool,
    pub param: String,
    pub parent_helper: String,
    /// Python dict literal
    pub payload: String,
    /// Python string expression for the create URL
    pub url: String,
}

/// Test database fixture plus the record factories.
#[derive(Template)]
#[template(path = "tests/conftest.py.txt", escape = "none")]
pub struct ConftestTemplate {
    pub helpers: Vec<HelperView>,
}

/// A nested-collection listing scenario.
#[derive(Debug, Clone)]
pub struct ListCaseView {
    pub accessor: String,
    pub parent_helper: String,
    pub create_call: String,
    pub url: String,
    pub missing_url: String,
}

/// A parent-scoped create route other than the resource's main create.
#[derive(Debug, Clone)]
pub struct ScopedCreateCaseView {
    pub handler: String,
    pub parent_helper: String,
    pub url: String,
    pub missing_url: String,
    /// Column holding the parent's internal id
    pub scope_column: String,
}

/// A route that must answer 501.
#[derive(Debug, Clone)]
pub struct UnsupportedCaseView {
    pub handler: String,
    /// Upper-case HTTP method
    pub method: String,
    pub url: String,
}

/// Everything one `test_<table>.py` module needs. URL fields are Python
/// expressions over the local `gid` / `parent_gid` variables.
#[derive(Debug, Clone, Default)]
pub struct ResourceTestView {
    pub singular: String,
    pub imports: String,
    pub helper: String,
    pub create_call: String,
    pub payload: String,
    pub has_check: bool,
    pub check_field: String,
    pub check_value: String,
    pub scoped: bool,
    pub missing_parent_url: String,
    pub create_url: String,
    pub has_bad_reference: bool,
    pub bad_reference: String,
    pub bad_reference_payload: String,
    pub has_get: bool,
    pub get_url: String,
    pub missing_get_url: String,
    pub has_update: bool,
    pub update_url: String,
    pub missing_update_url: String,
    pub update_payload: String,
    pub has_update_field: bool,
    pub update_field: String,
    pub update_value: String,
    pub booleans: Vec<String>,
    pub has_delete: bool,
    pub delete_needs_parent: bool,
    pub delete_parent_helper: String,
    pub delete_create_call: String,
    pub delete_url: String,
    pub missing_delete_url: String,
    pub delete_verify_list: bool,
    pub delete_list_url: String,
    pub has_list_all: bool,
    pub list_all_accessor: String,
    pub list_all_url: String,
    pub lists: Vec<ListCaseView>,
    pub scoped_creates: Vec<ScopedCreateCaseView>,
    pub unsupported: Vec<UnsupportedCaseView>,
    pub has_name: bool,
}

#[derive(Template)]
#[template(path = "tests/test_resource.py.txt", escape = "none")]
pub struct ResourceTestTemplate {
    pub t: ResourceTestView,
}

// ---------------------------------------------------------------------------
// deployment

#[derive(Template)]
#[template(path = "deploy/Dockerfile.txt", escape = "none")]
pub struct DockerfileTemplate {
    pub app_port: u16,
}

#[derive(Template)]
#[template(path = "deploy/docker-compose.yml.txt", escape = "none")]
pub struct ComposeTemplate {
    pub db: ComposeDatabase,
    pub app_port: u16,
}

/// Database service values, already quoted as compose scalars.
#[derive(Debug, Clone)]
pub struct ComposeDatabase {
    pub image: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub port: u16,
    pub healthcheck: String,
    pub env_var: String,
    pub app_url: String,
}

#[derive(Template)]
#[template(path = "deploy/alembic.ini.txt", escape = "none")]
pub struct AlembicIniTemplate {
    /// `%` already doubled for configparser interpolation
    pub migration_url: String,
}

#[derive(Template)]
#[template(path = "deploy/env.py.txt", escape = "none")]
pub struct AlembicEnvTemplate {
    pub env_var: String,
}

#[derive(Template)]
#[template(path = "deploy/script.py.mako.txt", escape = "none")]
pub struct ScriptMakoTemplate;

#[derive(Debug, Clone)]
pub struct MigrationTable {
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Template)]
#[template(path = "deploy/initial_migration.py.txt", escape = "none")]
pub struct InitialMigrationTemplate {
    pub revision: String,
    pub tables: Vec<MigrationTable>,
    /// Tables in reverse creation order
    pub drop_order: Vec<String>,
}
