//! Application emitter: `app/` package and `requirements.txt`.

use std::collections::HashMap;

use super::artifact::Artifact;
use super::plan::{AccessorKind, ResourcePlan, RoutePlan};
use super::schema::{model_column, py_str, pydantic_input_type, pydantic_output_type};
use super::templates::{
    CrudAccessor, CrudReference, CrudResource, CrudTemplate, DatabaseTemplate, KindFlags,
    MainTemplate, ModelColumn, ModelView, ModelsTemplate, RequirementsTemplate, RouteView,
    RoutesTemplate, SchemaField, SchemaView, SchemasTemplate,
};
use crate::analyzer::DbSchema;
use crate::config::GeneratorConfig;
use crate::spec::ApiSpec;

/// External-id parameter an accessor takes: the item's own, or its parent's.
fn accessor_param(kind: &AccessorKind) -> String {
    match kind {
        AccessorKind::Get { param }
        | AccessorKind::Update { param }
        | AccessorKind::Delete { param } => param.clone(),
        AccessorKind::ListByParent(scope) | AccessorKind::CreateUnderParent(scope) => {
            scope.param.clone()
        }
        AccessorKind::ListAll | AccessorKind::Create | AccessorKind::Unsupported { .. } => {
            String::new()
        }
    }
}

pub fn model_views(db: &DbSchema) -> Vec<ModelView> {
    db.values()
        .map(|table| ModelView {
            name: table.resource.clone(),
            table: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|c| ModelColumn {
                    name: c.name.clone(),
                    expr: model_column(c),
                })
                .collect(),
        })
        .collect()
}

/// Base/Create/Update/full shapes per resource.
///
/// `gid` is never an input. The full shape adds every column that is not an
/// input field: `id`, `gid`, the `<ref>_id` keys and the timestamps.
pub fn schema_views(spec: &ApiSpec, db: &DbSchema) -> Vec<SchemaView> {
    spec.resources
        .values()
        .map(|resource| {
            let inputs: Vec<SchemaField> = resource
                .input_fields()
                .map(|f| SchemaField {
                    name: f.name.clone(),
                    annotation: pydantic_input_type(f).to_string(),
                })
                .collect();
            let outputs = db
                .get(&resource.table_name())
                .map(|table| {
                    table
                        .columns
                        .iter()
                        .filter(|c| !inputs.iter().any(|i| i.name == c.name))
                        .map(|c| SchemaField {
                            name: c.name.clone(),
                            annotation: pydantic_output_type(c),
                        })
                        .collect()
                })
                .unwrap_or_default();
            SchemaView {
                name: resource.name.clone(),
                inputs,
                outputs,
            }
        })
        .collect()
}

pub fn crud_resources(spec: &ApiSpec, plans: &[ResourcePlan]) -> Vec<CrudResource> {
    plans
        .iter()
        .map(|plan| {
            let resource = &plan.resource;
            let references = resource
                .references()
                .filter_map(|field| {
                    let target = field.reference()?;
                    match spec.resource_for_table(target) {
                        Some(model) => Some(CrudReference {
                            field: field.name.clone(),
                            model: model.name.clone(),
                        }),
                        None => {
                            tracing::warn!(
                                resource = %resource.name,
                                field = %field.name,
                                referenced = %target,
                                "reference target is not a declared resource; payload gid left unresolved"
                            );
                            None
                        }
                    }
                })
                .collect();
            let accessors = plan
                .accessors()
                .into_iter()
                .map(|(name, kind)| {
                    let scope = kind.scope();
                    CrudAccessor {
                        name,
                        kind: KindFlags::from(kind),
                        param: accessor_param(kind),
                        parent_model: scope.map(|s| s.resource.clone()).unwrap_or_default(),
                        scope_field: scope.map(|s| s.field.clone()).unwrap_or_default(),
                        scope_column: scope.map(|s| format!("{}_id", s.field)).unwrap_or_default(),
                    }
                })
                .collect();
            CrudResource {
                model: resource.name.clone(),
                singular: resource.singular(),
                references_const: format!("{}_REFERENCES", resource.singular().to_uppercase()),
                references,
                accessors,
            }
        })
        .collect()
}

/// One handler per endpoint, in endpoint declaration order.
pub fn route_views(spec: &ApiSpec, plans: &[ResourcePlan]) -> Vec<RouteView> {
    let by_name: HashMap<&str, (&ResourcePlan, &RoutePlan)> = plans
        .iter()
        .flat_map(|plan| {
            plan.routes
                .iter()
                .map(move |route| (route.endpoint.name.as_str(), (plan, route)))
        })
        .collect();

    spec.endpoints
        .iter()
        .filter_map(|endpoint| by_name.get(endpoint.name.as_str()))
        .map(|(plan, route)| {
            let endpoint = &route.endpoint;
            let signature = endpoint
                .path_params()
                .iter()
                .map(|p| format!("{p}: str"))
                .collect::<Vec<_>>()
                .join(", ");
            RouteView {
                handler: endpoint.name.clone(),
                method: endpoint.method.as_str().to_lowercase(),
                path: endpoint.path.clone(),
                kind: KindFlags::from(&route.kind),
                accessor: route.accessor.clone().unwrap_or_default(),
                param: accessor_param(&route.kind),
                model: plan.resource.name.clone(),
                parent_model: route
                    .kind
                    .scope()
                    .map(|s| s.resource.clone())
                    .unwrap_or_default(),
                signature,
            }
        })
        .collect()
}

/// Render the application package.
pub fn emit_application(
    spec: &ApiSpec,
    db: &DbSchema,
    plans: &[ResourcePlan],
    config: &GeneratorConfig,
) -> anyhow::Result<Vec<Artifact>> {
    let database = &config.database;
    let artifacts = vec![
        Artifact::empty("app/__init__.py"),
        Artifact::render(
            "app/database.py",
            &DatabaseTemplate {
                env_var: py_str(&database.env_var),
                default_url: py_str(&database.app_url()),
            },
        )?,
        Artifact::render(
            "app/models.py",
            &ModelsTemplate {
                models: model_views(db),
            },
        )?,
        Artifact::render(
            "app/schemas.py",
            &SchemasTemplate {
                schemas: schema_views(spec, db),
            },
        )?,
        Artifact::render(
            "app/crud.py",
            &CrudTemplate {
                resources: crud_resources(spec, plans),
            },
        )?,
        Artifact::render(
            "app/routes.py",
            &RoutesTemplate {
                routes: route_views(spec, plans),
            },
        )?,
        Artifact::render(
            "app/main.py",
            &MainTemplate {
                title: py_str(&config.app_title),
                version: py_str(&spec.version),
                description: py_str(&spec.description),
                api_prefix: py_str(&config.api_prefix),
            },
        )?,
        Artifact::render("requirements.txt", &RequirementsTemplate)?,
    ];
    tracing::debug!(count = artifacts.len(), "rendered application artifacts");
    Ok(artifacts)
}
