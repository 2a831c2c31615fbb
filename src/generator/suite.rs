//! Test emitter: a pytest suite derived from the route plan.
//!
//! Scenarios are chosen per resource from the routes that actually exist, so
//! the suite only ever exercises handlers the application emitter produced.

use std::collections::{BTreeSet, HashMap};

use super::artifact::Artifact;
use super::plan::{AccessorKind, ParentScope, ResourcePlan, RoutePlan};
use super::schema::{is_echoed_string, py_str, sample_value};
use super::templates::{
    ConftestTemplate, HelperView, ListCaseView, ResourceTestTemplate, ResourceTestView,
    ScopedCreateCaseView, UnsupportedCaseView,
};
use crate::config::GeneratorConfig;
use crate::spec::{path_params, FieldRole, ResourceSchema, TypeTag};

/// Name of the record factory for a resource.
pub fn helper_name(resource: &ResourceSchema) -> String {
    format!("create_{}", resource.singular())
}

/// Python string expression for a route URL; an f-string when it has params.
fn api_url(prefix: &str, path: &str) -> String {
    let url = py_str(&format!("{prefix}{path}"));
    if path_params(path).is_empty() {
        url
    } else {
        format!("f{url}")
    }
}

/// URL with the `{param}` placeholder bound to a local Python variable.
fn bound_url(prefix: &str, path: &str, param: &str, var: &str) -> String {
    api_url(prefix, &path.replace(&format!("{{{param}}}"), &format!("{{{var}}}")))
}

/// URL with every placeholder pointing at a record that does not exist.
fn missing_url(prefix: &str, path: &str) -> String {
    let path = path_params(path)
        .iter()
        .fold(path.to_string(), |acc, p| acc.replace(&format!("{{{p}}}"), "nonexistent"));
    api_url(prefix, &path)
}

fn dict_literal(entries: &[(String, String)]) -> String {
    let body = entries
        .iter()
        .map(|(k, v)| format!("{}: {v}", py_str(k)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

fn sample_entries(resource: &ResourceSchema) -> Vec<(String, String)> {
    resource
        .input_fields()
        .filter_map(|f| sample_value(&resource.name, f).map(|v| (f.name.clone(), v)))
        .collect()
}

/// Resources that can be created in a test, with the create route used.
///
/// A parent-scoped create only counts once its parent is creatable, so
/// creatability is resolved to a fixpoint.
pub fn creatable_resources(plans: &[ResourcePlan]) -> HashMap<String, &RoutePlan> {
    let mut creatable: HashMap<String, &RoutePlan> = HashMap::new();
    loop {
        let before = creatable.len();
        for plan in plans {
            if creatable.contains_key(&plan.table) {
                continue;
            }
            let Some(route) = plan.create() else {
                continue;
            };
            let ready = match route.kind.scope() {
                Some(scope) => creatable.contains_key(&scope.table),
                None => true,
            };
            if ready {
                creatable.insert(plan.table.clone(), route);
            }
        }
        if creatable.len() == before {
            return creatable;
        }
    }
}

struct SuiteContext<'a> {
    prefix: &'a str,
    plans: &'a [ResourcePlan],
    creatable: HashMap<String, &'a RoutePlan>,
}

impl SuiteContext<'_> {
    fn helper_for_table(&self, table: &str) -> Option<String> {
        if !self.creatable.contains_key(table) {
            return None;
        }
        self.plans
            .iter()
            .find(|p| p.table == table)
            .map(|p| helper_name(&p.resource))
    }

    fn helper_view(&self, plan: &ResourcePlan, route: &RoutePlan) -> HelperView {
        let payload = dict_literal(&sample_entries(&plan.resource));
        let name = helper_name(&plan.resource);
        match route.kind.scope() {
            Some(scope) => HelperView {
                name,
                scoped: true,
                param: scope.param.clone(),
                parent_helper: self.helper_for_table(&scope.table).unwrap_or_default(),
                payload,
                url: api_url(self.prefix, &route.endpoint.path),
            },
            None => HelperView {
                name,
                scoped: false,
                param: String::new(),
                parent_helper: String::new(),
                payload,
                url: api_url(self.prefix, &route.endpoint.path),
            },
        }
    }

    /// Factory call that attaches the new record to `parent_gid` via `scope`.
    fn attach_call(&self, plan: &ResourcePlan, create: &RoutePlan, scope: &ParentScope) -> String {
        let helper = helper_name(&plan.resource);
        match create.kind.scope() {
            Some(own) if own.field == scope.field => {
                format!("{helper}(client, {}=parent_gid)", own.param)
            }
            _ => format!("{helper}(client, {}=parent_gid)", scope.field),
        }
    }

    fn resource_view(&self, plan: &ResourcePlan, create: &RoutePlan) -> ResourceTestView {
        let resource = &plan.resource;
        let prefix = self.prefix;
        let helper = helper_name(resource);
        let samples = sample_entries(resource);
        let mut imports = BTreeSet::from([helper.clone()]);

        let mut view = ResourceTestView {
            singular: resource.singular(),
            create_call: format!("{helper}(client)"),
            payload: dict_literal(&samples),
            helper,
            ..ResourceTestView::default()
        };

        if let Some((field, value)) = resource
            .input_fields()
            .filter(|f| is_echoed_string(f))
            .find_map(|f| sample_value(&resource.name, f).map(|v| (f.name.clone(), v)))
        {
            view.has_check = true;
            view.check_field = field;
            view.check_value = value;
        }

        match create.kind.scope() {
            Some(_) => {
                view.scoped = true;
                view.missing_parent_url = missing_url(prefix, &create.endpoint.path);
            }
            None => {
                view.create_url = api_url(prefix, &create.endpoint.path);
                let bad = resource.references().find(|f| {
                    f.reference()
                        .is_some_and(|target| self.plans.iter().any(|p| p.table == target))
                });
                if let Some(field) = bad {
                    let mut entries = samples.clone();
                    entries.push((field.name.clone(), py_str("nonexistent")));
                    view.has_bad_reference = true;
                    view.bad_reference = field.name.clone();
                    view.bad_reference_payload = dict_literal(&entries);
                }
            }
        }

        for route in &plan.routes {
            let AccessorKind::CreateUnderParent(scope) = &route.kind else {
                continue;
            };
            if route.endpoint.name == create.endpoint.name {
                continue;
            }
            let Some(parent_helper) = self.helper_for_table(&scope.table) else {
                continue;
            };
            imports.insert(parent_helper.clone());
            view.scoped_creates.push(ScopedCreateCaseView {
                handler: route.endpoint.name.clone(),
                parent_helper,
                url: bound_url(prefix, &route.endpoint.path, &scope.param, "parent_gid"),
                missing_url: missing_url(prefix, &route.endpoint.path),
                scope_column: resource
                    .field(&scope.field)
                    .map_or_else(|| format!("{}_id", scope.field), |f| f.column_name()),
            });
        }

        if let Some(route) = plan.get() {
            if let AccessorKind::Get { param } = &route.kind {
                view.has_get = true;
                view.get_url = bound_url(prefix, &route.endpoint.path, param, "gid");
                view.missing_get_url = missing_url(prefix, &route.endpoint.path);
            }
        }

        if let Some(route) = plan.update() {
            if let AccessorKind::Update { param } = &route.kind {
                view.has_update = true;
                view.update_url = bound_url(prefix, &route.endpoint.path, param, "gid");
                view.missing_update_url = missing_url(prefix, &route.endpoint.path);
                let update_field = resource
                    .field("name")
                    .filter(|f| is_echoed_string(f))
                    .or_else(|| resource.input_fields().find(|f| is_echoed_string(f)));
                match update_field {
                    Some(field) => {
                        let value = py_str(&format!("Updated {}", resource.name));
                        view.has_update_field = true;
                        view.update_field = field.name.clone();
                        view.update_payload =
                            dict_literal(&[(field.name.clone(), value.clone())]);
                        view.update_value = value;
                    }
                    None => view.update_payload = "{}".to_string(),
                }
                view.booleans = resource
                    .input_fields()
                    .filter(|f| f.role == FieldRole::Plain && f.tag == TypeTag::Boolean)
                    .map(|f| f.name.clone())
                    .collect();
            }
        }

        for route in plan.lists_by_parent() {
            let (Some(scope), Some(accessor)) = (route.kind.scope(), route.accessor.as_ref())
            else {
                continue;
            };
            let Some(parent_helper) = self.helper_for_table(&scope.table) else {
                tracing::debug!(accessor = %accessor, "parent is not creatable, skipping list test");
                continue;
            };
            imports.insert(parent_helper.clone());
            view.lists.push(ListCaseView {
                accessor: accessor.clone(),
                parent_helper,
                create_call: self.attach_call(plan, create, scope),
                url: bound_url(prefix, &route.endpoint.path, &scope.param, "parent_gid"),
                missing_url: missing_url(prefix, &route.endpoint.path),
            });
        }

        if let Some(route) = plan.list_all() {
            view.has_list_all = true;
            view.list_all_accessor = route.accessor.clone().unwrap_or_default();
            view.list_all_url = api_url(prefix, &route.endpoint.path);
        }

        if let Some(route) = plan.delete() {
            if let AccessorKind::Delete { param } = &route.kind {
                view.has_delete = true;
                view.delete_url = bound_url(prefix, &route.endpoint.path, param, "gid");
                view.missing_delete_url = missing_url(prefix, &route.endpoint.path);
                view.delete_create_call = view.create_call.clone();
                if !view.has_get {
                    if let Some(list) = view.lists.first() {
                        view.delete_needs_parent = true;
                        view.delete_parent_helper = list.parent_helper.clone();
                        view.delete_create_call = list.create_call.clone();
                        view.delete_verify_list = true;
                        view.delete_list_url = list.url.clone();
                    } else if view.has_list_all {
                        view.delete_verify_list = true;
                        view.delete_list_url = view.list_all_url.clone();
                    }
                }
            }
        }

        view.unsupported = plan
            .unsupported()
            .map(|route| UnsupportedCaseView {
                handler: route.endpoint.name.clone(),
                method: route.endpoint.method.as_str().to_string(),
                url: missing_url(prefix, &route.endpoint.path),
            })
            .collect();

        view.has_name = resource.field("name").is_some_and(is_echoed_string);
        view.imports = imports.into_iter().collect::<Vec<_>>().join(", ");
        view
    }
}

/// Render `tests/`: package marker, fixtures and factories, one module per
/// creatable resource.
pub fn emit_test_suite(
    plans: &[ResourcePlan],
    config: &GeneratorConfig,
) -> anyhow::Result<Vec<Artifact>> {
    let ctx = SuiteContext {
        prefix: &config.api_prefix,
        plans,
        creatable: creatable_resources(plans),
    };

    let mut helpers = Vec::new();
    let mut modules = Vec::new();
    for plan in plans {
        let Some(create) = ctx.creatable.get(&plan.table).copied() else {
            tracing::debug!(resource = %plan.resource.name, "no usable create route, no test module");
            continue;
        };
        helpers.push(ctx.helper_view(plan, create));
        let view = ctx.resource_view(plan, create);
        modules.push(Artifact::render(
            format!("tests/test_{}.py", plan.table),
            &ResourceTestTemplate { t: view },
        )?);
    }

    let mut artifacts = vec![
        Artifact::empty("tests/__init__.py"),
        Artifact::render("tests/conftest.py", &ConftestTemplate { helpers })?,
    ];
    artifacts.extend(modules);
    tracing::debug!(count = artifacts.len(), "rendered test artifacts");
    Ok(artifacts)
}
