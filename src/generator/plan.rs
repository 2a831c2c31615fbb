//! Endpoint classification.
//!
//! Every endpoint is matched against a small set of URL shapes and turned into
//! a [`RoutePlan`]. The code emitter builds data accessors and route handlers
//! from the plans; the test emitter derives its scenarios from the same plans,
//! so a test never targets a route that does not exist.

use http::Method;
use indexmap::IndexMap;

use crate::spec::{ApiSpec, EndpointDescriptor, ResourceSchema};

/// Parent scoping of a nested collection route (`/projects/{project_gid}/tasks`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentScope {
    /// Parent table (`projects`)
    pub table: String,
    /// Parent resource name (`Project`)
    pub resource: String,
    /// Path parameter carrying the parent's external id (`project_gid`)
    pub param: String,
    /// Child field referencing the parent (`project`)
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorKind {
    Get { param: String },
    ListAll,
    ListByParent(ParentScope),
    Create,
    CreateUnderParent(ParentScope),
    Update { param: String },
    Delete { param: String },
    /// No accessor; the route answers 501.
    Unsupported { reason: String },
}

impl AccessorKind {
    pub fn label(&self) -> &'static str {
        match self {
            AccessorKind::Get { .. } => "get",
            AccessorKind::ListAll => "list_all",
            AccessorKind::ListByParent(_) => "list_by_parent",
            AccessorKind::Create => "create",
            AccessorKind::CreateUnderParent(_) => "create_under_parent",
            AccessorKind::Update { .. } => "update",
            AccessorKind::Delete { .. } => "delete",
            AccessorKind::Unsupported { .. } => "unsupported",
        }
    }

    pub fn scope(&self) -> Option<&ParentScope> {
        match self {
            AccessorKind::ListByParent(scope) | AccessorKind::CreateUnderParent(scope) => {
                Some(scope)
            }
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, AccessorKind::Unsupported { .. })
    }
}

/// One endpoint with its resolved accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub endpoint: EndpointDescriptor,
    pub kind: AccessorKind,
    /// Data-accessor function name; `None` for unsupported routes.
    pub accessor: Option<String>,
}

/// All routes of one resource, in endpoint declaration order.
#[derive(Debug, Clone)]
pub struct ResourcePlan {
    pub resource: ResourceSchema,
    pub table: String,
    pub routes: Vec<RoutePlan>,
}

impl ResourcePlan {
    fn first(&self, label: &str) -> Option<&RoutePlan> {
        self.routes.iter().find(|r| r.kind.label() == label)
    }

    pub fn get(&self) -> Option<&RoutePlan> {
        self.first("get")
    }

    pub fn update(&self) -> Option<&RoutePlan> {
        self.first("update")
    }

    pub fn delete(&self) -> Option<&RoutePlan> {
        self.first("delete")
    }

    pub fn list_all(&self) -> Option<&RoutePlan> {
        self.first("list_all")
    }

    pub fn lists_by_parent(&self) -> impl Iterator<Item = &RoutePlan> {
        self.routes
            .iter()
            .filter(|r| matches!(r.kind, AccessorKind::ListByParent(_)))
    }

    /// Preferred create route: top-level when present, otherwise the first
    /// parent-scoped one.
    pub fn create(&self) -> Option<&RoutePlan> {
        self.first("create")
            .or_else(|| self.first("create_under_parent"))
    }

    /// Distinct accessors, keyed by function name, in first-use order.
    pub fn accessors(&self) -> IndexMap<String, &AccessorKind> {
        let mut accessors = IndexMap::new();
        for route in &self.routes {
            if let Some(name) = &route.accessor {
                accessors.entry(name.clone()).or_insert(&route.kind);
            }
        }
        accessors
    }

    pub fn unsupported(&self) -> impl Iterator<Item = &RoutePlan> {
        self.routes.iter().filter(|r| !r.kind.is_supported())
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn unsupported(reason: impl Into<String>) -> AccessorKind {
    AccessorKind::Unsupported {
        reason: reason.into(),
    }
}

/// Resolve the parent scoping of a nested collection route, if the child
/// declares a reference to the parent table.
fn parent_scope(
    spec: &ApiSpec,
    resource: &ResourceSchema,
    parent_table: &str,
    param: &str,
) -> Option<ParentScope> {
    let field = resource.reference_to(parent_table)?;
    let parent = spec.resource_for_table(parent_table)?;
    Some(ParentScope {
        table: parent_table.to_string(),
        resource: parent.name.clone(),
        param: param.to_string(),
        field: field.name.clone(),
    })
}

/// Classify an endpoint by URL shape and method.
///
/// Recognised shapes, with `T` the endpoint's own table:
///
/// - `/T` : list all (GET), create (POST)
/// - `/T/{id}` : get (GET), update (PUT), delete (DELETE)
/// - `/P/{id}/…T` : list by parent (GET), create under parent (POST), when `T`
///   declares a reference to `P`; the last segment may carry a prefix such as
///   `subtasks`
///
/// Anything else is unsupported.
pub fn classify_endpoint(
    spec: &ApiSpec,
    resource: &ResourceSchema,
    endpoint: &EndpointDescriptor,
) -> AccessorKind {
    let table = endpoint.resource.as_str();
    let segments = endpoint.segments();
    let method = &endpoint.method;

    match segments.as_slice() {
        [collection] if *collection == table => match *method {
            Method::GET => AccessorKind::ListAll,
            Method::POST => AccessorKind::Create,
            _ => unsupported(format!("{method} on a collection")),
        },
        [collection, item] if *collection == table => match placeholder(item) {
            Some(param) => {
                let param = param.to_string();
                match *method {
                    Method::GET => AccessorKind::Get { param },
                    Method::PUT => AccessorKind::Update { param },
                    Method::DELETE => AccessorKind::Delete { param },
                    _ => unsupported(format!("{method} on an item")),
                }
            }
            None => unsupported(format!("unrecognised item segment `{item}`")),
        },
        [parent, item, child] => {
            let Some(param) = placeholder(item) else {
                return unsupported(format!("unrecognised parent segment `{item}`"));
            };
            if !child.ends_with(table) {
                return unsupported(format!("`{child}` is not a collection of {table}"));
            }
            let Some(scope) = parent_scope(spec, resource, parent, param) else {
                return unsupported(format!("{} has no reference to {parent}", resource.name));
            };
            match *method {
                Method::GET => AccessorKind::ListByParent(scope),
                Method::POST => AccessorKind::CreateUnderParent(scope),
                _ => unsupported(format!("{method} on a nested collection")),
            }
        }
        _ => unsupported("unrecognised path shape"),
    }
}

/// Data-accessor function name for a supported accessor.
pub fn accessor_name(resource: &ResourceSchema, kind: &AccessorKind) -> Option<String> {
    let singular = resource.singular();
    let table = resource.table_name();
    Some(match kind {
        AccessorKind::Get { .. } => format!("get_{singular}"),
        AccessorKind::ListAll => format!("list_{table}"),
        AccessorKind::ListByParent(scope) => format!("list_{table}_by_{}", scope.field),
        AccessorKind::Create => format!("create_{singular}"),
        AccessorKind::CreateUnderParent(scope) => {
            format!("create_{singular}_for_{}", scope.field)
        }
        AccessorKind::Update { .. } => format!("update_{singular}"),
        AccessorKind::Delete { .. } => format!("delete_{singular}"),
        AccessorKind::Unsupported { .. } => return None,
    })
}

/// Plan every endpoint, grouped by resource in declaration order.
///
/// Endpoints whose owning table has no declared resource are skipped with a
/// warning; unsupported shapes are kept and logged.
pub fn plan_routes(spec: &ApiSpec) -> Vec<ResourcePlan> {
    let mut plans: Vec<ResourcePlan> = spec
        .resources
        .values()
        .map(|resource| ResourcePlan {
            resource: resource.clone(),
            table: resource.table_name(),
            routes: Vec::new(),
        })
        .collect();

    for endpoint in &spec.endpoints {
        let Some(plan) = plans.iter_mut().find(|p| p.table == endpoint.resource) else {
            tracing::warn!(
                endpoint = %endpoint.name,
                resource = %endpoint.resource,
                "endpoint refers to an undeclared resource, skipping"
            );
            continue;
        };
        let kind = classify_endpoint(spec, &plan.resource, endpoint);
        if let AccessorKind::Unsupported { reason } = &kind {
            tracing::warn!(
                endpoint = %endpoint.name,
                method = %endpoint.method,
                path = %endpoint.path,
                reason = %reason,
                "endpoint has no data accessor; emitting a 501 route"
            );
        }
        let accessor = accessor_name(&plan.resource, &kind);
        plan.routes.push(RoutePlan {
            endpoint: endpoint.clone(),
            kind,
            accessor,
        });
    }
    plans
}
