use http::Method;
use indexmap::IndexMap;

use super::types::{ApiSpec, EndpointDescriptor, ResourceSchema};

/// The hardcoded Asana-style API the generator replicates.
///
/// Resources are declared in dependency order so every referenced table is
/// created before the tables that point at it.
pub fn asana_catalog() -> ApiSpec {
    ApiSpec {
        title: "Asana Clone API".to_string(),
        version: "1.0.0".to_string(),
        description: "Clone of Asana API for Tasks, Projects, and Sections".to_string(),
        endpoints: catalog_endpoints(),
        resources: catalog_resources(),
    }
}

fn catalog_endpoints() -> Vec<EndpointDescriptor> {
    let e = EndpointDescriptor::new;
    vec![
        // Tasks
        e(Method::GET, "/tasks/{task_gid}", "get_task", "tasks"),
        e(Method::POST, "/tasks", "create_task", "tasks"),
        e(Method::PUT, "/tasks/{task_gid}", "update_task", "tasks"),
        e(Method::DELETE, "/tasks/{task_gid}", "delete_task", "tasks"),
        e(Method::GET, "/projects/{project_gid}/tasks", "get_tasks_for_project", "tasks"),
        e(Method::GET, "/sections/{section_gid}/tasks", "get_tasks_for_section", "tasks"),
        e(Method::POST, "/tasks/{task_gid}/subtasks", "create_subtask", "tasks"),
        // Projects
        e(Method::GET, "/projects/{project_gid}", "get_project", "projects"),
        e(Method::POST, "/projects", "create_project", "projects"),
        e(Method::PUT, "/projects/{project_gid}", "update_project", "projects"),
        e(Method::DELETE, "/projects/{project_gid}", "delete_project", "projects"),
        e(Method::GET, "/workspaces/{workspace_gid}/projects", "get_projects", "projects"),
        // Sections
        e(Method::GET, "/projects/{project_gid}/sections", "get_sections_for_project", "sections"),
        e(Method::POST, "/projects/{project_gid}/sections", "create_section", "sections"),
        e(Method::PUT, "/sections/{section_gid}", "update_section", "sections"),
        e(Method::DELETE, "/sections/{section_gid}", "delete_section", "sections"),
        e(Method::POST, "/sections/{section_gid}/addTask", "add_task_to_section", "sections"),
        // Stories (comments)
        e(Method::GET, "/tasks/{task_gid}/stories", "get_stories_for_task", "stories"),
        e(Method::POST, "/tasks/{task_gid}/stories", "create_story_on_task", "stories"),
        // Users
        e(Method::GET, "/users/{user_gid}", "get_user", "users"),
        e(Method::GET, "/workspaces/{workspace_gid}/users", "get_users", "users"),
        e(Method::POST, "/users", "create_user", "users"),
        // Workspaces
        e(Method::GET, "/workspaces", "get_workspaces", "workspaces"),
        e(Method::GET, "/workspaces/{workspace_gid}", "get_workspace", "workspaces"),
        e(Method::POST, "/workspaces", "create_workspace", "workspaces"),
    ]
}

fn catalog_resources() -> IndexMap<String, ResourceSchema> {
    let resources = [
        ResourceSchema::from_tags("Workspace", [("gid", "string"), ("name", "string")]),
        ResourceSchema::from_tags(
            "User",
            [
                ("gid", "string"),
                ("name", "string"),
                ("email", "string"),
                ("workspace", "string"),
            ],
        ),
        ResourceSchema::from_tags(
            "Project",
            [
                ("gid", "string"),
                ("name", "string"),
                ("notes", "string"),
                ("workspace", "string"),
                ("archived", "boolean"),
            ],
        ),
        ResourceSchema::from_tags(
            "Section",
            [("gid", "string"), ("name", "string"), ("project", "string")],
        ),
        ResourceSchema::from_tags(
            "Task",
            [
                ("gid", "string"),
                ("name", "string"),
                ("notes", "string"),
                ("completed", "boolean"),
                ("due_on", "date"),
                ("assignee", "string"),
                ("project", "string"),
                ("parent", "string"),
                ("workspace", "string"),
            ],
        ),
        ResourceSchema::from_tags(
            "Story",
            [
                ("gid", "string"),
                ("text", "string"),
                ("task", "string"),
                ("created_by", "string"),
            ],
        ),
    ];
    resources
        .into_iter()
        .map(|r| (r.name.clone(), r))
        .collect()
}
