#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end generation into a temporary directory.

use std::fs;
use std::path::Path;

use clooney::config::GeneratorConfig;
use clooney::generator::{generate_backend, GenerateOptions, GenerationScope};
use regex::Regex;

fn generate_into(dir: &Path, scope: GenerationScope) -> clooney::GenerationReport {
    let config = GeneratorConfig {
        output_dir: dir.to_path_buf(),
        ..GeneratorConfig::default()
    };
    let options = GenerateOptions {
        scope,
        dry_run: false,
    };
    generate_backend(&config, &options).expect("generation should succeed")
}

#[test]
fn test_full_generation_writes_backend_tree() {
    let dir = tempfile::tempdir().unwrap();
    let report = generate_into(dir.path(), GenerationScope::all());

    for rel in [
        "api.yml",
        "schema.sql",
        "requirements.txt",
        "Dockerfile",
        "docker-compose.yml",
        "alembic.ini",
        "alembic/env.py",
        "alembic/script.py.mako",
        "alembic/versions/0001_initial.py",
        "app/__init__.py",
        "app/database.py",
        "app/models.py",
        "app/schemas.py",
        "app/crud.py",
        "app/routes.py",
        "app/main.py",
        "tests/__init__.py",
        "tests/conftest.py",
        "tests/test_tasks.py",
        "tests/test_projects.py",
    ] {
        assert!(dir.path().join(rel).exists(), "missing {rel}");
    }
    assert_eq!(report.files.len(), report.files.iter().filter(|p| p.exists()).count());
    assert_eq!(report.tables, 6);
    assert!(report.unsupported.contains(&"add_task_to_section".to_string()));
    assert!(!report.dry_run);
}

#[test]
fn test_api_document_lists_every_path() {
    let dir = tempfile::tempdir().unwrap();
    generate_into(
        dir.path(),
        GenerationScope {
            docs: true,
            ..GenerationScope::none()
        },
    );

    let yaml = fs::read_to_string(dir.path().join("api.yml")).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(doc["openapi"].as_str(), Some("3.0.0"));
    let paths = doc["paths"].as_mapping().unwrap();
    assert!(paths.contains_key("/tasks/{task_gid}"));
    assert!(paths.contains_key("/sections/{section_gid}/addTask"));
    let task = &doc["paths"]["/tasks/{task_gid}"];
    assert!(task.get("get").is_some());
    assert!(task.get("put").is_some());
    assert!(task.get("delete").is_some());
    assert!(doc["components"]["schemas"].get("Task").is_some());

    assert!(!dir.path().join("app").exists());
    assert!(!dir.path().join("schema.sql").exists());
}

#[test]
fn test_schema_sql_references_only_earlier_tables() {
    let dir = tempfile::tempdir().unwrap();
    generate_into(
        dir.path(),
        GenerationScope {
            deploy: true,
            ..GenerationScope::none()
        },
    );

    let sql = fs::read_to_string(dir.path().join("schema.sql")).unwrap();
    let create = Regex::new(r"CREATE TABLE (\w+) \(").unwrap();
    let references = Regex::new(r"REFERENCES (\w+)\(id\)").unwrap();

    let mut created: Vec<String> = Vec::new();
    for block in sql.split("CREATE TABLE ").skip(1) {
        let block = format!("CREATE TABLE {block}");
        let table = create.captures(&block).unwrap()[1].to_string();
        created.push(table.clone());
        for cap in references.captures_iter(&block) {
            let target = &cap[1];
            assert!(
                created.iter().any(|t| t == target),
                "{table} references {target} before it is created"
            );
        }
    }
    assert!(created.contains(&"stories".to_string()));
    assert!(sql.contains("ON DELETE CASCADE"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    generate_into(first.path(), GenerationScope::all());
    generate_into(second.path(), GenerationScope::all());

    for rel in ["app/crud.py", "app/routes.py", "tests/test_tasks.py", "schema.sql"] {
        assert_eq!(
            fs::read_to_string(first.path().join(rel)).unwrap(),
            fs::read_to_string(second.path().join(rel)).unwrap(),
            "{rel} differs between runs"
        );
    }
}

#[test]
fn test_unsupported_endpoint_is_routed_as_stub() {
    let dir = tempfile::tempdir().unwrap();
    generate_into(dir.path(), GenerationScope::all());

    let routes = fs::read_to_string(dir.path().join("app/routes.py")).unwrap();
    assert!(routes.contains("def add_task_to_section("));
    assert!(routes.contains("status_code=501"));

    let tests = fs::read_to_string(dir.path().join("tests/test_sections.py")).unwrap();
    assert!(tests.contains("add_task_to_section_not_implemented"));
}
