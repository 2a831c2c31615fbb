use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::analyzer::{analyze_schema, generate_openapi, openapi_to_yaml};
use crate::config::GeneratorConfig;
use crate::generator::artifact::Artifact;
use crate::generator::code::emit_application;
use crate::generator::deploy::emit_deployment;
use crate::generator::plan::plan_routes;
use crate::generator::suite::emit_test_suite;
use crate::spec::{asana_catalog, ApiSpec};

/// Which artifact groups a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationScope {
    /// `app/` package and `requirements.txt`
    pub app: bool,
    /// `tests/`
    pub tests: bool,
    /// Dockerfile, compose, alembic, `schema.sql`
    pub deploy: bool,
    /// `api.yml`
    pub docs: bool,
}

impl GenerationScope {
    pub fn all() -> Self {
        Self {
            app: true,
            tests: true,
            deploy: true,
            docs: true,
        }
    }

    pub fn none() -> Self {
        Self {
            app: false,
            tests: false,
            deploy: false,
            docs: false,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub scope: GenerationScope,
    /// List what would be written without touching the filesystem
    pub dry_run: bool,
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Absolute or output-rooted paths, in write order
    pub files: Vec<PathBuf>,
    pub tables: usize,
    pub endpoints: usize,
    /// Names of endpoints emitted as 501 stubs
    pub unsupported: Vec<String>,
    pub dry_run: bool,
}

/// Write artifacts under `root`, creating parent directories as needed.
///
/// Stops at the first failure; files already written stay in place.
pub fn write_artifacts(
    root: &Path,
    artifacts: &[Artifact],
    dry_run: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = root.join(&artifact.path);
        if dry_run {
            println!("📝 Would write {path:?}");
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {parent:?}"))?;
            }
            fs::write(&path, &artifact.contents)
                .with_context(|| format!("Failed to write {path:?}"))?;
            tracing::debug!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
            println!("✅ Wrote {path:?}");
        }
        written.push(path);
    }
    Ok(written)
}

/// Generate the backend for the built-in catalog.
pub fn generate_backend(
    config: &GeneratorConfig,
    options: &GenerateOptions,
) -> anyhow::Result<GenerationReport> {
    generate_backend_from(&asana_catalog(), config, options)
}

/// Run the full pipeline for an arbitrary API description.
///
/// Stages run in order: schema analysis, route planning, then the code,
/// test and deployment emitters. Groups outside `options.scope` are skipped.
pub fn generate_backend_from(
    spec: &ApiSpec,
    config: &GeneratorConfig,
    options: &GenerateOptions,
) -> anyhow::Result<GenerationReport> {
    let scope = options.scope;
    let output_dir = config.output_dir.clone();
    tracing::info!(
        output = %output_dir.display(),
        dry_run = options.dry_run,
        ?scope,
        "generating backend"
    );

    let db = analyze_schema(spec);
    let plans = plan_routes(spec);
    let unsupported: Vec<String> = plans
        .iter()
        .flat_map(|p| p.unsupported())
        .map(|r| r.endpoint.name.clone())
        .collect();

    let mut artifacts = Vec::new();
    if scope.docs {
        tracing::info!("emitting OpenAPI document");
        let yaml = openapi_to_yaml(&generate_openapi(spec))?;
        artifacts.push(Artifact::new("api.yml", yaml));
    }
    if scope.app {
        tracing::info!("emitting application");
        artifacts.extend(emit_application(spec, &db, &plans, config)?);
    }
    if scope.tests {
        tracing::info!("emitting test suite");
        artifacts.extend(emit_test_suite(&plans, config)?);
    }
    if scope.deploy {
        tracing::info!("emitting deployment files");
        artifacts.extend(emit_deployment(&db, config)?);
    }

    let files = write_artifacts(&output_dir, &artifacts, options.dry_run)?;
    tracing::info!(files = files.len(), "generation complete");

    Ok(GenerationReport {
        output_dir,
        files,
        tables: db.len(),
        endpoints: spec.endpoints.len(),
        unsupported,
        dry_run: options.dry_run,
    })
}
