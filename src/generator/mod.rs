//! # Generator Module
//!
//! Turns an [`ApiSpec`](crate::spec::ApiSpec) into a runnable FastAPI /
//! SQLAlchemy backend on disk.
//!
//! ## Architecture
//!
//! ```text
//! ApiSpec → Analyzer (DbSchema, OpenAPI) → Route plan → Emitters → Artifacts → disk
//! ```
//!
//! 1. **Route plan** ([`plan_routes`]) - classifies every endpoint into a data
//!    accessor shape, or marks it unsupported
//! 2. **Code emitter** ([`emit_application`]) - `app/` package and requirements
//! 3. **Test emitter** ([`emit_test_suite`]) - pytest suite from the same plan
//! 4. **Deployment emitter** ([`emit_deployment`]) - Dockerfile, compose,
//!    alembic and `schema.sql`
//!
//! Emitters return in-memory [`Artifact`]s; only [`write_artifacts`] touches
//! the filesystem, which is what makes `--dry-run` possible.
//!
//! ## Generated Structure
//!
//! ```text
//! backend/
//! ├── api.yml
//! ├── schema.sql
//! ├── requirements.txt
//! ├── Dockerfile
//! ├── docker-compose.yml
//! ├── alembic.ini
//! ├── alembic/
//! │   ├── env.py
//! │   ├── script.py.mako
//! │   └── versions/0001_initial.py
//! ├── app/
//! │   ├── __init__.py
//! │   ├── database.py
//! │   ├── models.py
//! │   ├── schemas.py
//! │   ├── crud.py
//! │   ├── routes.py
//! │   └── main.py
//! └── tests/
//!     ├── __init__.py
//!     ├── conftest.py
//!     └── test_<table>.py
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clooney::config::GeneratorConfig;
//! use clooney::generator::{generate_backend, GenerateOptions};
//!
//! let report = generate_backend(&GeneratorConfig::default(), &GenerateOptions::default())?;
//! println!("{} files", report.files.len());
//! ```
//!
//! ## Templates
//!
//! Every Python, YAML and INI artifact is an askama template under
//! `templates/` (`app/`, `tests/`, `deploy/`). Only `api.yml` and
//! `schema.sql` are serialized directly.

mod artifact;
mod code;
mod deploy;
mod plan;
mod project;
mod schema;
mod suite;
mod templates;

pub use artifact::Artifact;
pub use code::emit_application;
pub use deploy::{emit_deployment, render_schema_sql, INITIAL_REVISION};
pub use plan::{
    accessor_name, classify_endpoint, plan_routes, AccessorKind, ParentScope, ResourcePlan,
    RoutePlan,
};
pub use project::*;
pub use suite::{creatable_resources, emit_test_suite, helper_name};
