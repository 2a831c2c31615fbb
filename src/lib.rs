//! # Clooney
//!
//! **Clooney** is a static scaffold generator. From a fixed, built-in
//! description of an Asana-like REST API it emits a complete CRUD backend:
//! SQLAlchemy models, Pydantic schemas, data accessors, FastAPI routes, an
//! OpenAPI document, a SQL schema, a pytest suite and deployment files.
//!
//! ## Architecture
//!
//! - **[`spec`]** - the API description: endpoints, resources and field type tags
//! - **[`analyzer`]** - derives the relational schema and the OpenAPI document
//! - **[`generator`]** - plans routes and renders every artifact
//! - **[`config`]** - layered generator settings (`clooney.toml`, env, flags)
//! - **[`cli`]** - the `clooney-gen` command line
//! - **[`otel`]** - structured logging setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(clooney-gen)
//!     participant Spec as spec::asana_catalog
//!     participant Analyzer as analyzer
//!     participant Plan as generator::plan_routes
//!     participant Emit as generator emitters
//!     participant FS as File System
//!
//!     User->>CLI: clooney-gen generate --output backend
//!     CLI->>Spec: asana_catalog()
//!     Spec-->>CLI: ApiSpec
//!     CLI->>Analyzer: analyze_schema(&spec)
//!     Analyzer-->>CLI: DbSchema
//!     CLI->>Analyzer: generate_openapi(&spec)
//!     CLI->>Plan: plan_routes(&spec)
//!     Plan-->>CLI: Vec<ResourcePlan>
//!     CLI->>Emit: app, tests, deploy
//!     Emit-->>CLI: Vec<Artifact>
//!     CLI->>FS: write_artifacts(output_dir)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin clooney-gen -- generate --output backend
//! cd backend && docker compose up
//! ```
//!
//! Or from code:
//!
//! ```rust,no_run
//! use clooney::config::GeneratorConfig;
//! use clooney::generator::{generate_backend, GenerateOptions};
//!
//! let report = generate_backend(&GeneratorConfig::default(), &GenerateOptions::default())?;
//! println!("wrote {} files", report.files.len());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Unsupported Endpoints
//!
//! Endpoints whose path shape has no data accessor (for example adding a
//! task to a section, which has no join table) are still routed. They answer
//! `501 Not Implemented`, are logged as warnings, and get a test asserting
//! the 501.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod generator;
pub mod otel;
pub mod spec;

pub use analyzer::{analyze_schema, generate_openapi, DbSchema};
pub use config::GeneratorConfig;
pub use generator::{generate_backend, GenerateOptions, GenerationReport};
pub use spec::{asana_catalog, ApiSpec};
