use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::analyzer::analyze_schema;
use crate::config::{resolve_config, GeneratorConfig};
use crate::generator::{
    generate_backend, plan_routes, AccessorKind, GenerateOptions, GenerationReport,
    GenerationScope,
};
use crate::spec::asana_catalog;

/// Command-line interface for the backend generator
///
/// Running without a subcommand is the same as `generate` with defaults.
#[derive(Parser, Debug)]
#[command(name = "clooney-gen", version)]
#[command(about = "Generate a FastAPI/SQLAlchemy backend for the Asana clone API", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the backend into the output directory
    Generate {
        /// Output directory (overrides config and CLOONEY_OUTPUT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to a clooney.toml configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Limit generation to specific parts (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyPart>>,

        /// List the files that would be written without writing them
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the endpoint plan and relational schema without generating
    Inspect {
        /// Path to a clooney.toml configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Artifact groups that can be generated selectively with `--only`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyPart {
    /// `app/` package and requirements.txt
    App,
    /// pytest suite under `tests/`
    Tests,
    /// Dockerfile, docker-compose, alembic and schema.sql
    Deploy,
    /// api.yml
    Docs,
}

/// Parse arguments from the process and execute them.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or a generated
/// file cannot be written.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Execute an already parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => generate(None, None, None, false).map(|_| ()),
        Some(Commands::Generate {
            output,
            config,
            only,
            dry_run,
        }) => generate(output, config.as_deref(), only.as_deref(), dry_run).map(|_| ()),
        Some(Commands::Inspect { config }) => inspect(config.as_deref()),
    }
}

fn effective_config(
    config: Option<&Path>,
    output: Option<PathBuf>,
) -> anyhow::Result<GeneratorConfig> {
    let mut config = resolve_config(config)?;
    if let Some(output) = output {
        config.output_dir = output;
    }
    Ok(config)
}

fn generate(
    output: Option<PathBuf>,
    config: Option<&Path>,
    only: Option<&[OnlyPart]>,
    dry_run: bool,
) -> anyhow::Result<GenerationReport> {
    let config = effective_config(config, output)?;
    let options = GenerateOptions {
        scope: map_only_to_scope(only),
        dry_run,
    };
    println!("🚀 Generating backend in {:?}", config.output_dir);
    let report = generate_backend(&config, &options)?;

    for name in &report.unsupported {
        println!("⚠️  {name} has no data accessor; emitted as a 501 stub");
    }
    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    println!(
        "✅ {verb} {} files ({} tables, {} endpoints) to {:?}",
        report.files.len(),
        report.tables,
        report.endpoints,
        report.output_dir
    );
    Ok(report)
}

fn inspect(config: Option<&Path>) -> anyhow::Result<()> {
    let config = effective_config(config, None)?;
    let spec = asana_catalog();
    println!("📄 {} {} (prefix {})", spec.title, spec.version, config.api_prefix);

    println!("\nEndpoints:");
    for plan in plan_routes(&spec) {
        for route in &plan.routes {
            let target = match &route.kind {
                AccessorKind::Unsupported { reason } => format!("501 ({reason})"),
                _ => format!("crud.{}", route.accessor.as_deref().unwrap_or_default()),
            };
            println!(
                "  {:<7}{:<40}{:<28}→ {target}",
                route.endpoint.method.as_str(),
                route.endpoint.path,
                route.endpoint.name
            );
        }
    }

    println!("\nTables:");
    for table in analyze_schema(&spec).values() {
        let columns: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        println!("  {} ({})", table.name, columns.join(", "));
        for rel in &table.relationships {
            println!("    {} → {}(id)", rel.field, rel.references);
        }
    }
    Ok(())
}

/// Convert CLI `--only` parts to a `GenerationScope`
///
/// If `only` is `None`, all parts are enabled. If `only` is provided,
/// only the specified parts are enabled.
pub(crate) fn map_only_to_scope(only: Option<&[OnlyPart]>) -> GenerationScope {
    let Some(parts) = only else {
        return GenerationScope::all();
    };
    let mut scope = GenerationScope::none();
    for part in parts {
        match part {
            OnlyPart::App => scope.app = true,
            OnlyPart::Tests => scope.tests = true,
            OnlyPart::Deploy => scope.deploy = true,
            OnlyPart::Docs => scope.docs = true,
        }
    }
    scope
}
