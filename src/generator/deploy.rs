//! Deployment emitter: container files, migrations and the DDL snapshot.

use super::artifact::Artifact;
use super::schema::{migration_column, py_str};
use super::templates::{
    AlembicEnvTemplate, AlembicIniTemplate, ComposeDatabase, ComposeTemplate, DockerfileTemplate,
    InitialMigrationTemplate, MigrationTable, ScriptMakoTemplate,
};
use crate::analyzer::{ColumnDescriptor, DbSchema};
use crate::config::{DatabaseSettings, GeneratorConfig};

/// Revision id of the generated initial migration.
pub const INITIAL_REVISION: &str = "0001";

fn column_ddl(column: &ColumnDescriptor) -> String {
    let mut line = format!("{} {}", column.name, column.sql_type);
    if column.primary_key {
        line.push_str(" PRIMARY KEY");
    } else {
        if column.unique {
            line.push_str(" UNIQUE");
        }
        if !column.nullable {
            line.push_str(" NOT NULL");
        }
    }
    if let Some(default) = column.default {
        line.push_str(&format!(" DEFAULT {default}"));
    }
    line
}

/// Render `CREATE TABLE` statements for every table, in schema order.
///
/// Foreign keys are table constraints after the column list, each with
/// `ON DELETE CASCADE`.
pub fn render_schema_sql(db: &DbSchema) -> String {
    db.values()
        .map(|table| {
            let mut lines: Vec<String> = table.columns.iter().map(column_ddl).collect();
            lines.extend(table.relationships.iter().map(|rel| {
                format!(
                    "FOREIGN KEY ({}) REFERENCES {}(id) ON DELETE CASCADE",
                    rel.field, rel.references
                )
            }));
            format!(
                "CREATE TABLE {} (\n  {}\n);\n",
                table.name,
                lines.join(",\n  ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn initial_migration(db: &DbSchema) -> InitialMigrationTemplate {
    InitialMigrationTemplate {
        revision: INITIAL_REVISION.to_string(),
        tables: db
            .values()
            .map(|table| MigrationTable {
                name: table.name.clone(),
                columns: table.columns.iter().map(migration_column).collect(),
            })
            .collect(),
        drop_order: db.keys().rev().cloned().collect(),
    }
}

/// Double-quoted compose scalar. `$` is doubled so compose does not interpolate it.
fn compose_str(s: &str) -> anyhow::Result<String> {
    Ok(serde_json::to_string(&s.replace('$', "$$"))?)
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn compose_database(database: &DatabaseSettings) -> anyhow::Result<ComposeDatabase> {
    let healthcheck = format!(
        "pg_isready -U {} -p {}",
        shell_quote(&database.user),
        database.port
    );
    Ok(ComposeDatabase {
        image: compose_str(&database.image)?,
        user: compose_str(&database.user)?,
        password: compose_str(&database.password)?,
        name: compose_str(&database.name)?,
        port: database.port,
        healthcheck: compose_str(&healthcheck)?,
        env_var: compose_str(&database.env_var)?,
        app_url: compose_str(&database.app_url())?,
    })
}

/// Render container, migration and DDL artifacts.
pub fn emit_deployment(db: &DbSchema, config: &GeneratorConfig) -> anyhow::Result<Vec<Artifact>> {
    let database = &config.database;
    let artifacts = vec![
        Artifact::render(
            "Dockerfile",
            &DockerfileTemplate {
                app_port: config.app_port,
            },
        )?,
        Artifact::render(
            "docker-compose.yml",
            &ComposeTemplate {
                db: compose_database(database)?,
                app_port: config.app_port,
            },
        )?,
        Artifact::render(
            "alembic.ini",
            &AlembicIniTemplate {
                migration_url: database.migration_url().replace('%', "%%"),
            },
        )?,
        Artifact::render(
            "alembic/env.py",
            &AlembicEnvTemplate {
                env_var: py_str(&database.env_var),
            },
        )?,
        Artifact::render("alembic/script.py.mako", &ScriptMakoTemplate)?,
        Artifact::empty("alembic/versions/.gitkeep"),
        Artifact::render(
            format!("alembic/versions/{INITIAL_REVISION}_initial.py"),
            &initial_migration(db),
        )?,
        Artifact::new("schema.sql", render_schema_sql(db)),
    ];
    tracing::debug!(count = artifacts.len(), "rendered deployment artifacts");
    Ok(artifacts)
}
