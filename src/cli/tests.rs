//! Unit tests for CLI commands

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::commands::map_only_to_scope;
use crate::cli::{run, Cli, Commands, OnlyPart};
use crate::generator::GenerationScope;
use clap::Parser;
use std::ffi::OsString;

#[test]
fn test_no_subcommand_defaults_to_generate() {
    let cli = Cli::try_parse_from(["clooney-gen"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_generate_with_flags() {
    let cli = Cli::try_parse_from([
        "clooney-gen",
        "generate",
        "--output",
        "out",
        "--only",
        "app,docs",
        "--dry-run",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Generate {
            output,
            config,
            only,
            dry_run,
        }) => {
            assert_eq!(output.unwrap().to_string_lossy(), "out");
            assert!(config.is_none());
            assert_eq!(only.unwrap(), vec![OnlyPart::App, OnlyPart::Docs]);
            assert!(dry_run);
        }
        other => panic!("Expected Generate command, got {other:?}"),
    }
}

#[test]
fn test_inspect_command() {
    let cli = Cli::try_parse_from(["clooney-gen", "inspect", "--config", "c.toml"]).unwrap();
    match cli.command {
        Some(Commands::Inspect { config }) => {
            assert_eq!(config.unwrap().to_string_lossy(), "c.toml");
        }
        other => panic!("Expected Inspect command, got {other:?}"),
    }
}

#[test]
fn test_unknown_only_part_is_rejected() {
    let result = Cli::try_parse_from(["clooney-gen", "generate", "--only", "handlers"]);
    assert!(result.is_err());
}

#[test]
fn test_map_only_to_scope() {
    assert_eq!(map_only_to_scope(None), GenerationScope::all());
    let scope = map_only_to_scope(Some(&[OnlyPart::Tests, OnlyPart::Deploy]));
    assert_eq!(
        scope,
        GenerationScope {
            app: false,
            tests: true,
            deploy: true,
            docs: false,
        }
    );
}

#[test]
fn test_generate_dry_run_into_tempdir() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("backend");
    let args: Vec<OsString> = vec![
        "clooney-gen".into(),
        "generate".into(),
        "--output".into(),
        output.clone().into_os_string(),
        "--dry-run".into(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();
    run(cli).unwrap();
    assert!(!output.exists());
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let args: Vec<OsString> = vec![
        "clooney-gen".into(),
        "inspect".into(),
        "--config".into(),
        missing.into_os_string(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();
    assert!(run(cli).is_err());
}
