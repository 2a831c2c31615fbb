#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Runs the `clooney-gen` binary as a subprocess.

use std::process::Command;

fn clooney_gen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_clooney-gen"));
    cmd.env_remove("CLOONEY_OUTPUT_DIR").env("CLOONEY_LOG_LEVEL", "warn");
    cmd
}

#[test]
fn test_cli_generate_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("backend");
    let status = clooney_gen()
        .current_dir(dir.path())
        .arg("generate")
        .arg("--output")
        .arg(&out)
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(out.join("app").join("main.py").exists());
    assert!(out.join("tests").join("conftest.py").exists());
    assert!(out.join("docker-compose.yml").exists());
}

#[test]
fn test_cli_only_docs() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("backend");
    let status = clooney_gen()
        .current_dir(dir.path())
        .args(["generate", "--only", "docs", "--output"])
        .arg(&out)
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(out.join("api.yml").exists());
    assert!(!out.join("app").exists());
    assert!(!out.join("Dockerfile").exists());
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("backend");
    let output = clooney_gen()
        .current_dir(dir.path())
        .args(["generate", "--dry-run", "--output"])
        .arg(&out)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would write"));
    assert!(stdout.contains("crud.py"));
    assert!(!out.exists());
}

#[test]
fn test_cli_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("clooney.toml"),
        "output_dir = \"from_config\"\napi_prefix = \"/v2\"\n",
    )
    .unwrap();
    let status = clooney_gen()
        .current_dir(dir.path())
        .args(["generate", "--only", "app"])
        .status()
        .expect("run cli");
    assert!(status.success());
    let main = std::fs::read_to_string(dir.path().join("from_config/app/main.py")).unwrap();
    assert!(main.contains("\"/v2\""));
}

#[test]
fn test_cli_inspect_prints_plan() {
    let dir = tempfile::tempdir().unwrap();
    let output = clooney_gen()
        .current_dir(dir.path())
        .arg("inspect")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("crud.get_task"));
    assert!(stdout.contains("501"));
    assert!(stdout.contains("stories"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_cli_bad_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.toml"), "output_dir = [").unwrap();
    let status = clooney_gen()
        .current_dir(dir.path())
        .args(["generate", "--config", "broken.toml"])
        .status()
        .expect("run cli");
    assert!(!status.success());
}
