//! # CLI Module
//!
//! Command-line interface of the `clooney-gen` binary.
//!
//! ## Commands
//!
//! ### `generate` (default)
//!
//! ```bash
//! clooney-gen generate --output build/backend
//! ```
//!
//! Options:
//! - `--output <DIR>` - Output directory (default: `output/backend`, or
//!   `CLOONEY_OUTPUT_DIR`, or `output_dir` from the config file)
//! - `--config <FILE>` - Configuration file (default: `./clooney.toml` if present)
//! - `--only <PARTS>` - Comma-separated subset of `app,tests,deploy,docs`
//! - `--dry-run` - List files without writing them
//!
//! Running `clooney-gen` with no subcommand is the same as `clooney-gen generate`.
//!
//! ### `inspect`
//!
//! Prints the endpoint → accessor plan and the derived tables:
//!
//! ```bash
//! clooney-gen inspect
//! ```
//!
//! ## Exit Status
//!
//! Non-zero only when an error propagates, e.g. an unreadable config file or
//! a failed write. Unsupported endpoints are reported but are not errors.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands, OnlyPart};
