// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::LayoutMode;

/// Command-line arguments for `pipeline-builder`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pipeline-builder",
    version,
    about = "Edit a pipeline task graph and lay it out for display.",
    long_about = None
)]
pub struct CliArgs {
    /// Pipeline file to start from (TOML).
    ///
    /// If omitted, editing starts from an empty graph.
    #[arg(long, value_name = "PATH")]
    pub pipeline: Option<String>,

    /// Task catalog file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Catalog.toml")]
    pub catalog: String,

    /// Edit script to apply, one `[[edit]]` table per request.
    #[arg(long, value_name = "PATH")]
    pub edits: Option<String>,

    /// Where to write the saved pipeline. Saving is skipped if omitted.
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,

    /// Layout parameters to use when printing the graph.
    #[arg(long, value_enum, value_name = "MODE", default_value_t = LayoutMode::Builder)]
    pub layout: LayoutMode,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PIPELINE_BUILDER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate the pipeline, print its layout, but apply no edits.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
