//! model-export - offline glTF -> .shmodel compiler
//!
//! With no paths, every source under the configured asset root is compiled.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use model_export::{compile_file, discover_sources, ExportConfig};

#[derive(Parser)]
#[command(name = "model-export")]
#[command(about = "Compile glTF scenes into .shmodel engine assets")]
#[command(version)]
struct Cli {
    /// Source files to compile (default: scan the asset root)
    paths: Vec<PathBuf>,

    /// Path to model-export.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory scanned when no paths are given (overrides config)
    #[arg(long)]
    asset_root: Option<PathBuf>,

    /// Write outputs here instead of next to their sources
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let mut config =
        ExportConfig::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(root) = cli.asset_root {
        config.asset_root = root;
    }
    config.output_dir = cli.output_dir;

    let inputs = if cli.paths.is_empty() {
        let found = match discover_sources(&config.asset_root, &config) {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
        };
        if found.is_empty() {
            tracing::error!("No source files found under {:?}", config.asset_root);
            return Ok(ExitCode::FAILURE);
        }
        tracing::info!("Found {} source files under {:?}", found.len(), config.asset_root);
        found
    } else {
        cli.paths
    };

    let mut failed = 0usize;
    for input in &inputs {
        if let Err(e) = compile_file(input, &config) {
            tracing::error!("Failed to compile {:?}: {}", input, e);
            failed += 1;
        }
    }

    tracing::info!(
        "Done: {} compiled, {} failed",
        inputs.len() - failed,
        failed
    );

    // Per-file failures are reported, not propagated to the exit code
    Ok(ExitCode::SUCCESS)
}
