// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DrawScan - architectural drawing extraction from the command line.
//!
//! Reads raster scans (PNG, JPEG, ...), PDFs and DXF files and prints the
//! building outlines, entrances, dimension lines, scale and bounds as JSON.
//!
//! # Commands
//!
//! - `drawscan analyze <FILE>` - analyze one drawing
//! - `drawscan batch <FILES>...` - analyze many drawings in parallel
//! - `drawscan probe` - report which optional capabilities are available

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "drawscan")]
#[command(about = "Extract outlines, entrances and dimensions from architectural drawings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single drawing
    Analyze {
        /// Raster image, PDF or DXF file
        file: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Precomputed OCR tokens (JSON array) instead of running tesseract
        #[arg(long, value_name = "FILE", conflicts_with = "no_ocr")]
        ocr_tokens: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Write JSON to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Analyze many drawings in parallel
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Write one `<name>.json` per drawing into this directory
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Report availability of text localization, CAD parsing and PDF rendering
    Probe,
}

#[derive(Args, Clone)]
struct AnalysisArgs {
    /// Floor number for raster outlines (0 or absent means floor 1)
    #[arg(short, long)]
    floor: Option<u32>,

    /// Vision configuration (JSON, partial allowed)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip OCR; entrances fall back to door arc detection
    #[arg(long)]
    no_ocr: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env();
    tracing::debug!(
        worker_threads = config.worker_threads,
        ocr_language = config.ocr_language.as_deref().unwrap_or("default"),
        pdf_dpi = config.pdf_dpi,
        "configuration loaded"
    );

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to initialize rayon thread pool")?;

    match cli.command {
        Commands::Analyze {
            file,
            analysis,
            ocr_tokens,
            pretty,
            output,
        } => commands::analyze(
            &config,
            &file,
            &analysis,
            ocr_tokens.as_deref(),
            pretty,
            output.as_deref(),
        ),
        Commands::Batch {
            files,
            analysis,
            output_dir,
        } => commands::batch(&config, &files, &analysis, output_dir.as_deref()),
        Commands::Probe => commands::probe(&config),
    }
}

/// Write to a file, or stdout when no path is given
fn emit(json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
