//! # chunklab CLI
//!
//! Splits documents into overlapping chunks with a fixed, recursive, or
//! token strategy and shows where every cut landed.
//!
//! ## Usage
//!
//! ```bash
//! chunklab [--config ./chunklab.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chunklab chunk [FILE]` | Chunk a file, stdin (`-` or no file), or `--sample NAME` |
//! | `chunklab samples` | List the built-in sample documents |
//!
//! ## Examples
//!
//! ```bash
//! # Recursive splitting of the article sample
//! chunklab chunk --sample article
//!
//! # Hard 500-char cuts with 50 chars of overlap, as JSON
//! chunklab chunk README.md --strategy fixed --size 500 --overlap 50 --format json
//!
//! # Sizes in approximate tokens
//! chunklab chunk notes.txt --strategy token --size 128 --overlap 16
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `warn`, which shows clamp warnings).

use chunklab::chunk_cmd::{self, ChunkOptions};
use chunklab::config::{self, OutputFormat};
use chunklab::input::InputSource;
use chunklab::samples;
use chunklab_core::Strategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// chunklab: split documents into overlapping chunks for retrieval
/// pipelines.
#[derive(Parser)]
#[command(
    name = "chunklab",
    about = "Split documents into overlapping chunks",
    version,
    long_about = "chunklab splits a document into an ordered list of overlapping chunks. \
    The fixed strategy cuts at an exact character count, the recursive strategy backs off to \
    the nearest paragraph, line, or word break, and the token strategy sizes chunks in \
    approximate tokens (4 chars each)."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, `./chunklab.toml` is used if it exists, otherwise
    /// built-in defaults (recursive, 200 chars, 20 overlap).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Chunk a document.
    ///
    /// Reads FILE, stdin when FILE is `-` or absent, or a built-in sample.
    /// Flags override the `[chunking]` and `[output]` config sections.
    /// Out-of-range sizes are clamped (minimum 10 chars, overlap below
    /// the chunk size) and reported as warnings.
    Chunk {
        /// Document to chunk; `-` for stdin.
        file: Option<PathBuf>,

        /// Use a built-in sample instead of FILE (see `chunklab samples`).
        #[arg(long, conflicts_with = "file")]
        sample: Option<String>,

        /// Splitting strategy: `fixed`, `recursive`, or `token`.
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<Strategy>,

        /// Target chunk size (chars, or tokens for the token strategy).
        #[arg(long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Chars (or tokens) repeated between consecutive chunks.
        #[arg(long, allow_negative_numbers = true)]
        overlap: Option<i64>,

        /// Output format.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Omit the statistics summary.
        #[arg(long)]
        no_stats: bool,
    },

    /// List the built-in sample documents.
    Samples,
}

/// Parse a `--strategy` value.
fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse::<Strategy>().map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chunk {
            file,
            sample,
            strategy,
            size,
            overlap,
            format,
            no_stats,
        } => {
            let cfg = config::resolve_config(cli.config.as_deref())?;
            let opts = ChunkOptions {
                source: InputSource::from_args(file, sample),
                strategy,
                size,
                overlap,
                format,
                no_stats,
            };
            chunk_cmd::run_chunk(&cfg, &opts)?;
        }
        // Needs no config.
        Commands::Samples => {
            samples::list_samples()?;
        }
    }

    Ok(())
}
