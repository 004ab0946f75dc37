//! The `chunklab chunk` command.
//!
//! Loads a document, merges CLI overrides into the configured chunking
//! parameters, runs the chunker, and prints the result as text or JSON on
//! stdout. Clamp warnings go to stderr through `tracing`; in JSON mode they
//! are also part of the report.

use anyhow::{Context, Result};
use chunklab_core::{
    chunk_text, Chunk, ChunkConfig, ChunkSequence, ChunkStats, ConfigWarning, EffectiveConfig,
    Strategy,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write as _;

use crate::config::{Config, OutputFormat};
use crate::input::{read_document, InputSource};

/// Parsed arguments of `chunklab chunk`. `None` means "use the config".
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    pub source: InputSource,
    pub strategy: Option<Strategy>,
    pub size: Option<i64>,
    pub overlap: Option<i64>,
    pub format: Option<OutputFormat>,
    pub no_stats: bool,
}

impl ChunkOptions {
    /// Config values with CLI overrides applied.
    pub fn chunk_config(&self, cfg: &Config) -> ChunkConfig {
        ChunkConfig::new(
            self.strategy.unwrap_or(cfg.chunking.strategy),
            self.size.unwrap_or(cfg.chunking.chunk_size),
            self.overlap.unwrap_or(cfg.chunking.overlap),
        )
    }
}

/// JSON shape of a chunking run.
#[derive(Debug, Serialize)]
struct ChunkReport<'a> {
    config: &'a EffectiveConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<ChunkStats>,
    warnings: &'a [ConfigWarning],
    chunks: &'a [Chunk],
}

pub fn run_chunk(cfg: &Config, opts: &ChunkOptions) -> Result<()> {
    let text = read_document(&opts.source, cfg.input.max_bytes)?;
    let config = opts.chunk_config(cfg);

    tracing::debug!(
        source = %opts.source.describe(),
        bytes = text.len(),
        ?config,
        "chunking input"
    );

    let seq = chunk_text(&text, &config);
    let show_stats = cfg.output.stats && !opts.no_stats;

    let rendered = match opts.format.unwrap_or(cfg.output.format) {
        OutputFormat::Text => render_text(&seq, show_stats),
        OutputFormat::Json => render_json(&seq, show_stats)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("Failed to write output")?;
    stdout.flush().context("Failed to write output")?;
    Ok(())
}

/// Human-readable listing, one block per chunk.
pub fn render_text(seq: &ChunkSequence, show_stats: bool) -> String {
    let mut out = String::new();
    let cfg = &seq.config;

    let _ = writeln!(
        out,
        "Strategy: {}  Chunk size: {} chars  Overlap: {} chars",
        cfg.strategy, cfg.chunk_size, cfg.overlap
    );

    if show_stats {
        let s = seq.stats();
        let _ = writeln!(
            out,
            "Total Chunks: {}  Avg Size: {} chars  Min: {}  Max: {}  Repeated: {} chars",
            s.count, s.avg_chars, s.min_chars, s.max_chars, s.overlap_chars
        );
    }

    if seq.is_empty() {
        let _ = writeln!(out, "\nNo text to chunk.");
        return out;
    }

    for chunk in seq {
        let _ = writeln!(
            out,
            "\n--- chunk {} [{}..{}] {} chars ---",
            chunk.index + 1,
            chunk.start,
            chunk.end,
            chunk.char_len()
        );
        out.push_str(&chunk.text);
        if !chunk.text.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

/// Pretty-printed JSON report, newline-terminated.
pub fn render_json(seq: &ChunkSequence, show_stats: bool) -> Result<String> {
    let report = ChunkReport {
        config: &seq.config,
        stats: show_stats.then(|| seq.stats()),
        warnings: &seq.warnings,
        chunks: &seq.chunks,
    };
    let mut json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    json.push('\n');
    Ok(json)
}
