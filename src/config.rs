//! TOML configuration parsing and validation.
//!
//! Every section and key is optional. A missing file section falls back to
//! the defaults below, which match the lab's starting position
//! (recursive, 200 chars, 20 overlap).
//!
//! ```toml
//! [chunking]
//! strategy = "recursive"   # fixed | recursive | token
//! chunk_size = 200
//! overlap = 20
//!
//! [input]
//! max_bytes = 10485760
//!
//! [output]
//! format = "text"          # text | json
//! stats = true
//! ```
//!
//! Chunk sizes and overlaps are deliberately not validated here: the chunker
//! clamps out-of-range values and reports what it changed.

use anyhow::{Context, Result};
use chunklab_core::{ChunkConfig, Strategy};
use serde::Deserialize;
use std::path::Path;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "chunklab.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ChunkingConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i64,
    #[serde(default = "default_overlap")]
    pub overlap: i64,
}

fn default_chunk_size() -> i64 {
    200
}
fn default_overlap() -> i64 {
    20
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl ChunkingConfig {
    pub fn to_chunk_config(&self) -> ChunkConfig {
        ChunkConfig::new(self.strategy, self.chunk_size, self.overlap)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Largest document accepted, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

/// How `chunklab chunk` prints its result.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// One pretty-printed JSON report on stdout.
    Json,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_stats")]
    pub stats: bool,
}

fn default_stats() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            stats: default_stats(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.input.max_bytes == 0 {
        anyhow::bail!("input.max_bytes must be > 0");
    }

    Ok(config)
}

/// Load the explicit config if given, else `./chunklab.toml` if present,
/// else the built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        tracing::debug!(path = %fallback.display(), "using config from working directory");
        return load_config(fallback);
    }

    Ok(Config::default())
}
