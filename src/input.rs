//! Document loading for the CLI.
//!
//! Reads the text to chunk from a file, stdin, or a built-in sample, and
//! rejects anything larger than `input.max_bytes` before the chunker sees
//! it. Input must be valid UTF-8.

use anyhow::{Context, Result};
use chunklab_core::samples;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Where the document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
    Sample(String),
}

impl InputSource {
    /// `-` or no path means stdin.
    pub fn from_args(path: Option<PathBuf>, sample: Option<String>) -> Self {
        match (sample, path) {
            (Some(name), _) => InputSource::Sample(name),
            (None, Some(p)) if p.as_os_str() != "-" => InputSource::File(p),
            (None, _) => InputSource::Stdin,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::File(p) => p.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::Sample(name) => format!("sample:{}", name),
        }
    }
}

/// Load the document for `source`, enforcing `max_bytes`.
pub fn read_document(source: &InputSource, max_bytes: u64) -> Result<String> {
    let bytes = match source {
        InputSource::File(path) => {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat input file: {}", path.display()))?;
            // Early reject; pipes and /proc files report 0 here.
            check_size(meta.len(), max_bytes)?;
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            read_bounded(file, max_bytes)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        InputSource::Stdin => {
            read_bounded(std::io::stdin().lock(), max_bytes).context("Failed to read stdin")?
        }
        InputSource::Sample(name) => {
            let sample = samples::get(name).ok_or_else(|| {
                let known: Vec<&str> = samples::all().iter().map(|s| s.name).collect();
                anyhow::anyhow!(
                    "Unknown sample: '{}'. Available: {}",
                    name,
                    known.join(", ")
                )
            })?;
            let text = sample.content();
            check_size(text.len() as u64, max_bytes)?;
            return Ok(text.to_string());
        }
    };

    String::from_utf8(bytes)
        .with_context(|| format!("Input is not valid UTF-8: {}", source.describe()))
}

/// Read at most `max_bytes + 1` bytes, failing if the limit is exceeded.
fn read_bounded(reader: impl Read, max_bytes: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(max_bytes.saturating_add(1)).read_to_end(&mut buf)?;
    check_size(buf.len() as u64, max_bytes)?;
    Ok(buf)
}

fn check_size(len: u64, max_bytes: u64) -> Result<()> {
    if len > max_bytes {
        anyhow::bail!(
            "Input exceeds input.max_bytes ({} > {} bytes)",
            len,
            max_bytes
        );
    }
    Ok(())
}
