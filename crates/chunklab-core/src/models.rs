//! Core data models used throughout chunklab.
//!
//! A caller describes what it wants with a [`ChunkConfig`] (raw values, any
//! integer accepted). The chunker resolves that into an [`EffectiveConfig`]
//! (clamped, in chars) and returns a [`ChunkSequence`] carrying the chunks,
//! the effective configuration, and any [`ConfigWarning`]s raised while
//! clamping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest chunk size (in chars) the chunker will ever use.
pub const MIN_CHUNK_SIZE: usize = 10;

/// Approximate characters-per-token ratio used by [`Strategy::Token`].
pub const CHARS_PER_TOKEN: i64 = 4;

/// Cut-point preference for [`Strategy::Recursive`], coarsest first.
///
/// The empty separator always matches and leaves the hard cut in place.
pub const RECURSIVE_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// How a document is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Always cut at the fixed character count.
    Fixed,
    /// Prefer paragraph, line, then word boundaries before a hard cut.
    #[default]
    Recursive,
    /// Fixed splitting with sizes given in approximate tokens.
    Token,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Fixed => "fixed",
            Strategy::Recursive => "recursive",
            Strategy::Token => "token",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Strategy::Fixed),
            "recursive" => Ok(Strategy::Recursive),
            "token" => Ok(Strategy::Token),
            other => anyhow::bail!(
                "Unknown chunking strategy: '{}'. Must be fixed, recursive, or token.",
                other
            ),
        }
    }
}

/// Caller-supplied chunking parameters.
///
/// Values are taken as given; [`ChunkConfig::resolve`] applies the floor and
/// overlap clamps. For [`Strategy::Token`] both numbers are in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub strategy: Strategy,
    pub chunk_size: i64,
    pub overlap: i64,
}

impl ChunkConfig {
    pub fn new(strategy: Strategy, chunk_size: i64, overlap: i64) -> Self {
        Self {
            strategy,
            chunk_size,
            overlap,
        }
    }

    pub fn fixed(chunk_size: i64, overlap: i64) -> Self {
        Self::new(Strategy::Fixed, chunk_size, overlap)
    }

    pub fn recursive(chunk_size: i64, overlap: i64) -> Self {
        Self::new(Strategy::Recursive, chunk_size, overlap)
    }

    pub fn token(chunk_size: i64, overlap: i64) -> Self {
        Self::new(Strategy::Token, chunk_size, overlap)
    }

    /// Clamp the raw values into an [`EffectiveConfig`].
    ///
    /// Never fails. Every adjustment made is reported as a [`ConfigWarning`].
    pub fn resolve(&self) -> (EffectiveConfig, Vec<ConfigWarning>) {
        let mut warnings = Vec::new();

        let (size, overlap) = match self.strategy {
            Strategy::Token => (
                self.chunk_size.saturating_mul(CHARS_PER_TOKEN),
                self.overlap.saturating_mul(CHARS_PER_TOKEN),
            ),
            Strategy::Fixed | Strategy::Recursive => (self.chunk_size, self.overlap),
        };

        let min = MIN_CHUNK_SIZE as i64;
        let chunk_size = if size < min {
            warnings.push(ConfigWarning::ChunkSizeRaised {
                requested: size,
                effective: MIN_CHUNK_SIZE,
            });
            MIN_CHUNK_SIZE
        } else {
            usize::try_from(size).unwrap_or(usize::MAX)
        };

        let overlap = if overlap < 0 {
            warnings.push(ConfigWarning::NegativeOverlap { requested: overlap });
            0
        } else {
            let requested = usize::try_from(overlap).unwrap_or(usize::MAX);
            if requested >= chunk_size {
                warnings.push(ConfigWarning::OverlapClamped {
                    requested: overlap,
                    effective: chunk_size - 1,
                });
                chunk_size - 1
            } else {
                requested
            }
        };

        if overlap.saturating_mul(2) > chunk_size {
            warnings.push(ConfigWarning::HighRedundancy {
                overlap,
                chunk_size,
            });
        }

        (
            EffectiveConfig {
                strategy: self.strategy,
                chunk_size,
                overlap,
            },
            warnings,
        )
    }
}

impl Default for ChunkConfig {
    /// The lab's starting position: recursive, 200 chars, 20 overlap.
    fn default() -> Self {
        Self::recursive(200, 20)
    }
}

/// Clamped configuration actually used by the chunker. Sizes are in chars.
///
/// Invariants: `chunk_size >= MIN_CHUNK_SIZE` and `overlap < chunk_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub strategy: Strategy,
    pub chunk_size: usize,
    pub overlap: usize,
}

/// A non-fatal note about how a [`ChunkConfig`] was adjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigWarning {
    /// Chunk size was below [`MIN_CHUNK_SIZE`] and was raised.
    ChunkSizeRaised { requested: i64, effective: usize },
    /// Overlap was at least the chunk size and was lowered to `chunk_size - 1`.
    OverlapClamped { requested: i64, effective: usize },
    /// Overlap was negative and was treated as zero.
    NegativeOverlap { requested: i64 },
    /// More than half of every chunk repeats the previous one.
    HighRedundancy { overlap: usize, chunk_size: usize },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::ChunkSizeRaised {
                requested,
                effective,
            } => write!(
                f,
                "chunk size {} is below the minimum, using {} chars",
                requested, effective
            ),
            ConfigWarning::OverlapClamped {
                requested,
                effective,
            } => write!(
                f,
                "overlap {} is not smaller than the chunk size, using {} chars",
                requested, effective
            ),
            ConfigWarning::NegativeOverlap { requested } => {
                write!(f, "overlap {} is negative, using 0", requested)
            }
            ConfigWarning::HighRedundancy {
                overlap,
                chunk_size,
            } => write!(
                f,
                "overlap of {} chars exceeds half of the {}-char chunk size; chunks will be highly redundant",
                overlap, chunk_size
            ),
        }
    }
}

/// One contiguous piece of a document.
///
/// `start..end` is the range in chars (not bytes) within the source text.
/// `hash` is the SHA-256 of `text`, for staleness detection downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub hash: String,
}

impl Chunk {
    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}

/// The ordered output of a single chunking call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSequence {
    pub config: EffectiveConfig,
    pub chunks: Vec<Chunk>,
    pub warnings: Vec<ConfigWarning>,
}

impl ChunkSequence {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Chunk texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.text.as_str()).collect()
    }

    /// Rebuild the source text by dropping each chunk's overlapping prefix.
    pub fn reassemble(&self) -> String {
        let mut out = String::new();
        let mut prev_end: usize = 0;
        for chunk in &self.chunks {
            let skip = prev_end.saturating_sub(chunk.start);
            out.extend(chunk.text.chars().skip(skip));
            prev_end = chunk.end;
        }
        out
    }

    /// Summary figures for display.
    pub fn stats(&self) -> ChunkStats {
        ChunkStats::from_chunks(&self.chunks)
    }
}

impl<'a> IntoIterator for &'a ChunkSequence {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Size summary of a chunk sequence. All figures are in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChunkStats {
    pub count: usize,
    pub total_chars: usize,
    pub avg_chars: usize,
    pub min_chars: usize,
    pub max_chars: usize,
    /// Chars repeated from the previous chunk, summed over the sequence.
    pub overlap_chars: usize,
}

impl ChunkStats {
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        if chunks.is_empty() {
            return Self::default();
        }

        let count = chunks.len();
        let total_chars: usize = chunks.iter().map(Chunk::char_len).sum();
        let min_chars = chunks.iter().map(Chunk::char_len).min().unwrap_or(0);
        let max_chars = chunks.iter().map(Chunk::char_len).max().unwrap_or(0);
        let overlap_chars = chunks
            .windows(2)
            .map(|pair| pair[0].end.saturating_sub(pair[1].start))
            .sum();

        Self {
            count,
            total_chars,
            // Round half up.
            avg_chars: (total_chars * 2 + count) / (count * 2),
            min_chars,
            max_chars,
            overlap_chars,
        }
    }
}
