//! Overlapping text chunker with fixed, recursive, and token strategies.
//!
//! Splits a document into an ordered list of [`Chunk`]s of at most
//! `chunk_size` chars, each repeating up to `overlap` trailing chars of its
//! predecessor. All positions are counted in chars, and every cut lands on
//! a char boundary.
//!
//! # Algorithm
//!
//! 1. Resolve the caller's [`ChunkConfig`] (floor of 10 chars, overlap kept
//!    below the chunk size, token sizes converted at 4 chars/token).
//! 2. From `start`, take `end = min(start + chunk_size, len)`.
//! 3. For the recursive strategy, when `end` is not the end of the text,
//!    pull `end` back to just after the last separator inside
//!    `start..end`, trying [`RECURSIVE_SEPARATORS`] in order. A separator
//!    only counts if it sits strictly after `start`.
//! 4. Emit `start..end`. Stop once `end` reaches the end of the text.
//! 5. Advance to `max(start + 1, end - overlap)`.
//!
//! Step 5 guarantees forward progress, so the loop runs at most `len` times.
//!
//! # Example
//!
//! ```rust
//! use chunklab_core::chunk::chunk_text;
//! use chunklab_core::models::ChunkConfig;
//!
//! let seq = chunk_text("AAAA\n\nBBBB\nCCCC DDDD", &ChunkConfig::recursive(10, 0));
//! assert_eq!(seq.texts(), vec!["AAAA\n\n", "BBBB\n", "CCCC DDDD"]);
//! ```

use sha2::{Digest, Sha256};

use crate::models::{Chunk, ChunkConfig, ChunkSequence, Strategy, RECURSIVE_SEPARATORS};

/// Split `text` according to `config`.
///
/// Total: never fails, never loops forever. Empty text gives an empty
/// sequence. Clamping adjustments are returned in
/// [`ChunkSequence::warnings`] and logged at `warn`.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> ChunkSequence {
    let (effective, warnings) = config.resolve();
    for warning in &warnings {
        tracing::warn!(strategy = %effective.strategy, "{}", warning);
    }

    let bounds = CharBounds::new(text);
    let len = bounds.char_len();
    let size = effective.chunk_size;
    let overlap = effective.overlap;

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = start.saturating_add(size).min(len);

        if effective.strategy == Strategy::Recursive && end < len {
            end = snap_to_separator(text, &bounds, start, end);
        }

        chunks.push(make_chunk(chunks.len(), start, end, bounds.slice(text, start, end)));

        if end >= len {
            break;
        }
        start = (start + 1).max(end.saturating_sub(overlap));
    }

    tracing::debug!(
        strategy = %effective.strategy,
        chunk_size = size,
        overlap,
        chars = len,
        chunks = chunks.len(),
        "chunked document"
    );

    ChunkSequence {
        config: effective,
        chunks,
        warnings,
    }
}

/// Pull `end` back to just past the highest-priority separator found in
/// `start..end`. Returns `end` unchanged when nothing matches after `start`.
fn snap_to_separator(text: &str, bounds: &CharBounds, start: usize, end: usize) -> usize {
    let window_start = bounds.byte(start);
    let window = bounds.slice(text, start, end);

    for sep in RECURSIVE_SEPARATORS {
        if let Some(pos) = window.rfind(sep) {
            let at = bounds.char_at_byte(window_start + pos);
            if at > start {
                return at + sep.chars().count();
            }
        }
    }

    end
}

/// Char index to byte offset table for one document.
struct CharBounds {
    /// Byte offset of every char, followed by the text's byte length.
    offsets: Vec<usize>,
}

impl CharBounds {
    fn new(text: &str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        Self { offsets }
    }

    fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn byte(&self, char_index: usize) -> usize {
        self.offsets[char_index]
    }

    /// `byte` must lie on a char boundary.
    fn char_at_byte(&self, byte: usize) -> usize {
        self.offsets.binary_search(&byte).unwrap_or_else(|i| i)
    }

    fn slice<'a>(&self, text: &'a str, start: usize, end: usize) -> &'a str {
        &text[self.byte(start)..self.byte(end)]
    }
}

/// Create a single [`Chunk`] with a SHA-256 content hash.
fn make_chunk(index: usize, start: usize, end: usize, text: &str) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    Chunk {
        index,
        start,
        end,
        text: text.to_string(),
        hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigWarning, MIN_CHUNK_SIZE};
    use crate::samples;

    const FOX: &str = "The quick brown fox jumps over the lazy dog.";

    fn all_configs() -> Vec<ChunkConfig> {
        let mut configs = Vec::new();
        for size in [1, 10, 17, 50, 200] {
            for overlap in [-3, 0, 4, 9, 49, 500] {
                configs.push(ChunkConfig::fixed(size, overlap));
                configs.push(ChunkConfig::recursive(size, overlap));
                configs.push(ChunkConfig::token(size, overlap));
            }
        }
        configs
    }

    fn corpus() -> Vec<String> {
        let mut texts: Vec<String> = samples::all()
            .iter()
            .map(|s| s.content().to_string())
            .collect();
        texts.push(FOX.to_string());
        texts.push("x".repeat(137));
        texts.push("\n\n\n\n   \n \n\n".repeat(9));
        texts.push("┌──────────────────┐\n│ Hello wörld  ✓   │\n└──────────────────┘".to_string());
        texts
    }

    #[test]
    fn test_empty_text() {
        let seq = chunk_text("", &ChunkConfig::recursive(100, 10));
        assert!(seq.is_empty());
        assert_eq!(seq.reassemble(), "");
    }

    #[test]
    fn test_short_text_single_chunk() {
        let seq = chunk_text("Hello, world!", &ChunkConfig::recursive(200, 20));
        assert_eq!(seq.texts(), vec!["Hello, world!"]);
        assert_eq!(seq.chunks[0].start, 0);
        assert_eq!(seq.chunks[0].end, 13);
    }

    #[test]
    fn test_fixed_fox_boundaries() {
        assert_eq!(FOX.chars().count(), 44);
        let seq = chunk_text(FOX, &ChunkConfig::fixed(20, 5));
        assert_eq!(
            seq.texts(),
            vec!["The quick brown fox ", " fox jumps over the ", " the lazy dog."]
        );
        let ranges: Vec<(usize, usize)> = seq.iter().map(|c| (c.start, c.end)).collect();
        assert_eq!(ranges, vec![(0, 20), (15, 35), (30, 44)]);
    }

    #[test]
    fn test_recursive_prefers_paragraph_break() {
        // chunk_size 8 is raised to 10.
        let seq = chunk_text("AAAA\n\nBBBB\nCCCC DDDD", &ChunkConfig::recursive(8, 0));
        assert_eq!(seq.config.chunk_size, MIN_CHUNK_SIZE);
        assert_eq!(seq.texts(), vec!["AAAA\n\n", "BBBB\n", "CCCC DDDD"]);
    }

    #[test]
    fn test_recursive_falls_back_to_space() {
        let text = "alpha beta gamma delta epsilon";
        let seq = chunk_text(text, &ChunkConfig::recursive(12, 0));
        assert_eq!(seq.texts(), vec!["alpha beta ", "gamma delta ", "epsilon"]);
    }

    #[test]
    fn test_recursive_hard_cut_without_separators() {
        let text = "x".repeat(25);
        let seq = chunk_text(&text, &ChunkConfig::recursive(10, 0));
        assert_eq!(seq.texts(), vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn test_recursive_ignores_separator_at_start() {
        // The only space is at the window start; it must not stall progress.
        let text = format!(" {}", "y".repeat(20));
        let seq = chunk_text(&text, &ChunkConfig::recursive(10, 0));
        assert_eq!(seq.chunks[0].text, format!(" {}", "y".repeat(9)));
        assert_eq!(seq.reassemble(), text);
    }

    #[test]
    fn test_recursive_last_chunk_not_snapped() {
        // The final window reaches the end of the text, so no backtracking.
        let text = "one two three four";
        let seq = chunk_text(text, &ChunkConfig::recursive(10, 0));
        assert_eq!(seq.texts(), vec!["one two ", "three four"]);
    }

    #[test]
    fn test_recursive_with_overlap() {
        let text = "alpha beta gamma delta epsilon";
        let seq = chunk_text(text, &ChunkConfig::recursive(12, 3));
        assert_eq!(
            seq.texts(),
            vec!["alpha beta ", "ta gamma ", "ma delta ", "ta epsilon"]
        );
        assert_eq!(seq.reassemble(), text);
    }

    #[test]
    fn test_floor_clamp_matches_ten() {
        for text in corpus() {
            let a = chunk_text(&text, &ChunkConfig::fixed(3, 0));
            let b = chunk_text(&text, &ChunkConfig::fixed(10, 0));
            assert_eq!(a.chunks, b.chunks);
            assert_eq!(a.config, b.config);
        }
    }

    #[test]
    fn test_overlap_clamp_matches_max() {
        for text in corpus() {
            let a = chunk_text(&text, &ChunkConfig::fixed(50, 999));
            let b = chunk_text(&text, &ChunkConfig::fixed(50, 49));
            assert_eq!(a.config.overlap, 49);
            assert_eq!(a.chunks, b.chunks);
        }
    }

    #[test]
    fn test_max_overlap_advances_one_char() {
        let text = "z".repeat(120);
        let seq = chunk_text(&text, &ChunkConfig::fixed(50, 49));
        assert_eq!(seq.len(), 71);
        for (i, chunk) in seq.iter().enumerate() {
            assert_eq!(chunk.start, i);
        }
    }

    #[test]
    fn test_negative_overlap_treated_as_zero() {
        let a = chunk_text(FOX, &ChunkConfig::fixed(20, -5));
        let b = chunk_text(FOX, &ChunkConfig::fixed(20, 0));
        assert_eq!(a.chunks, b.chunks);
        assert_eq!(
            a.warnings,
            vec![ConfigWarning::NegativeOverlap { requested: -5 }]
        );
    }

    #[test]
    fn test_token_strategy_is_scaled_fixed() {
        for text in corpus() {
            let a = chunk_text(&text, &ChunkConfig::token(5, 1));
            let b = chunk_text(&text, &ChunkConfig::fixed(20, 4));
            assert_eq!(a.texts(), b.texts());
        }
    }

    #[test]
    fn test_multibyte_chars_counted_as_chars() {
        let text = "héllo wörld ünïcödé ✓✓✓✓";
        let seq = chunk_text(text, &ChunkConfig::fixed(10, 2));
        for chunk in &seq {
            assert_eq!(chunk.text.chars().count(), chunk.char_len());
            assert!(chunk.char_len() <= 10);
        }
        assert_eq!(seq.chunks[0].text, "héllo wörl");
        assert_eq!(seq.reassemble(), text);
    }

    #[test]
    fn test_round_trip_all_configs() {
        for text in corpus() {
            for config in all_configs() {
                let seq = chunk_text(&text, &config);
                assert_eq!(seq.reassemble(), text, "round trip failed for {:?}", config);
            }
        }
    }

    #[test]
    fn test_chunk_invariants_all_configs() {
        for text in corpus() {
            let len = text.chars().count();
            for config in all_configs() {
                let seq = chunk_text(&text, &config);
                let size = seq.config.chunk_size;
                assert!(seq.len() <= len, "too many chunks for {:?}", config);

                let mut prev: Option<&Chunk> = None;
                for (i, chunk) in seq.iter().enumerate() {
                    assert_eq!(chunk.index, i);
                    assert!(!chunk.text.is_empty());
                    assert!(chunk.char_len() <= size);
                    if let Some(p) = prev {
                        assert!(chunk.start > p.start, "no forward progress");
                        assert!(chunk.start <= p.end, "gap between chunks");
                        assert!(p.end - chunk.start <= seq.config.overlap);
                    }
                    prev = Some(chunk);
                }
                assert_eq!(seq.chunks.last().map(|c| c.end), Some(len));
            }
        }
    }

    #[test]
    fn test_fixed_chunks_exact_size() {
        for text in corpus() {
            let seq = chunk_text(&text, &ChunkConfig::fixed(17, 4));
            let (last, rest) = seq.chunks.split_last().unwrap();
            for chunk in rest {
                assert_eq!(chunk.char_len(), 17);
            }
            assert!(last.char_len() <= 17);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = samples::get("article").unwrap().content();
        let c1 = chunk_text(text, &ChunkConfig::recursive(120, 15));
        let c2 = chunk_text(text, &ChunkConfig::recursive(120, 15));
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_hash_is_sha256_of_text() {
        let seq = chunk_text("Hello, world!", &ChunkConfig::fixed(100, 0));
        assert_eq!(
            seq.chunks[0].hash,
            "315f5bdb76d078c43b8ac0064e4a0164612b1fce77c869345bfc94c75894edd3"
        );
    }
}
