//! # chunklab core
//!
//! I/O-free logic for chunklab: chunk models, the fixed/recursive/token
//! chunker, chunk statistics, and the built-in sample documents.
//!
//! ```rust
//! use chunklab_core::{chunk_text, ChunkConfig};
//!
//! let seq = chunk_text("The quick brown fox jumps over the lazy dog.", &ChunkConfig::fixed(20, 5));
//! assert_eq!(seq.len(), 3);
//! assert_eq!(seq.reassemble(), "The quick brown fox jumps over the lazy dog.");
//! ```

pub mod chunk;
pub mod models;
pub mod samples;

pub use chunk::chunk_text;
pub use models::{
    Chunk, ChunkConfig, ChunkSequence, ChunkStats, ConfigWarning, EffectiveConfig, Strategy,
};
