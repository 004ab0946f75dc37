//! # chunklab
//!
//! A command-line lab for splitting documents into overlapping chunks, the
//! way a retrieval pipeline prepares text before embedding it.
//!
//! The chunking engine itself lives in [`chunklab_core`]; this crate adds the
//! pieces around it: TOML configuration, document loading with a size limit,
//! and text/JSON rendering for the `chunklab` binary.
//!
//! ## Quick Start
//!
//! ```bash
//! chunklab samples
//! chunklab chunk --sample article --strategy recursive --size 200 --overlap 20
//! chunklab chunk notes.md --strategy fixed --size 500 --format json
//! cat notes.md | chunklab --config ./chunklab.toml chunk
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`input`] | Reading documents from files, stdin, or samples |
//! | [`chunk_cmd`] | The `chunk` command and its text/JSON output |
//! | [`samples`] | The `samples` command |

pub mod chunk_cmd;
pub mod config;
pub mod input;
pub mod samples;

pub use chunklab_core;
