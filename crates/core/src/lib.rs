//! spraypaint-core: static Huffman compression
//!
//! This library implements the full compression pipeline for a static
//! (two-pass) Huffman compressor over single-byte symbols:
//! - Derives a prefix-free code from the input's byte-frequency distribution
//! - Embeds a self-describing serialization of the code tree in the output
//! - Packs codewords MSB-first with an explicit pad-count trailer
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `heap`: fixed-capacity binary min-heap driving tree construction
//! - `tree`: frequency table, tree nodes, and the greedy merge
//! - `code`: symbol-to-codeword table generation
//! - `codec`: preorder tree serialization/deserialization
//! - `bitio`: MSB-first bit packing/unpacking with pad handling
//! - `pipeline`: container format and compress/decompress orchestration
//! - `stats`: byte counts and timing for reporting
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured; every failure is a hard stop
//! - **Deterministic**: equal weights break ties by insertion order, so the
//!   same input always compresses to the same bytes
//! - **Self-describing output**: the tree travels inside the file; no
//!   out-of-band metadata is needed to decompress

pub mod bitio;
pub mod code;
pub mod codec;
pub mod error;
pub mod heap;
pub mod pipeline;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pipeline::{compress, decompress};
