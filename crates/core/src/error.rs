//! Error types for the compressor.
//!
//! All operations return structured errors rather than panicking.
//! Every failure is a hard stop: nothing is retried internally, and no
//! partial output is produced on an error path.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Heap: priority-queue contract violations (internal invariants)
/// - Tree: tree construction or code-table generation failures
/// - Format: corrupted or foreign input to decompression
/// - CRC: data corruption detected in the container
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Heap contract violation (e.g., pop on an empty heap)
    #[error("heap error: {0}")]
    Heap(#[from] HeapError),

    /// Tree construction or code generation error
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Container format error (bad header, malformed tree, truncated data)
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Min-heap contract violations.
///
/// These indicate an internal invariant was already broken; they are not
/// recoverable by retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    /// Attempted to insert into a heap at its fixed capacity
    #[error("heap capacity exceeded: capacity {capacity}")]
    CapacityExceeded { capacity: usize },

    /// Attempted to pop from an empty heap
    #[error("pop from empty heap")]
    EmptyHeap,

    /// Index outside the heap's logical size
    #[error("invalid heap index {index}: size is {size}")]
    InvalidIndex { index: usize, size: usize },
}

/// Huffman tree construction and code-table errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Frequency table has no symbols (nothing to compress)
    #[error("empty alphabet: no symbols to encode")]
    EmptyAlphabet,

    /// Operation invoked before the tree was built
    #[error("tree not built: register a frequency table and call build() first")]
    TreeNotBuilt,

    /// A symbol in the input has no code in the table
    #[error("no code for symbol {symbol:#04x}")]
    MissingCode { symbol: u8 },
}

/// Container format errors raised during decompression.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Invalid magic number in the container header
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Unsupported container format version
    #[error("unsupported format version {version}")]
    UnsupportedVersion { version: u8 },

    /// Container is too short to hold a valid header and trailer
    #[error("file too short: need at least {required} bytes, got {actual}")]
    FileTooShort { required: usize, actual: usize },

    /// Serialized tree is truncated or structurally invalid
    #[error("malformed tree at byte offset {offset}")]
    MalformedTree { offset: usize },

    /// Pad count outside 0-7, or nonzero padding over an empty data region
    #[error("invalid pad count {pad}")]
    InvalidPadCount { pad: u8 },

    /// Bit stream ended in the middle of a codeword
    #[error("truncated bit stream: codeword incomplete at end of data")]
    TruncatedStream,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
