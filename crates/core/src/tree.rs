//! Huffman tree construction.
//!
//! This module owns the frequency model and the greedy merge that produces
//! a prefix tree minimizing weighted path length:
//! - `FrequencyTable`: per-byte occurrence counts over the whole input
//! - `HuffNode`: recursive tree node (leaf symbol or internal merge)
//! - `HuffmanTree`: register/build lifecycle around a single root
//!
//! # Determinism
//!
//! Heap entries carry an insertion sequence number; equal weights break
//! ties in favor of the earlier-inserted entry. Leaves are inserted in
//! ascending symbol order, so compressing the same input always produces
//! byte-identical output.

use crate::code::CodeTable;
use crate::error::{Result, TreeError};
use crate::heap::MinHeap;
use std::cmp::Ordering;

/// Per-byte occurrence counts, built once from the full input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Occurrence count for one symbol (0 if absent).
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols with a nonzero count.
    pub fn alphabet_size(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True if no symbol occurs.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols with their counts, in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }
}

/// A node of the prefix tree.
///
/// # Invariants
/// - a leaf's weight equals its symbol's frequency in the source table
/// - an internal node's weight equals the sum of its children's weights
/// - internal nodes always own exactly two children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        symbol: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    /// Merge two subtrees; the first argument becomes the left child.
    fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Weight of this node (frequency for leaves, child sum for internals).
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Heap entry pairing a subtree with its insertion sequence number.
///
/// Ordering is (weight, seq): equal weights resolve to the earlier-inserted
/// subtree, which makes the merge order (and the output file) reproducible.
#[derive(Debug)]
struct HeapEntry {
    seq: u64,
    node: HuffNode,
}

impl HeapEntry {
    fn key(&self) -> (u64, u64) {
        (self.node.weight(), self.seq)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A Huffman tree with an explicit register/build lifecycle.
///
/// Created empty, populated by [`build`](Self::build) from a registered
/// [`FrequencyTable`], then queried read-only. `reset` destroys the tree and
/// returns it to the empty state.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    frequencies: Option<FrequencyTable>,
    root: Option<HuffNode>,
}

impl HuffmanTree {
    /// Create an empty, unbuilt tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the frequency table the next `build` will consume.
    pub fn register(&mut self, frequencies: FrequencyTable) {
        self.frequencies = Some(frequencies);
    }

    /// Build the tree by the greedy merge.
    ///
    /// Seeds a min-heap with one leaf per present symbol, then repeatedly
    /// pops the two lowest-weight subtrees (first-popped becomes the left
    /// child) and pushes their merge, until one root remains. An alphabet of
    /// size 1 leaves the lone leaf as the root.
    ///
    /// # Errors
    /// - `TreeError::TreeNotBuilt` if no frequency table was registered
    /// - `TreeError::EmptyAlphabet` if the registered table has no symbols
    pub fn build(&mut self) -> Result<()> {
        let frequencies = self
            .frequencies
            .as_ref()
            .ok_or(TreeError::TreeNotBuilt)?;
        if frequencies.is_empty() {
            return Err(TreeError::EmptyAlphabet.into());
        }

        let mut heap = MinHeap::with_capacity(frequencies.alphabet_size());
        let mut seq = 0u64;

        for (symbol, weight) in frequencies.symbols() {
            heap.put(HeapEntry {
                seq,
                node: HuffNode::Leaf { weight, symbol },
            })?;
            seq += 1;
        }

        while heap.len() > 1 {
            let a = heap.pop()?;
            let b = heap.pop()?;
            heap.put(HeapEntry {
                seq,
                node: HuffNode::merge(a.node, b.node),
            })?;
            seq += 1;
        }

        self.root = Some(heap.pop()?.node);
        Ok(())
    }

    /// The built root, if any.
    pub fn root(&self) -> Option<&HuffNode> {
        self.root.as_ref()
    }

    /// Generate the symbol -> codeword table from the built tree.
    ///
    /// # Errors
    /// `TreeError::TreeNotBuilt` if `build` has not succeeded yet.
    pub fn code_table(&self) -> Result<CodeTable> {
        let root = self.root.as_ref().ok_or(TreeError::TreeNotBuilt)?;
        Ok(CodeTable::from_root(root))
    }

    /// Destroy the tree and reset to the empty state.
    pub fn reset(&mut self) {
        self.frequencies = None;
        self.root = None;
    }
}
