//! Codeword table generation.
//!
//! A codeword is the root-to-leaf path for a symbol: 0 descends left,
//! 1 descends right. The table is produced by a preorder depth-first walk
//! of the built tree; the walk never mutates the tree, and the scratch path
//! buffer is copied (not aliased) whenever a leaf is recorded.
//!
//! Because every symbol sits at a distinct leaf of a binary tree, the
//! resulting code set is prefix-free by construction.

use crate::tree::HuffNode;

/// An owned bit path from the root to one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Number of bits in this codeword.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for a zero-length code (never produced by the generator).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in path order, root first.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// True iff `self` is a proper or improper prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.bits.len() <= other.bits.len() && other.bits[..self.bits.len()] == self.bits[..]
    }
}

/// Symbol -> codeword mapping for one built tree.
///
/// Read-only after generation. Every symbol present in the source frequency
/// table has exactly one entry.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Generate the table by walking the tree from `root`.
    ///
    /// A root that is itself a leaf (single-symbol alphabet) gets the
    /// one-bit code `0`: a zero-length code could not delimit symbol
    /// boundaries in the packed stream.
    pub fn from_root(root: &HuffNode) -> Self {
        let mut codes = vec![None; 256];

        if let HuffNode::Leaf { symbol, .. } = root {
            codes[*symbol as usize] = Some(Code { bits: vec![false] });
        } else {
            let mut path = Vec::new();
            record_codes(root, &mut path, &mut codes);
        }

        Self { codes }
    }

    /// Codeword for `symbol`, if the symbol was present in the alphabet.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a codeword.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_none())
    }

    /// All (symbol, codeword) pairs in ascending symbol order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(b, c)| c.as_ref().map(|code| (b as u8, code)))
    }
}

/// Preorder walk appending 0 for left, 1 for right; copy the path at leaves.
fn record_codes(node: &HuffNode, path: &mut Vec<bool>, codes: &mut [Option<Code>]) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(Code { bits: path.clone() });
        }
        HuffNode::Internal { left, right, .. } => {
            path.push(false);
            record_codes(left, path, codes);
            path.pop();

            path.push(true);
            record_codes(right, path, codes);
            path.pop();
        }
    }
}
