//! Tree serialization and deserialization.
//!
//! The serialized tree is embedded in the compressed file so the
//! decompressor can reconstruct the code table with no out-of-band
//! metadata. Nodes are written in preorder with a fixed-width header:
//!
//! ```text
//! +-------------------+
//! | weight (8)        |  u64 little-endian
//! +-------------------+
//! | symbol (1)        |  u8 (0 for internal nodes)
//! +-------------------+
//! | is_leaf (1)       |  0 or 1
//! +-------------------+
//! | has_left (1)      |  0 or 1
//! +-------------------+
//! | has_right (1)     |  0 or 1
//! +-------------------+
//! | left subtree      |  present iff has_left
//! | right subtree     |  present iff has_right
//! +-------------------+
//! ```
//!
//! Deserialization reads the same preorder and is self-delimiting: the
//! caller learns how many bytes the tree occupied, which is how the
//! pipeline locates the packed data that follows.

use crate::error::{FormatError, Result};
use crate::tree::HuffNode;

/// Bytes per serialized node header.
const NODE_SIZE: usize = 12;

/// A byte alphabet caps tree depth at 256 levels; anything deeper is not a
/// tree this compressor could have written.
const MAX_DEPTH: usize = 256;

/// Serialize the tree rooted at `root` into a preorder byte stream.
pub fn serialize_tree(root: &HuffNode) -> Vec<u8> {
    let mut out = Vec::new();
    write_node(root, &mut out);
    out
}

fn write_node(node: &HuffNode, out: &mut Vec<u8>) {
    match node {
        HuffNode::Leaf { weight, symbol } => {
            out.extend_from_slice(&weight.to_le_bytes());
            out.push(*symbol);
            out.push(1); // is_leaf
            out.push(0); // has_left
            out.push(0); // has_right
        }
        HuffNode::Internal {
            weight,
            left,
            right,
        } => {
            out.extend_from_slice(&weight.to_le_bytes());
            out.push(0); // symbol unused
            out.push(0); // is_leaf
            out.push(1); // has_left
            out.push(1); // has_right
            write_node(left, out);
            write_node(right, out);
        }
    }
}

/// Deserialize a tree from the start of `bytes`.
///
/// Returns the reconstructed root and the number of bytes consumed.
///
/// # Errors
/// `FormatError::MalformedTree` if the stream underruns, a flag byte is not
/// 0/1, the leaf/children flags contradict each other, a node has weight 0,
/// or nesting exceeds the depth a byte alphabet permits. The reported
/// offset is where the offending node header begins.
pub fn deserialize_tree(bytes: &[u8]) -> Result<(HuffNode, usize)> {
    let mut offset = 0;
    let root = read_node(bytes, &mut offset, 0)?;
    Ok((root, offset))
}

fn read_node(bytes: &[u8], offset: &mut usize, depth: usize) -> Result<HuffNode> {
    let start = *offset;
    if depth > MAX_DEPTH {
        return Err(FormatError::MalformedTree { offset: start }.into());
    }
    if bytes.len() < start + NODE_SIZE {
        return Err(FormatError::MalformedTree { offset: start }.into());
    }

    let weight = u64::from_le_bytes(
        bytes[start..start + 8]
            .try_into()
            .expect("slice is exactly 8 bytes"),
    );
    let symbol = bytes[start + 8];
    let is_leaf = read_flag(bytes, start, start + 9)?;
    let has_left = read_flag(bytes, start, start + 10)?;
    let has_right = read_flag(bytes, start, start + 11)?;
    *offset = start + NODE_SIZE;

    if weight == 0 {
        return Err(FormatError::MalformedTree { offset: start }.into());
    }

    match (is_leaf, has_left, has_right) {
        (true, false, false) => Ok(HuffNode::Leaf { weight, symbol }),
        (false, true, true) => {
            let left = read_node(bytes, offset, depth + 1)?;
            let right = read_node(bytes, offset, depth + 1)?;
            Ok(HuffNode::Internal {
                weight,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        // A leaf claiming children, or an internal node missing one.
        _ => Err(FormatError::MalformedTree { offset: start }.into()),
    }
}

fn read_flag(bytes: &[u8], node_start: usize, at: usize) -> Result<bool> {
    match bytes[at] {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(FormatError::MalformedTree { offset: node_start }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tree::{FrequencyTable, HuffmanTree};

    fn build_root(data: &[u8]) -> HuffNode {
        let mut tree = HuffmanTree::new();
        tree.register(FrequencyTable::from_bytes(data));
        tree.build().unwrap();
        tree.root().unwrap().clone()
    }

    fn assert_round_trip(data: &[u8]) {
        let root = build_root(data);
        let bytes = serialize_tree(&root);
        let (restored, consumed) = deserialize_tree(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(restored, root);
    }

    #[test]
    fn test_round_trip_single_leaf() {
        assert_round_trip(b"aaaa");
    }

    #[test]
    fn test_round_trip_two_leaves() {
        assert_round_trip(b"abab");
    }

    #[test]
    fn test_round_trip_many_leaves() {
        assert_round_trip(b"hello world, this tree has a fair number of leaves");
    }

    #[test]
    fn test_round_trip_full_alphabet() {
        let data: Vec<u8> = (0u8..=255).collect();
        assert_round_trip(&data);
    }

    #[test]
    fn test_node_size() {
        let root = build_root(b"zzz");
        assert_eq!(serialize_tree(&root).len(), NODE_SIZE);

        // N leaves means 2N-1 nodes.
        let root = build_root(b"hello");
        assert_eq!(serialize_tree(&root).len(), 7 * NODE_SIZE);
    }

    #[test]
    fn test_truncated_input() {
        let root = build_root(b"hello");
        let bytes = serialize_tree(&root);

        for cut in [0, 1, NODE_SIZE - 1, NODE_SIZE + 3, bytes.len() - 1] {
            assert!(matches!(
                deserialize_tree(&bytes[..cut]),
                Err(Error::Format(FormatError::MalformedTree { .. }))
            ));
        }
    }

    #[test]
    fn test_invalid_flag_byte() {
        let root = build_root(b"abab");
        let mut bytes = serialize_tree(&root);
        bytes[9] = 7; // is_leaf must be 0 or 1
        assert!(matches!(
            deserialize_tree(&bytes),
            Err(Error::Format(FormatError::MalformedTree { offset: 0 }))
        ));
    }

    #[test]
    fn test_leaf_claiming_children() {
        let root = build_root(b"aaaa");
        let mut bytes = serialize_tree(&root);
        bytes[10] = 1; // has_left on a leaf
        assert!(matches!(
            deserialize_tree(&bytes),
            Err(Error::Format(FormatError::MalformedTree { .. }))
        ));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let root = build_root(b"aaaa");
        let mut bytes = serialize_tree(&root);
        bytes[..8].fill(0);
        assert!(matches!(
            deserialize_tree(&bytes),
            Err(Error::Format(FormatError::MalformedTree { offset: 0 }))
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        // The tree is self-delimiting: bytes after it are not its concern.
        let root = build_root(b"abcabc");
        let mut bytes = serialize_tree(&root);
        let tree_len = bytes.len();
        bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);

        let (restored, consumed) = deserialize_tree(&bytes).unwrap();
        assert_eq!(consumed, tree_len);
        assert_eq!(restored, root);
    }
}
