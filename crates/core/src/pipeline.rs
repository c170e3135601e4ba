//! Compression and decompression pipelines over the container format.
//!
//! # Container Format
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x53 0x50 0x52 0x59 ("SPRY")
//! +------------------+
//! | version (1)      |  format version, currently 1
//! +------------------+
//! | crc32 (4)        |  u32 little-endian, covers tree + data + trailer
//! +------------------+
//! | serialized tree  |  preorder, self-delimiting (see codec)
//! | (variable)       |
//! +------------------+
//! | packed data      |  codewords, MSB-first within each byte
//! | (variable)       |
//! +------------------+
//! | pad count (1)    |  0-7 padding bits in the last data byte
//! +------------------+
//! ```
//!
//! The pad-count trailer is always present and always the last byte, even
//! when the bit stream ends exactly on a byte boundary (pad count 0).
//!
//! Compression is strictly sequential: count frequencies over the whole
//! input, build the tree, generate the code table, then emit tree, packed
//! bits, and trailer. No output is produced on any failure path.
//!
//! # Single-symbol inputs
//!
//! An alphabet of one symbol yields a tree that is a lone leaf with no
//! branch to walk. Its symbol gets the one-bit code `0`, so N occurrences
//! pack to N bits and decompression emits one symbol per data bit.

use crate::bitio::{BitReader, BitWriter};
use crate::codec::{deserialize_tree, serialize_tree};
use crate::error::{Error, FormatError, Result, TreeError};
use crate::tree::{FrequencyTable, HuffNode, HuffmanTree};
use std::io::{Read, Write};

/// Magic number for compressed files: "SPRY"
pub const MAGIC: [u8; 4] = [0x53, 0x50, 0x52, 0x59];

/// Current container format version
pub const FORMAT_VERSION: u8 = 1;

/// Bytes before the serialized tree: magic + version + crc32
const HEADER_SIZE: usize = 9;

/// Compress `input` into a self-describing container.
///
/// # Errors
/// - `TreeError::EmptyAlphabet` if `input` is empty
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut tree = HuffmanTree::new();
    tree.register(FrequencyTable::from_bytes(input));
    tree.build()?;
    let table = tree.code_table()?;
    let root = tree.root().ok_or(TreeError::TreeNotBuilt)?;

    let tree_bytes = serialize_tree(root);

    let mut writer = BitWriter::new();
    for &byte in input {
        let code = table
            .get(byte)
            .ok_or(TreeError::MissingCode { symbol: byte })?;
        writer.write_code(code);
    }
    let (data, pad) = writer.finish();

    // Everything after the header is CRC-protected.
    let mut payload = Vec::with_capacity(tree_bytes.len() + data.len() + 1);
    payload.extend_from_slice(&tree_bytes);
    payload.extend_from_slice(&data);
    payload.push(pad);

    let crc = crc32fast::hash(&payload);

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decompress a container produced by [`compress`].
///
/// # Errors
/// - `FormatError::FileTooShort` / `InvalidMagic` / `UnsupportedVersion`
///   for header problems
/// - `Error::Crc` if the payload checksum does not match
/// - `FormatError::MalformedTree` / `InvalidPadCount` / `TruncatedStream`
///   for corrupted tree, trailer, or data regions
pub fn decompress(file: &[u8]) -> Result<Vec<u8>> {
    if file.len() < HEADER_SIZE + 1 {
        return Err(FormatError::FileTooShort {
            required: HEADER_SIZE + 1,
            actual: file.len(),
        }
        .into());
    }

    let magic: [u8; 4] = file[0..4].try_into().expect("slice is exactly 4 bytes");
    if magic != MAGIC {
        return Err(FormatError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let version = file[4];
    if version != FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion { version }.into());
    }

    let stored_crc = u32::from_le_bytes(file[5..9].try_into().expect("slice is exactly 4 bytes"));
    let payload = &file[HEADER_SIZE..];
    let computed_crc = crc32fast::hash(payload);
    if computed_crc != stored_crc {
        return Err(Error::Crc {
            expected: stored_crc,
            actual: computed_crc,
        });
    }

    let (root, tree_len) = deserialize_tree(payload)?;

    // Data region runs from the end of the tree to the byte before the
    // pad-count trailer.
    if payload.len() < tree_len + 1 {
        return Err(FormatError::FileTooShort {
            required: HEADER_SIZE + tree_len + 1,
            actual: file.len(),
        }
        .into());
    }
    let data = &payload[tree_len..payload.len() - 1];
    let pad = payload[payload.len() - 1];

    let mut reader = BitReader::new(data, pad)?;
    decode(&root, &mut reader)
}

/// Walk the tree from the root for each data bit, emitting a symbol and
/// resetting at every leaf.
fn decode(root: &HuffNode, reader: &mut BitReader<'_>) -> Result<Vec<u8>> {
    // Degenerate one-leaf tree: one symbol per data bit.
    if let HuffNode::Leaf { symbol, .. } = root {
        let count = reader.remaining();
        for _ in 0..count {
            reader.read_bit()?;
        }
        return Ok(vec![*symbol; count]);
    }

    let mut out = Vec::new();
    while !reader.is_empty() {
        let mut node = root;
        loop {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    out.push(*symbol);
                    break;
                }
                HuffNode::Internal { left, right, .. } => {
                    node = if reader.read_bit()? {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    };
                }
            }
        }
    }
    Ok(out)
}

/// Read all of `source`, compress, and write the container to `sink`.
///
/// Returns `(input_bytes, output_bytes)`.
pub fn compress_stream<R: Read, W: Write>(source: &mut R, sink: &mut W) -> Result<(u64, u64)> {
    let mut input = Vec::new();
    source.read_to_end(&mut input)?;
    let out = compress(&input)?;
    sink.write_all(&out)?;
    Ok((input.len() as u64, out.len() as u64))
}

/// Read all of `source`, decompress, and write the original bytes to `sink`.
///
/// Returns `(input_bytes, output_bytes)`.
pub fn decompress_stream<R: Read, W: Write>(source: &mut R, sink: &mut W) -> Result<(u64, u64)> {
    let mut input = Vec::new();
    source.read_to_end(&mut input)?;
    let out = decompress(&input)?;
    sink.write_all(&out)?;
    Ok((input.len() as u64, out.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(input: &[u8]) {
        let compressed = compress(input).unwrap();
        let restored = decompress(&compressed).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn test_round_trip_hello() {
        assert_round_trip(b"hello");
    }

    #[test]
    fn test_round_trip_length_one() {
        assert_round_trip(b"A");
    }

    #[test]
    fn test_round_trip_single_symbol_run() {
        assert_round_trip(&[b'x'; 1000]);
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let mut input: Vec<u8> = (0u8..=255).collect();
        input.extend((0u8..=255).rev());
        assert_round_trip(&input);
    }

    #[test]
    fn test_round_trip_text() {
        let input = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
        assert_round_trip(&input);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            compress(b""),
            Err(Error::Tree(TreeError::EmptyAlphabet))
        ));
    }

    #[test]
    fn test_pad_count_zero_on_byte_boundary() {
        // Two equal-frequency symbols get 1-bit codes; 8 symbols pack to
        // exactly one byte, so the trailer must record pad count 0.
        let compressed = compress(b"abababab").unwrap();
        assert_eq!(*compressed.last().unwrap(), 0);
        assert_round_trip(b"abababab");
    }

    #[test]
    fn test_pad_count_partial_byte() {
        // 11 one-bit symbols -> 11 bits -> 2 data bytes with 5 padding bits.
        let compressed = compress(b"abababababa").unwrap();
        assert_eq!(*compressed.last().unwrap(), 5);

        let restored = decompress(&compressed).unwrap();
        // Exactly 11 symbols back: the 5 padding bits were not decoded.
        assert_eq!(restored, b"abababababa");
    }

    #[test]
    fn test_header_layout() {
        let compressed = compress(b"hello").unwrap();
        assert_eq!(&compressed[0..4], &MAGIC);
        assert_eq!(compressed[4], FORMAT_VERSION);
    }

    #[test]
    fn test_invalid_magic() {
        let mut compressed = compress(b"hello").unwrap();
        compressed[0] = b'X';
        assert!(matches!(
            decompress(&compressed),
            Err(Error::Format(FormatError::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut compressed = compress(b"hello").unwrap();
        compressed[4] = 99;
        assert!(matches!(
            decompress(&compressed),
            Err(Error::Format(FormatError::UnsupportedVersion { version: 99 }))
        ));
    }

    #[test]
    fn test_crc_detects_corruption() {
        let mut compressed = compress(b"hello world").unwrap();
        let len = compressed.len();
        compressed[len - 2] ^= 0xFF;
        assert!(matches!(
            decompress(&compressed),
            Err(Error::Crc { .. })
        ));
    }

    #[test]
    fn test_file_too_short() {
        assert!(matches!(
            decompress(&[0u8; 5]),
            Err(Error::Format(FormatError::FileTooShort { .. }))
        ));
    }

    #[test]
    fn test_foreign_file_rejected() {
        let not_ours = vec![0x42u8; 64];
        assert!(matches!(
            decompress(&not_ours),
            Err(Error::Format(FormatError::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn test_compression_shrinks_skewed_input() {
        let input = vec![b'X'; 65536];
        let compressed = compress(&input).unwrap();
        assert!(compressed.len() < input.len() / 2);
    }

    #[test]
    fn test_stream_adapters() {
        let input = b"stream me through the pipeline".to_vec();

        let mut compressed = Vec::new();
        let (read, written) =
            compress_stream(&mut std::io::Cursor::new(&input), &mut compressed).unwrap();
        assert_eq!(read, input.len() as u64);
        assert_eq!(written, compressed.len() as u64);

        let mut restored = Vec::new();
        decompress_stream(&mut std::io::Cursor::new(&compressed), &mut restored).unwrap();
        assert_eq!(restored, input);
    }
}
