//! Bit-level packing and unpacking.
//!
//! Codewords are a logical sequence of bits; storage is byte-aligned. Both
//! directions work MSB-first: bit `i` of the sequence maps to bit position
//! `7 - i` of its byte.
//!
//! # Padding
//!
//! When the sequence does not end on a byte boundary, the writer zero-fills
//! the low-order positions of the last byte and reports a pad count (0-7):
//! the number of zero-filled bits. The container stores that count in its
//! trailer byte, and the reader uses it to stop exactly at the last real
//! bit — the padding bits are never handed to the decoder.

use crate::code::Code;
use crate::error::{FormatError, Result};

/// Accumulates bits MSB-first and flushes complete bytes.
///
/// # Invariants
/// - `bit_buffer` holds fewer than 8 bits, MSB-aligned
/// - `bit_count` is always < 8
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_buffer: u8,
    bit_count: u8,
}

impl BitWriter {
    /// Create a writer with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append every bit of a codeword, root-first.
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.iter() {
            self.push_bit(bit);
        }
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Finish writing and return `(bytes, pad_count)`.
    ///
    /// A partial final byte is zero-padded; `pad_count` is the number of
    /// padding bits (0 when the stream ended exactly on a byte boundary).
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        if self.bit_count == 0 {
            return (self.bytes, 0);
        }
        let pad = 8 - self.bit_count;
        self.bytes.push(self.bit_buffer);
        (self.bytes, pad)
    }
}

/// Reads bits MSB-first, honoring the pad count of the final byte.
///
/// Yields exactly `data.len() * 8 - pad_count` bits; any read past that is
/// a `TruncatedStream` error (the stream ended mid-codeword).
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_position: usize,
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `data` whose last byte has `pad_count` padding
    /// bits.
    ///
    /// # Errors
    /// `FormatError::InvalidPadCount` if `pad_count > 7`, or if the data
    /// region is empty while claiming nonzero padding.
    pub fn new(data: &'a [u8], pad_count: u8) -> Result<Self> {
        if pad_count > 7 || (data.is_empty() && pad_count > 0) {
            return Err(FormatError::InvalidPadCount { pad: pad_count }.into());
        }
        Ok(Self {
            data,
            bit_position: 0,
            bit_len: data.len() * 8 - pad_count as usize,
        })
    }

    /// Number of data bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    /// True once every data bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }

    /// Read the next bit.
    ///
    /// # Errors
    /// `FormatError::TruncatedStream` if only padding (or nothing) remains.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_position >= self.bit_len {
            return Err(FormatError::TruncatedStream.into());
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1;
        self.bit_position += 1;
        Ok(bit == 1)
    }
}
