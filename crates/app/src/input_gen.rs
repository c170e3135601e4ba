//! Sample input generation for the `generate` mode.
//!
//! Huffman compression behaves very differently on skewed and uniform
//! byte distributions, so generated samples mix section types:
//! - long runs of one byte (near-best case)
//! - text-like data over a small alphabet (typical case)
//! - short repeating patterns (moderate skew)
//! - uniform random bytes (near-worst case)
//!
//! Generation is seeded, so a sample can be regenerated exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::Path;

/// Section size the generator works in.
const SECTION_BYTES: usize = 4096;

/// Generate `size_bytes` of sample data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = SECTION_BYTES.min(size_bytes - data.len());

        match rng.gen_range(0..10u8) {
            // 40% runs of a single byte
            0..=3 => {
                let value: u8 = rng.gen();
                data.extend(std::iter::repeat(value).take(section));
            }

            // 30% text-like data over a small alphabet
            4..=6 => {
                let alphabet = b"etaoin shrdlu cmfwyp,.\n";
                for _ in 0..section {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }

            // 20% short repeating patterns
            7..=8 => {
                let pattern: Vec<u8> = (0..rng.gen_range(3..=24)).map(|_| rng.gen()).collect();
                for pos in 0..section {
                    data.push(pattern[pos % pattern.len()]);
                }
            }

            // 10% uniform random bytes
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}

/// Generate sample data and write it to `path`.
pub fn write_sample_file(path: &Path, seed: u64, size_bytes: usize) -> std::io::Result<()> {
    let data = generate_sample_data(seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size() {
        for size in [0, 1, 100, SECTION_BYTES - 1, SECTION_BYTES + 1, 100_000] {
            assert_eq!(generate_sample_data(7, size).len(), size);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        assert_eq!(
            generate_sample_data(321, 20_000),
            generate_sample_data(321, 20_000)
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(
            generate_sample_data(1, 10_000),
            generate_sample_data(2, 10_000)
        );
    }

    #[test]
    fn test_sample_round_trips() {
        let data = generate_sample_data(99, 50_000);
        let compressed = spraypaint_core::compress(&data).unwrap();
        assert_eq!(spraypaint_core::decompress(&compressed).unwrap(), data);
    }
}
