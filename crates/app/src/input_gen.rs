//! Sample input generation.
//!
//! When no input file is specified, huffzip compresses a generated sample
//! instead of failing. The sample mixes sections of very different symbol
//! distributions so the compression ratio in the report is informative:
//! long single-byte runs compress hard, skewed text compresses moderately,
//! and uniform random bytes do not compress at all.
//!
//! All randomness comes from a seeded ChaCha8 RNG, so a printed seed is
//! enough to regenerate the identical sample.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::Path;

/// Bytes per generated section before the distribution changes.
const SECTION_BYTES: usize = 2048;

/// Generate `size_bytes` of sample data with mixed compressibility.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(SECTION_BYTES);

        match rng.gen_range(0..6u8) {
            // Runs of one byte value
            0 | 1 => {
                let value: u8 = rng.gen();
                data.extend(std::iter::repeat(value).take(section));
            }

            // Skewed text: min of two uniform draws biases toward the
            // front of the alphabet
            2 | 3 => {
                let alphabet = b" etaoinshrdlucmfwypvbgkjqxz.,\n";
                for _ in 0..section {
                    let a = rng.gen_range(0..alphabet.len());
                    let b = rng.gen_range(0..alphabet.len());
                    data.push(alphabet[a.min(b)]);
                }
            }

            // Short repeating pattern
            4 => {
                let pattern: Vec<u8> = (0..rng.gen_range(3..=24)).map(|_| rng.gen()).collect();
                for i in 0..section {
                    data.push(pattern[i % pattern.len()]);
                }
            }

            // Uniform random bytes
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
        for size in [0, 1, 100, SECTION_BYTES, SECTION_BYTES + 1, 100_000] {
            let data = generate_sample_data(7, size);
            assert_eq!(data.len(), size);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        let first = generate_sample_data(12345, 50_000);
        let second = generate_sample_data(12345, 50_000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let first = generate_sample_data(1, 10_000);
        let second = generate_sample_data(2, 10_000);
        assert_ne!(first, second);
    }
}
