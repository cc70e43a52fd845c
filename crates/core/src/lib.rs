//! huffzip-core: classic-Huffman file compression codec
//!
//! This library compresses a byte stream by building a prefix-free binary
//! code from its symbol frequencies, and reverses the process from the
//! statistics stored in the container header:
//! - Compress: analyze frequencies, build the code tree, write the header,
//!   stream bit-packed code words, patch the pad count
//! - Decompress: read the header, rebuild the identical tree, walk it one
//!   bit at a time back to the original bytes
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitio`: Low-level bit reading/writing over byte handles
//! - `freq`: Frequency analysis and the table header format
//! - `tree`: Huffman tree construction and traversal
//! - `code`: Precomputed value -> code-word lookup
//! - `codec`: End-to-end compress/decompress pipelines
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Bounded memory**: Both pipelines stream through fixed-size buffers;
//!   only the 256-entry table and its tree are held in memory
//! - **Deterministic**: The same input always produces the same container
//! - **Strict framing**: The decoder knows exactly where data bits end and
//!   padding begins, and reports corruption instead of guessing

pub mod bitio;
pub mod code;
pub mod codec;
pub mod error;
pub mod freq;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, decompress, CompressReport, DecompressReport};
pub use error::{Error, Result};
