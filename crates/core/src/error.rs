//! Error types for the huffzip codec.
//!
//! All operations return structured errors rather than panicking.
//! Failures propagate to the immediate caller of `compress`/`decompress`;
//! there is no retry logic and no partial-result recovery (a failed run
//! leaves whatever partial output was written on disk).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all operations in the codec.
///
/// Each variant corresponds to a specific failure domain:
/// - Input/output open: a file path could not be opened for the pipeline
/// - Header: the container header is malformed
/// - Huffman: code construction or decode failures
/// - Bit I/O: reading/writing bits from/to byte streams
/// - I/O: opaque read/write failures from the underlying file handles
#[derive(Debug, Error)]
pub enum Error {
    /// Source file missing or unreadable
    #[error("cannot open input {path:?}: {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination file cannot be created or written
    #[error("cannot open output {path:?}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Container header is inconsistent with the available bytes
    #[error("malformed header: {0}")]
    Header(#[from] HeaderError),

    /// Huffman code construction or decode failure
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Bit-level I/O error (e.g., reading past the logical end of stream)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Container header errors.
///
/// The header layout is fixed-offset: one pad byte, an 8-byte table size,
/// then `table size` pairs of (value, 8-byte count). Every field is
/// validated on read; the format carries no magic number or checksum.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Header ended before the declared table was complete
    #[error("truncated header: need {required} bytes, got {actual}")]
    Truncated { required: usize, actual: usize },

    /// Declared table size exceeds the 256 possible byte values
    #[error("table size {0} exceeds 256 distinct byte values")]
    TableTooLarge(u64),

    /// The same byte value appeared twice in the table
    #[error("duplicate symbol {0:#04x} in frequency table")]
    DuplicateSymbol(u8),

    /// Pad count must fit within the final byte
    #[error("pad count {0} outside valid range 0-7")]
    InvalidPadCount(u8),

    /// A non-zero pad count requires at least one payload byte
    #[error("pad count {0} recorded for an empty payload")]
    PadWithoutPayload(u8),
}

/// Huffman codec errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The bit stream ended in the middle of a code word
    #[error("stream corruption: bits exhausted mid-symbol at bit {bit_position}")]
    StreamCorruption { bit_position: u64 },

    /// Decoded output length disagrees with the header's frequency counts
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// A code path exceeded the 64 bits a packed code can hold
    #[error("code length {length} exceeds maximum 64")]
    CodeTooLong { length: usize },

    /// A byte seen during encoding has no entry in the code table
    /// (input changed between the analyze and encode passes)
    #[error("symbol {0:#04x} missing from code table")]
    UnmappedSymbol(u8),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the logical end of the bit stream
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits requested at once)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
