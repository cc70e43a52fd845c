//! End-to-end compression and decompression pipelines.
//!
//! # Container Format
//!
//! ```text
//! +-------------------+
//! | pad_count (1)     |  unused bits in the final payload byte (0-7)
//! +-------------------+
//! | table_size (8)    |  u64 little-endian, distinct byte values
//! +-------------------+
//! | table entries     |  table_size x (1 byte value + 8 bytes LE count)
//! +-------------------+
//! | payload           |  bit-packed Huffman codes, MSB-first
//! | (variable)        |
//! +-------------------+
//! ```
//!
//! No magic number, no version field, no checksum; the format is
//! self-describing only through its fixed-offset layout.
//!
//! # Pad Fixup
//!
//! The pad count is unknowable until the last payload bit is written, yet
//! the reader must learn it before consuming the payload. Compression
//! therefore writes a zero placeholder at offset 0, streams the payload,
//! then seeks back and patches the true value.
//!
//! # Two-Pass Encode
//!
//! The input is read twice: once to count frequencies, once to emit code
//! words. The file must stay stable between the passes; a byte appearing in
//! pass two that pass one never saw surfaces as `UnmappedSymbol` rather
//! than silently corrupting the stream.

use crate::bitio::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::error::{Error, HeaderError, HuffmanError, Result};
use crate::freq::FrequencyTable;
use crate::tree::{HuffmanNode, HuffmanTree};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Chunk size for the encode pass over the input.
const READ_CHUNK: usize = 4096;

/// Summary of one compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressReport {
    /// Bytes read from the input file
    pub input_bytes: u64,

    /// Bytes written to the container (header + payload)
    pub output_bytes: u64,

    /// Distinct byte values in the input
    pub distinct_symbols: usize,

    /// Zero bits appended to the final payload byte
    pub pad_bits: u8,
}

impl CompressReport {
    /// Compression ratio (output / input). 0.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Summary of one decompression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressReport {
    /// Bytes read from the container
    pub input_bytes: u64,

    /// Bytes restored to the output file
    pub output_bytes: u64,

    /// Distinct byte values declared by the header
    pub distinct_symbols: usize,
}

/// Compress `input` into a container file at `output`.
///
/// Pipeline: analyze -> build tree -> write header -> build code table ->
/// encode -> patch pad count.
///
/// # Errors
/// - `Error::InputOpen` / `Error::OutputOpen` for unopenable paths
/// - `HuffmanError::UnmappedSymbol` if the input changed between passes
/// - `Error::Io` for underlying read/write failures
pub fn compress(input: &Path, output: &Path) -> Result<CompressReport> {
    // Pass one: frequency analysis
    let fin = open_input(input)?;
    let table = FrequencyTable::analyze(BufReader::new(fin))?;

    let mut fout = File::create(output).map_err(|e| Error::OutputOpen {
        path: output.to_path_buf(),
        source: e,
    })?;

    // Placeholder pad byte, patched once the payload length is known
    fout.write_all(&[0u8])?;
    let header = table.serialize();
    fout.write_all(&header)?;
    let header_len = 1 + header.len() as u64;

    let tree = match HuffmanTree::from_frequencies(&table) {
        Some(tree) => tree,
        None => {
            // Zero-length input: empty table, no payload, pad stays 0
            fout.flush()?;
            return Ok(CompressReport {
                input_bytes: 0,
                output_bytes: header_len,
                distinct_symbols: 0,
                pad_bits: 0,
            });
        }
    };
    let codes = CodeTable::from_tree(&tree)?;

    // Pass two: re-read the input, stream code words into the container
    let mut fin = open_input(input)?;
    let mut writer = BitWriter::new(fout);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match fin.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        for &byte in &chunk[..n] {
            let code = codes
                .code(byte)
                .ok_or(HuffmanError::UnmappedSymbol(byte))?;
            writer.write_bits(code.bits, code.len as usize)?;
        }
    }

    let (mut fout, pad) = writer.finish()?;

    // Patch the placeholder with the real pad count
    fout.seek(SeekFrom::Start(0))?;
    fout.write_all(&[pad])?;
    fout.flush()?;
    let output_bytes = fout.seek(SeekFrom::End(0))?;

    Ok(CompressReport {
        input_bytes: table.total(),
        output_bytes,
        distinct_symbols: table.distinct(),
        pad_bits: pad,
    })
}

/// Decompress a container file at `input` into `output`.
///
/// Pipeline: read pad count and frequency table -> rebuild tree -> decode.
///
/// # Errors
/// - `Error::InputOpen` / `Error::OutputOpen` for unopenable paths
/// - `Error::Header` for a malformed header (bad pad count, truncated or
///   oversized table, duplicate symbols)
/// - `HuffmanError::StreamCorruption` if the payload ends mid-code-word
pub fn decompress(input: &Path, output: &Path) -> Result<DecompressReport> {
    let fin = open_input(input)?;
    let total_len = fin.metadata()?.len();
    let mut reader = BufReader::new(fin);

    let mut pad_byte = [0u8; 1];
    if let Err(e) = reader.read_exact(&mut pad_byte) {
        return Err(if e.kind() == ErrorKind::UnexpectedEof {
            HeaderError::Truncated {
                required: 1,
                actual: 0,
            }
            .into()
        } else {
            e.into()
        });
    }
    let pad = pad_byte[0];
    if pad > 7 {
        return Err(HeaderError::InvalidPadCount(pad).into());
    }

    let table = FrequencyTable::read_from(&mut reader)?;
    let header_len = 1 + table.serialized_len() as u64;
    let payload_bytes = total_len - header_len;
    if payload_bytes == 0 && pad != 0 {
        return Err(HeaderError::PadWithoutPayload(pad).into());
    }

    let fout = File::create(output).map_err(|e| Error::OutputOpen {
        path: output.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(fout);

    let tree = match HuffmanTree::from_frequencies(&table) {
        Some(tree) => tree,
        None => {
            // Empty table: the original input was zero-length
            writer.flush()?;
            return Ok(DecompressReport {
                input_bytes: total_len,
                output_bytes: 0,
                distinct_symbols: 0,
            });
        }
    };

    let output_bytes = match tree.root() {
        // A lone leaf encodes zero bits per symbol: bit-driven traversal
        // would never consume anything, so emit the one known value exactly
        // as many times as it occurred.
        HuffmanNode::Leaf { value, weight } => {
            emit_repeated(&mut writer, *value, *weight)?;
            *weight
        }
        HuffmanNode::Internal { .. } => {
            let produced =
                decode_payload(&tree, BitReader::new(reader, payload_bytes, pad), &mut writer)?;

            // The header's counts say exactly how many symbols the payload
            // holds; a clean-looking shortfall means the payload was cut at
            // a code-word boundary.
            if produced != table.total() {
                return Err(HuffmanError::LengthMismatch {
                    expected: table.total(),
                    actual: produced,
                }
                .into());
            }
            produced
        }
    };

    writer.flush()?;

    Ok(DecompressReport {
        input_bytes: total_len,
        output_bytes,
        distinct_symbols: table.distinct(),
    })
}

/// Bit-driven decode loop: walk the tree from the root once per symbol.
///
/// A descent only starts while data bits remain; running dry in the middle
/// of one means the payload was truncated or garbled, which is corruption
/// rather than a legitimate end of stream.
fn decode_payload<R: Read, W: Write>(
    tree: &HuffmanTree,
    mut bits: BitReader<R>,
    writer: &mut W,
) -> Result<u64> {
    let mut produced = 0u64;

    while !bits.is_empty() {
        let mut node = tree.root();
        loop {
            match node {
                HuffmanNode::Leaf { value, .. } => {
                    writer.write_all(&[*value])?;
                    produced += 1;
                    break;
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if bits.is_empty() {
                        return Err(HuffmanError::StreamCorruption {
                            bit_position: bits.position(),
                        }
                        .into());
                    }
                    node = if bits.read_bit()? { right.as_ref() } else { left.as_ref() };
                }
            }
        }
    }

    Ok(produced)
}

/// Emit `count` copies of `value` in buffer-sized chunks.
fn emit_repeated<W: Write>(writer: &mut W, value: u8, count: u64) -> Result<()> {
    let chunk = [value; READ_CHUNK];
    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(READ_CHUNK as u64) as usize;
        writer.write_all(&chunk[..n])?;
        remaining -= n as u64;
    }
    Ok(())
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::InputOpen {
        path: path.to_path_buf(),
        source: e,
    })
}
