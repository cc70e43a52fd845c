//! Bit-level I/O over byte-oriented handles.
//!
//! This module provides BitWriter and BitReader for streaming Huffman codes
//! to and from files. Both operate in MSB-first (most significant bit first)
//! order: the first bit written becomes the top bit of the first byte.
//!
//! # Padding Rules
//!
//! - BitWriter: pads the final incomplete byte with trailing zeros and
//!   reports how many pad bits it added (0-7). The caller must record this
//!   pad count in the container header so the reader knows where real data
//!   ends.
//! - BitReader: is constructed with the exact payload byte length and the
//!   recorded pad count. Its logical end of stream is exactly
//!   `8 * payload_bytes - pad_count` bits, independent of how the internal
//!   buffer refills, so lazily buffered chunks never blur the real end.
//!
//! # Example
//! ```
//! use huffzip_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap(); // Write 3 bits: 1, 0, 1
//! writer.write_bits(0b11, 2).unwrap();  // Write 2 bits: 1, 1
//! // Total: 10111 -> padded to 10111000, pad count 3
//!
//! let (bytes, pad) = writer.finish().unwrap();
//! assert_eq!(bytes, vec![0b10111000]);
//! assert_eq!(pad, 3);
//!
//! let mut reader = BitReader::new(std::io::Cursor::new(bytes), 1, pad);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! assert!(reader.is_empty());
//! ```

use crate::error::{BitIoError, Result};
use std::io::{ErrorKind, Read, Write};

/// Size of the internal byte buffers, matching the chunk size used when
/// analyzing input files.
pub const BUFFER_CAPACITY: usize = 4096;

/// Writes bits MSB-first into a byte sink.
///
/// Accumulates bits into a partial byte; completed bytes collect in an
/// internal buffer that is flushed to the sink whenever it fills. `finish`
/// drains everything and reports the pad count.
///
/// # Invariants
/// - `bit_buffer` holds fewer than 8 bits at rest
/// - `bit_count` is always < 8
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying byte sink
    sink: W,
    /// Completed bytes not yet written to the sink
    buffer: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter over the given sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buffer: Vec::with_capacity(BUFFER_CAPACITY),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Write up to 64 bits, MSB-first.
    ///
    /// Only the lowest `count` bits of `value` are used; writing value=0b101
    /// with count=3 writes bits 1, 0, 1 in that order.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `Error::Io` if flushing a full buffer to the sink fails
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        let mut val = if count == 64 { value } else { value & ((1 << count) - 1) };

        while remaining > 0 {
            // How many bits fit in the current partial byte?
            let bits_to_write = remaining.min(8 - self.bit_count as usize);

            // Extract the top bits_to_write bits of val
            let shift = remaining - bits_to_write;
            let bits = ((val >> shift) & ((1 << bits_to_write) - 1)) as u8;

            // Align them with the current position in the partial byte
            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.buffer.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;

                if self.buffer.len() >= BUFFER_CAPACITY {
                    self.flush_buffer()?;
                }
            }

            // Clear the bits just written from val
            val &= (1u64 << shift) - 1;
            remaining -= bits_to_write;
        }

        Ok(())
    }

    /// Finish writing: pad the final partial byte with zeros, drain every
    /// buffered byte to the sink, flush it, and hand the sink back.
    ///
    /// # Returns
    /// The sink and the pad count: the number of unused low bits in the
    /// final byte (0 if the stream ended on a byte boundary).
    pub fn finish(mut self) -> Result<(W, u8)> {
        let pad = if self.bit_count > 0 {
            // Unused low bits are already zero
            self.buffer.push(self.bit_buffer);
            8 - self.bit_count
        } else {
            0
        };

        self.flush_buffer()?;
        self.sink.flush()?;
        Ok((self.sink, pad))
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.sink.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }
}

/// Reads bits MSB-first from a byte source with a known logical length.
///
/// The reader refills its buffer lazily in fixed-size chunks, but end of
/// stream is decided purely by the bit budget `8 * payload_bytes - pad`,
/// never by whether the current buffer happens to be drained.
///
/// # Invariants
/// - `byte_pos <= buf_len`
/// - `bit_offset` is always < 8
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying byte source, positioned at the first payload byte
    source: R,
    /// Read-ahead buffer
    buffer: Vec<u8>,
    /// Valid bytes in `buffer`
    buf_len: usize,
    /// Next byte to consume within `buffer`
    byte_pos: usize,
    /// Next bit within the current byte (0 = MSB)
    bit_offset: u8,
    /// Total data bits in the stream
    total_bits: u64,
    /// Bits consumed so far
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a BitReader over `source`.
    ///
    /// # Arguments
    /// - `payload_bytes`: exact number of payload bytes the source will yield
    /// - `pad_count`: unused bits in the final payload byte (0-7); callers
    ///   validate the recorded value before constructing the reader
    pub fn new(source: R, payload_bytes: u64, pad_count: u8) -> Self {
        debug_assert!(pad_count < 8);
        debug_assert!(payload_bytes > 0 || pad_count == 0);

        Self {
            source,
            buffer: vec![0u8; BUFFER_CAPACITY],
            buf_len: 0,
            byte_pos: 0,
            bit_offset: 0,
            total_bits: payload_bytes * 8 - pad_count as u64,
            bits_read: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// - `BitIoError::UnexpectedEof` if the logical end of stream has been
    ///   reached, or the source ran dry before supplying the promised bytes
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bits_read >= self.total_bits {
            return Err(BitIoError::UnexpectedEof.into());
        }

        if self.byte_pos >= self.buf_len {
            self.refill()?;
        }

        let byte = self.buffer[self.byte_pos];
        let bit = (byte >> (7 - self.bit_offset)) & 1;

        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_pos += 1;
        }
        self.bits_read += 1;

        Ok(bit == 1)
    }

    /// Read up to 64 bits, MSB-first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if fewer than `count` bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if (count as u64) > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        for _ in 0..count {
            result = (result << 1) | self.read_bit()? as u64;
        }
        Ok(result)
    }

    /// Number of data bits left before the logical end of stream.
    pub fn bits_remaining(&self) -> u64 {
        self.total_bits - self.bits_read
    }

    /// Current position in the bit stream (bits consumed so far).
    pub fn position(&self) -> u64 {
        self.bits_read
    }

    /// True once every data bit (excluding padding) has been consumed.
    pub fn is_empty(&self) -> bool {
        self.bits_read >= self.total_bits
    }

    fn refill(&mut self) -> Result<()> {
        self.byte_pos = 0;
        self.buf_len = 0;

        while self.buf_len == 0 {
            match self.source.read(&mut self.buffer) {
                Ok(0) => return Err(BitIoError::UnexpectedEof.into()),
                Ok(n) => self.buf_len = n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b10110011, 8).unwrap();

        let (bytes, pad) = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b10110011]);
        assert_eq!(pad, 0);

        let mut reader = BitReader::new(Cursor::new(bytes), 1, pad);
        assert_eq!(reader.read_bits(8).unwrap(), 0b10110011);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_partial_byte_pad_count() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        // Should be padded to 10000000 with 7 pad bits

        let (bytes, pad) = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b10000000]);
        assert_eq!(pad, 7);
    }

    #[test]
    fn test_pad_zero_on_byte_boundary() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xABCD, 16).unwrap();

        let (bytes, pad) = writer.finish().unwrap();
        assert_eq!(bytes.len(), 2);
        assert_eq!(pad, 0);
    }

    #[test]
    fn test_empty_stream() {
        let writer = BitWriter::new(Vec::new());
        let (bytes, pad) = writer.finish().unwrap();
        assert!(bytes.is_empty());
        assert_eq!(pad, 0);

        let mut reader = BitReader::new(Cursor::new(bytes), 0, 0);
        assert!(reader.is_empty());
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_bit_by_bit() {
        let mut writer = BitWriter::new(Vec::new());
        for &bit in &[true, false, true, true, false, false, true, false] {
            writer.write_bit(bit).unwrap();
        }

        let (bytes, pad) = writer.finish().unwrap();
        assert_eq!(bytes, vec![0b10110010]);

        let mut reader = BitReader::new(Cursor::new(bytes), 1, pad);
        for &expected in &[true, false, true, true, false, false, true, false] {
            assert_eq!(reader.read_bit().unwrap(), expected);
        }
        assert!(reader.is_empty());
    }

    #[test]
    fn test_reader_stops_before_padding() {
        // 5 data bits in one byte: pad count 3
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b10111, 5).unwrap();
        let (bytes, pad) = writer.finish().unwrap();
        assert_eq!(pad, 3);

        let mut reader = BitReader::new(Cursor::new(bytes), 1, pad);
        assert_eq!(reader.bits_remaining(), 5);
        for _ in 0..5 {
            reader.read_bit().unwrap();
        }
        assert!(reader.is_empty());
        // Padding bits must be unreachable
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0b10101010];
        let mut reader = BitReader::new(Cursor::new(data), 1, 0);

        assert_eq!(reader.read_bits(8).unwrap(), 0b10101010);
        assert!(matches!(
            reader.read_bit(),
            Err(crate::Error::BitIo(BitIoError::UnexpectedEof))
        ));
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut writer = BitWriter::new(Vec::new());
        assert!(writer.write_bits(0, 65).is_err());

        let mut reader = BitReader::new(Cursor::new(vec![0u8; 16]), 16, 0);
        assert!(reader.read_bits(65).is_err());
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new(Vec::new());
        let val = 0x123456789ABCDEF0u64;
        writer.write_bits(val, 64).unwrap();

        let (bytes, pad) = writer.finish().unwrap();
        let mut reader = BitReader::new(Cursor::new(bytes), 8, pad);
        assert_eq!(reader.read_bits(64).unwrap(), val);
    }

    #[test]
    fn test_multi_buffer_stream() {
        // Enough bits to force several internal buffer flushes and refills
        let total_bytes = BUFFER_CAPACITY * 2 + 17;
        let mut writer = BitWriter::new(Vec::new());
        for i in 0..total_bytes {
            writer.write_bits((i % 251) as u64, 8).unwrap();
        }

        let (bytes, pad) = writer.finish().unwrap();
        assert_eq!(bytes.len(), total_bytes);
        assert_eq!(pad, 0);

        let mut reader = BitReader::new(Cursor::new(bytes), total_bytes as u64, pad);
        for i in 0..total_bytes {
            assert_eq!(reader.read_bits(8).unwrap(), (i % 251) as u64);
        }
        assert!(reader.is_empty());
    }

    #[test]
    fn test_source_shorter_than_promised() {
        // Promise 4 bytes but supply 2: the reader must error, not loop
        let mut reader = BitReader::new(Cursor::new(vec![0xFF, 0xFF]), 4, 0);
        for _ in 0..16 {
            reader.read_bit().unwrap();
        }
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_position_tracking() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF, 0x00]), 2, 3);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.bits_remaining(), 13);

        reader.read_bits(5).unwrap();
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.bits_remaining(), 8);
    }
}
