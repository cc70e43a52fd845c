//! Byte frequency analysis and the frequency-table header format.
//!
//! The table maps each byte value present in the input to its occurrence
//! count, and is the statistic from which the Huffman tree is rebuilt on
//! both sides. It serializes into the container header as:
//!
//! ```text
//! +-------------------+
//! | table_size (8)    |  u64 little-endian, number of distinct values
//! +-------------------+
//! | value (1)         |  raw byte value        \
//! +-------------------+                         | repeated table_size
//! | count (8)         |  u64 little-endian     /  times, ascending value
//! +-------------------+
//! ```
//!
//! Entries are emitted in ascending byte-value order for determinism. The
//! header itself is not compressed.

use crate::error::{HeaderError, Result};
use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};

/// Chunk size for streaming input analysis.
const READ_CHUNK: usize = 4096;

/// Bytes per serialized table entry: 1 value byte + 8 count bytes.
const ENTRY_SIZE: usize = 9;

/// Occurrence counts for every byte value present in an input.
///
/// Immutable after construction. The sum of all counts equals the input
/// length in bytes; the table is empty only for a zero-length input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Ascending-by-value counts; only values that occur appear
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    /// Build a table by streaming the entire input once.
    ///
    /// # Errors
    /// Propagates read failures from the source; the caller maps the initial
    /// open failure to `Error::InputOpen`.
    pub fn analyze<R: Read>(mut reader: R) -> Result<Self> {
        let mut counts = BTreeMap::new();
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            for &byte in &chunk[..n] {
                *counts.entry(byte).or_insert(0) += 1;
            }
        }

        Ok(Self { counts })
    }

    /// Build a table from an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = BTreeMap::new();
        for &byte in data {
            *counts.entry(byte).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrence count for `value` (0 if absent).
    pub fn count(&self, value: u8) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Sum of all counts, i.e. the analyzed input length in bytes.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct byte values.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True for the zero-length-input degenerate case.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (value, count) pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&value, &count)| (value, count))
    }

    /// Serialize into the container header layout.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.counts.len() * ENTRY_SIZE);

        bytes.extend_from_slice(&(self.counts.len() as u64).to_le_bytes());
        for (&value, &count) in &self.counts {
            bytes.push(value);
            bytes.extend_from_slice(&count.to_le_bytes());
        }

        bytes
    }

    /// Read a serialized table from a byte source.
    ///
    /// # Errors
    /// - `HeaderError::TableTooLarge` if the declared size exceeds 256
    /// - `HeaderError::Truncated` if the source ends mid-table
    /// - `HeaderError::DuplicateSymbol` if a value appears twice
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut size_bytes = [0u8; 8];
        let got = read_fully(reader, &mut size_bytes)?;
        if got < size_bytes.len() {
            return Err(HeaderError::Truncated {
                required: size_bytes.len(),
                actual: got,
            }
            .into());
        }

        let table_size = u64::from_le_bytes(size_bytes);
        if table_size > 256 {
            return Err(HeaderError::TableTooLarge(table_size).into());
        }

        let required = table_size as usize * ENTRY_SIZE;
        let mut entries = vec![0u8; required];
        let got = read_fully(reader, &mut entries)?;
        if got < required {
            return Err(HeaderError::Truncated {
                required,
                actual: got,
            }
            .into());
        }

        let mut counts = BTreeMap::new();
        for entry in entries.chunks_exact(ENTRY_SIZE) {
            let value = entry[0];
            let count = u64::from_le_bytes(entry[1..ENTRY_SIZE].try_into().unwrap());

            if counts.insert(value, count).is_some() {
                return Err(HeaderError::DuplicateSymbol(value).into());
            }
        }

        Ok(Self { counts })
    }

    /// Serialized header size in bytes for this table.
    pub fn serialized_len(&self) -> usize {
        8 + self.counts.len() * ENTRY_SIZE
    }

    /// Human-readable dump of the table, one value per line.
    ///
    /// Diagnostic only; has no effect on codec behavior.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (&value, &count) in &self.counts {
            let shown = if value.is_ascii_graphic() {
                value as char
            } else {
                '.'
            };
            out.push_str(&format!("{value:#04x} {shown}  {count}\n"));
        }
        out
    }
}

/// Read until `buf` is full or the source is exhausted; returns bytes read.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn test_analyze_counts() {
        let table = FrequencyTable::from_bytes(b"abracadabra");

        assert_eq!(table.count(b'a'), 5);
        assert_eq!(table.count(b'b'), 2);
        assert_eq!(table.count(b'r'), 2);
        assert_eq!(table.count(b'c'), 1);
        assert_eq!(table.count(b'd'), 1);
        assert_eq!(table.count(b'z'), 0);
        assert_eq!(table.distinct(), 5);
    }

    #[test]
    fn test_total_equals_input_length() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let table = FrequencyTable::from_bytes(data);
        assert_eq!(table.total(), data.len() as u64);
    }

    #[test]
    fn test_analyze_streaming_matches_slice() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let streamed = FrequencyTable::analyze(Cursor::new(&data)).unwrap();
        let sliced = FrequencyTable::from_bytes(&data);
        assert_eq!(streamed, sliced);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.serialize(), vec![0u8; 8]);
    }

    #[test]
    fn test_serialize_round_trip() {
        let table = FrequencyTable::from_bytes(b"hello world");
        let bytes = table.serialize();
        assert_eq!(bytes.len(), table.serialized_len());

        let restored = FrequencyTable::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_iter_ascending_order() {
        let table = FrequencyTable::from_bytes(&[200, 3, 90, 3, 200, 7]);
        let values: Vec<u8> = table.iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec![3, 7, 90, 200]);
    }

    #[test]
    fn test_truncated_table() {
        let table = FrequencyTable::from_bytes(b"abc");
        let mut bytes = table.serialize();
        bytes.truncate(bytes.len() - 4);

        let result = FrequencyTable::read_from(&mut Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(Error::Header(HeaderError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_truncated_size_field() {
        let result = FrequencyTable::read_from(&mut Cursor::new(vec![1u8, 0, 0]));
        assert!(matches!(
            result,
            Err(Error::Header(HeaderError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_table_too_large() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&300u64.to_le_bytes());

        let result = FrequencyTable::read_from(&mut Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(Error::Header(HeaderError::TableTooLarge(300)))
        ));
    }

    #[test]
    fn test_duplicate_symbol() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2u64.to_le_bytes());
        bytes.push(b'x');
        bytes.extend_from_slice(&1u64.to_le_bytes());
        bytes.push(b'x');
        bytes.extend_from_slice(&2u64.to_le_bytes());

        let result = FrequencyTable::read_from(&mut Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(Error::Header(HeaderError::DuplicateSymbol(b'x')))
        ));
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        let table = FrequencyTable::from_bytes(&data);
        assert_eq!(table.distinct(), 256);

        let bytes = table.serialize();
        let restored = FrequencyTable::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_render_lists_every_symbol() {
        let table = FrequencyTable::from_bytes(b"aab\x00");
        let dump = table.render();
        assert_eq!(dump.lines().count(), 3);
        assert!(dump.contains("0x61 a  2"));
        assert!(dump.contains("0x00 .  1"));
    }
}
