//! Precomputed value -> code-word lookup.
//!
//! Encoding with the tree alone would cost a full pre-order search per input
//! byte; the code table is derived once by a single traversal (append 0 on
//! left descent, 1 on right descent, record the accumulated path at each
//! leaf) and then every input byte is a map lookup.
//!
//! Code words are prefix-free by construction: leaves terminate paths, so no
//! recorded path can continue into another.

use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanNode, HuffmanTree};
use std::collections::BTreeMap;

/// A packed code word: the low `len` bits of `bits`, written MSB-first.
///
/// `len` may be 0: the lone value of a single-leaf tree has the empty
/// path, and encoding it emits no bits at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Path bits, right-aligned
    pub bits: u64,
    /// Path length in bits (0-64)
    pub len: u8,
}

impl Code {
    /// True if `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len == 0 {
            // The empty path prefixes everything
            return true;
        }
        self.len <= other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

/// Mapping from byte value to its Huffman code word.
///
/// Exactly one entry per leaf of the tree it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Derive the table from a tree in one traversal.
    ///
    /// # Errors
    /// `HuffmanError::CodeTooLong` if any path exceeds the 64 bits a packed
    /// code can hold (forcing depth 65 takes a weight distribution totaling
    /// more than 10 TB of input).
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        fn walk(
            node: &HuffmanNode,
            bits: u64,
            len: usize,
            codes: &mut BTreeMap<u8, Code>,
        ) -> Result<()> {
            match node {
                HuffmanNode::Leaf { value, .. } => {
                    codes.insert(*value, Code { bits, len: len as u8 });
                    Ok(())
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if len == 64 {
                        return Err(HuffmanError::CodeTooLong { length: len + 1 }.into());
                    }
                    walk(left, bits << 1, len + 1, codes)?;
                    walk(right, (bits << 1) | 1, len + 1, codes)
                }
            }
        }

        let mut codes = BTreeMap::new();
        walk(tree.root(), 0, 0, &mut codes)?;
        Ok(Self { codes })
    }

    /// Code word for `value`, if the tree had a leaf for it.
    pub fn code(&self, value: u8) -> Option<Code> {
        self.codes.get(&value).copied()
    }

    /// Number of entries (one per leaf).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True only for a table built from nothing, which cannot happen via
    /// `from_tree`; present for completeness of the container API.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over (value, code) pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().map(|(&value, &code)| (value, code))
    }
}
