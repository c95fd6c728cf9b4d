//! Sparse word-addressed memory store.

/// Address conversion and bounds policy helpers.
pub mod access;

pub use access::{resolve_address, validate_address};

use std::collections::BTreeMap;
use std::fmt;

/// Signed machine word held at every address.
pub type Word = i64;

/// Non-negative index into the memory store.
pub type Address = usize;

/// Sparse memory store where every address never written reads as zero.
///
/// Storage is ordered by address so dumps and iteration are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Memory {
    cells: BTreeMap<Address, Word>,
}

impl Memory {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Builds a store where address `i` holds the `i`-th word.
    #[must_use]
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        words.into_iter().collect()
    }

    /// Reads the word at `address`, or `0` if it was never written.
    #[must_use]
    pub fn get(&self, address: Address) -> Word {
        self.cells.get(&address).copied().unwrap_or(0)
    }

    /// Writes `value` at `address`. Never fails.
    pub fn set(&mut self, address: Address, value: Word) {
        self.cells.insert(address, value);
    }

    /// One past the highest address ever written, `0` when empty.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells
            .last_key_value()
            .map_or(0, |(address, _)| address.saturating_add(1))
    }

    /// Returns true when no address has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates written cells in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (Address, Word)> + '_ {
        self.cells.iter().map(|(address, value)| (*address, *value))
    }
}

impl FromIterator<Word> for Memory {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().enumerate().collect(),
        }
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (address, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{address}: {value}")?;
        }
        f.write_str("}")
    }
}
