//! # Alphabet Module
//!
//! An [`Alphabet`] is the ordered symbol space of a classical cipher. Its size is
//! the modulus `m` that every index computation is reduced by.

use crate::errors::CipherError;
use crate::ring::Ring;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Ordered, duplicate-free set of at least two characters.
///
/// Immutable once constructed; both lookup directions are O(1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
    positions: HashMap<char, usize>,
    ring: Ring,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `symbols`, in order.
    ///
    /// # Errors
    ///
    /// `CipherError::InvalidAlphabet` if a character repeats or fewer than two
    /// characters are given.
    ///
    /// # Example
    ///
    /// ```
    /// # use cipher_engine::alphabet::Alphabet;
    /// let alphabet = Alphabet::new("ABC").unwrap();
    /// assert_eq!(alphabet.size(), 3);
    /// assert!(Alphabet::new("ABA").is_err());
    /// assert!(Alphabet::new("A").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self, CipherError> {
        Self::try_from_chars(symbols.chars().collect())
    }

    pub fn try_from_chars(symbols: Vec<char>) -> Result<Self, CipherError> {
        if let Some(duplicate) = symbols.iter().duplicates().next() {
            return Err(CipherError::InvalidAlphabet(format!(
                "Character '{}' appears more than once",
                duplicate
            )));
        }

        if symbols.len() < 2 {
            return Err(CipherError::InvalidAlphabet(format!(
                "Alphabet needs at least 2 symbols, got {}",
                symbols.len()
            )));
        }

        let ring = Ring::try_with(symbols.len() as u64)?;
        let positions = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        Ok(Self {
            symbols,
            positions,
            ring,
        })
    }

    /// Number of symbols, i.e. the modulus `m`.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// The ring Z_m matching this alphabet's size.
    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.positions.contains_key(&symbol)
    }

    /// Position of `symbol`, or `None` when it is not part of the alphabet.
    pub fn position(&self, symbol: char) -> Option<usize> {
        self.positions.get(&symbol).copied()
    }

    /// Position of `symbol`.
    ///
    /// # Errors
    ///
    /// `CipherError::InvalidSymbol` when `symbol` is not part of the alphabet.
    pub fn index_of(&self, symbol: char) -> Result<usize, CipherError> {
        self.position(symbol)
            .ok_or(CipherError::InvalidSymbol(symbol))
    }

    /// Character at `index`.
    ///
    /// # Errors
    ///
    /// `CipherError::IndexOutOfRange` when `index >= size()`.
    pub fn char_at(&self, index: usize) -> Result<char, CipherError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(CipherError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols.iter().collect::<String>())
    }
}

impl FromStr for Alphabet {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::new(s)
    }
}

impl TryFrom<String> for Alphabet {
    type Error = CipherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Alphabet::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.to_string()
    }
}
