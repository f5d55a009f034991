use crate::errors::CipherError;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A permutation of `1..=n`; `n` is the block length of the transposition cipher.
///
/// External format is `"(1, 2, 3)"`: parenthesized, comma-space separated,
/// 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationKey {
    permutation: Vec<usize>,
}

impl PermutationKey {
    /// # Errors
    ///
    /// `CipherError::InvalidKeyValue` when `permutation` is empty, contains a
    /// value outside `1..=n` or contains a value twice.
    pub fn new(permutation: Vec<usize>) -> Result<Self, CipherError> {
        let key = Self { permutation };
        key.validate()?;

        Ok(key)
    }

    /// 1-based permutation values.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn block_size(&self) -> usize {
        self.permutation.len()
    }

    /// 0-based inverse: `inverse[permutation[i] - 1] = i`.
    pub fn inverse(&self) -> Vec<usize> {
        let mut inverse = vec![0; self.permutation.len()];
        for (i, &target) in self.permutation.iter().enumerate() {
            inverse[target - 1] = i;
        }
        inverse
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        let n = self.permutation.len();
        if n == 0 {
            return Err(CipherError::InvalidKeyValue(
                "Permutation must not be empty".to_string(),
            ));
        }

        if let Some(&out_of_range) = self.permutation.iter().find(|&&v| v == 0 || v > n) {
            return Err(CipherError::InvalidKeyValue(format!(
                "Permutation value {} is outside 1..={}",
                out_of_range, n
            )));
        }

        if let Some(duplicate) = self.permutation.iter().duplicates().next() {
            return Err(CipherError::InvalidKeyValue(format!(
                "Permutation value {} appears more than once",
                duplicate
            )));
        }

        Ok(())
    }
}

impl fmt::Display for PermutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.permutation.iter().join(", "))
    }
}

impl FromStr for PermutationKey {
    type Err = CipherError;

    /// Parses `"(3, 1, 2)"`. Whitespace around the values is tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| {
                CipherError::InvalidKeyFormat(format!(
                    "Permutation must be written as \"(1, 2, ...)\", got {:?}",
                    s
                ))
            })?;

        if inner.trim().is_empty() {
            return Err(CipherError::InvalidKeyValue(
                "Permutation must not be empty".to_string(),
            ));
        }

        let permutation = inner
            .split(',')
            .map(|part| {
                part.trim().parse::<usize>().map_err(|e| {
                    CipherError::InvalidKeyFormat(format!(
                        "Invalid permutation entry {:?}: {}",
                        part.trim(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        PermutationKey::new(permutation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() -> Result<(), CipherError> {
        let key: PermutationKey = "(3, 1, 4, 5, 2)".parse()?;
        assert_eq!(key.permutation(), &[3, 1, 4, 5, 2]);
        assert_eq!(key.block_size(), 5);
        assert_eq!(key.to_string(), "(3, 1, 4, 5, 2)");

        let tight: PermutationKey = "(2,1)".parse()?;
        assert_eq!(tight.to_string(), "(2, 1)");
        Ok(())
    }

    #[test]
    fn test_inverse() -> Result<(), CipherError> {
        let key = PermutationKey::new(vec![3, 1, 4, 5, 2])?;
        assert_eq!(key.inverse(), vec![1, 4, 0, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_malformed_text_is_format_error() {
        for text in ["3, 1, 2", "(3, 1, 2", "(3; 1; 2)", "(a, b)", "(1, , 2)"] {
            assert!(
                matches!(
                    text.parse::<PermutationKey>(),
                    Err(CipherError::InvalidKeyFormat(_))
                ),
                "{:?} should be a format error",
                text
            );
        }
    }

    #[test]
    fn test_non_permutation_is_value_error() {
        for text in ["()", "(1, 1)", "(0, 1)", "(1, 3)"] {
            assert!(
                matches!(
                    text.parse::<PermutationKey>(),
                    Err(CipherError::InvalidKeyValue(_))
                ),
                "{:?} should be a value error",
                text
            );
        }
    }
}
