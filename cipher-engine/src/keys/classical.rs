//! Keys of the arithmetic ciphers: shift, affine, multiplicative and Vigenère.
//!
//! Every key records the [`Ring`] (alphabet size) it was validated against.

use crate::alphabet::Alphabet;
use crate::errors::CipherError;
use crate::ring::{Ring, gcd};

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftKey {
    shift: i64,
    ring: Ring,
}

impl ShiftKey {
    /// Any shift is valid; it is canonicalized into `[0, m)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use cipher_engine::keys::ShiftKey;
    /// # use cipher_engine::preset::LATIN_UPPERCASE;
    /// assert_eq!(ShiftKey::new(29, &LATIN_UPPERCASE).shift(), 3);
    /// assert_eq!(ShiftKey::new(-1, &LATIN_UPPERCASE).shift(), 25);
    /// ```
    pub fn new(shift: i64, alphabet: &Alphabet) -> Self {
        let ring = alphabet.ring();
        Self {
            shift: ring.normalize(shift),
            ring,
        }
    }

    pub fn shift(&self) -> i64 {
        self.shift
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        check_canonical("shift", self.shift, &self.ring)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffineKey {
    factor: i64,
    offset: i64,
    ring: Ring,
}

impl AffineKey {
    /// # Errors
    ///
    /// `CipherError::InvalidKeyValue` when `gcd(factor, m) != 1`.
    pub fn new(factor: i64, offset: i64, alphabet: &Alphabet) -> Result<Self, CipherError> {
        let ring = alphabet.ring();
        let key = Self {
            factor: ring.normalize(factor),
            offset: ring.normalize(offset),
            ring,
        };
        key.validate()?;

        Ok(key)
    }

    pub fn factor(&self) -> i64 {
        self.factor
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        check_canonical("offset", self.offset, &self.ring)?;
        check_coprime(self.factor, &self.ring)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplicativeKey {
    factor: i64,
    ring: Ring,
}

impl MultiplicativeKey {
    /// # Errors
    ///
    /// `CipherError::InvalidKeyValue` when `gcd(factor, m) != 1`.
    pub fn new(factor: i64, alphabet: &Alphabet) -> Result<Self, CipherError> {
        let ring = alphabet.ring();
        let key = Self {
            factor: ring.normalize(factor),
            ring,
        };
        key.validate()?;

        Ok(key)
    }

    pub fn factor(&self) -> i64 {
        self.factor
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        check_coprime(self.factor, &self.ring)
    }
}

/// Non-empty keyword over an alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VigenereKey {
    keyword: String,
    alphabet: Alphabet,
}

impl VigenereKey {
    /// # Errors
    ///
    /// * `CipherError::InvalidKeyValue` for an empty keyword.
    /// * `CipherError::InvalidSymbol` for a keyword character outside `alphabet`.
    pub fn new(keyword: &str, alphabet: &Alphabet) -> Result<Self, CipherError> {
        let key = Self {
            keyword: keyword.to_string(),
            alphabet: alphabet.clone(),
        };
        key.validate()?;

        Ok(key)
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn ring(&self) -> Ring {
        self.alphabet.ring()
    }

    /// Keyword as shift amounts in `alphabet`.
    pub fn shifts(&self, alphabet: &Alphabet) -> Result<Vec<i64>, CipherError> {
        self.keyword
            .chars()
            .map(|c| alphabet.index_of(c).map(|i| i as i64))
            .collect()
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        if self.keyword.is_empty() {
            return Err(CipherError::InvalidKeyValue(
                "Vigenère keyword must not be empty".to_string(),
            ));
        }

        for c in self.keyword.chars() {
            self.alphabet.index_of(c)?;
        }
        Ok(())
    }
}

fn check_canonical(what: &str, value: i64, ring: &Ring) -> Result<(), CipherError> {
    if ring.normalize(value) != value {
        return Err(CipherError::InvalidKeyValue(format!(
            "{} {} is not reduced modulo {}",
            what,
            value,
            ring.modulus()
        )));
    }
    Ok(())
}

fn check_coprime(factor: i64, ring: &Ring) -> Result<(), CipherError> {
    let g = gcd(factor, ring.modulus() as i64);
    if g != 1 {
        return Err(CipherError::InvalidKeyValue(format!(
            "GCD(a, m) must be 1, but gcd({}, {}) = {}",
            factor,
            ring.modulus(),
            g
        )));
    }
    Ok(())
}
