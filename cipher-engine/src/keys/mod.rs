//! # Keys Module
//!
//! Validated parameter bundles, one type per cipher, plus the closed [`Key`] sum
//! over all of them. Constructors fail fast: a key that exists satisfies its
//! invariants.

pub mod classical;
pub mod permutation;
pub mod substitution;

pub use classical::{AffineKey, MultiplicativeKey, ShiftKey, VigenereKey};
pub use permutation::PermutationKey;
pub use substitution::SubstitutionKey;

use crate::errors::CipherError;
use crate::rabin::RabinKeyPair;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Shift(ShiftKey),
    Affine(AffineKey),
    Multiplicative(MultiplicativeKey),
    Permutation(PermutationKey),
    Substitution(SubstitutionKey),
    Vigenere(VigenereKey),
    Rabin(RabinKeyPair),
}

impl Key {
    pub fn name(&self) -> &'static str {
        match self {
            Key::Shift(_) => "shift",
            Key::Affine(_) => "affine",
            Key::Multiplicative(_) => "multiplicative",
            Key::Permutation(_) => "permutation",
            Key::Substitution(_) => "substitution",
            Key::Vigenere(_) => "Vigenère",
            Key::Rabin(_) => "Rabin",
        }
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        match self {
            Key::Shift(key) => key.validate(),
            Key::Affine(key) => key.validate(),
            Key::Multiplicative(key) => key.validate(),
            Key::Permutation(key) => key.validate(),
            Key::Substitution(key) => key.validate(),
            Key::Vigenere(key) => key.validate(),
            Key::Rabin(key) => key.validate(),
        }
    }
}

impl From<ShiftKey> for Key {
    fn from(key: ShiftKey) -> Self {
        Key::Shift(key)
    }
}

impl From<AffineKey> for Key {
    fn from(key: AffineKey) -> Self {
        Key::Affine(key)
    }
}

impl From<MultiplicativeKey> for Key {
    fn from(key: MultiplicativeKey) -> Self {
        Key::Multiplicative(key)
    }
}

impl From<PermutationKey> for Key {
    fn from(key: PermutationKey) -> Self {
        Key::Permutation(key)
    }
}

impl From<SubstitutionKey> for Key {
    fn from(key: SubstitutionKey) -> Self {
        Key::Substitution(key)
    }
}

impl From<VigenereKey> for Key {
    fn from(key: VigenereKey) -> Self {
        Key::Vigenere(key)
    }
}

impl From<RabinKeyPair> for Key {
    fn from(key: RabinKeyPair) -> Self {
        Key::Rabin(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::LATIN_UPPERCASE;

    use num_bigint::BigUint;

    #[test]
    fn test_every_variant_validates() -> Result<(), CipherError> {
        let keys: Vec<Key> = vec![
            ShiftKey::new(3, &LATIN_UPPERCASE).into(),
            AffineKey::new(5, 8, &LATIN_UPPERCASE)?.into(),
            MultiplicativeKey::new(7, &LATIN_UPPERCASE)?.into(),
            "(2, 1)".parse::<PermutationKey>()?.into(),
            SubstitutionKey::new("AB", "BA", &LATIN_UPPERCASE)?.into(),
            VigenereKey::new("KEY", &LATIN_UPPERCASE)?.into(),
            RabinKeyPair::from_primes(BigUint::from(7u32), BigUint::from(11u32), 16)?.into(),
        ];

        for key in &keys {
            assert!(key.validate().is_ok(), "{} key failed validation", key.name());
        }
        Ok(())
    }
}
