use crate::alphabet::Alphabet;
use crate::errors::CipherError;
use crate::preset::LATIN_UPPERCASE;

use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Bijection `plain[i] <-> cipher[i]` between two equal-length character lists.
///
/// The default value is an unset key with both lists empty; ciphers refuse it
/// with `CipherError::KeyNotSet`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionKey {
    plain: Vec<char>,
    cipher: Vec<char>,
    /// Alphabet both lists were drawn from; `None` only for the unset key.
    #[serde(default)]
    alphabet: Option<Alphabet>,
}

impl SubstitutionKey {
    /// # Errors
    ///
    /// * `CipherError::InvalidKeyValue` for lists of different length or with repeated characters.
    /// * `CipherError::InvalidSymbol` for a character outside `alphabet`.
    pub fn new(plain: &str, cipher: &str, alphabet: &Alphabet) -> Result<Self, CipherError> {
        let key = Self {
            plain: plain.chars().collect(),
            cipher: cipher.chars().collect(),
            alphabet: Some(alphabet.clone()),
        };
        key.validate()?;

        Ok(key)
    }

    /// Builds a key from the two text fields a user fills in.
    ///
    /// An empty `plain` field defaults to `alphabet` itself; an empty `cipher`
    /// field generates a random mapping. The flag is `true` when a mapping was
    /// generated, in which case the caller must keep the returned key.
    pub fn from_fields(
        plain: &str,
        cipher: &str,
        alphabet: &Alphabet,
    ) -> Result<(Self, bool), CipherError> {
        let plain = if plain.is_empty() {
            alphabet.to_string()
        } else {
            plain.to_string()
        };

        if cipher.is_empty() {
            let plain_alphabet = Alphabet::new(&plain)?;
            for &c in plain_alphabet.symbols() {
                alphabet.index_of(c)?;
            }
            log::debug!("Generating random substitution key over {}", plain_alphabet);
            let mut key = Self::random_with_rng(&plain_alphabet, &mut rand::rng());
            key.alphabet = Some(alphabet.clone());
            return Ok((key, true));
        }

        Ok((Self::new(&plain, cipher, alphabet)?, false))
    }

    /// Uniformly random mapping of the 26-letter alphabet `A..Z`.
    pub fn generate() -> Self {
        Self::random_with_rng(&LATIN_UPPERCASE, &mut rand::rng())
    }

    /// Uniformly random mapping of `alphabet` onto a shuffle of itself.
    pub fn random_with_rng<R: Rng + ?Sized>(alphabet: &Alphabet, rng: &mut R) -> Self {
        let plain = alphabet.symbols().to_vec();
        let mut cipher = plain.clone();
        cipher.shuffle(rng);

        Self {
            plain,
            cipher,
            alphabet: Some(alphabet.clone()),
        }
    }

    pub fn plain(&self) -> &[char] {
        &self.plain
    }

    pub fn cipher(&self) -> &[char] {
        &self.cipher
    }

    pub fn plain_string(&self) -> String {
        self.plain.iter().collect()
    }

    pub fn cipher_string(&self) -> String {
        self.cipher.iter().collect()
    }

    pub fn is_set(&self) -> bool {
        !self.plain.is_empty() && !self.cipher.is_empty()
    }

    pub fn encrypt_position(&self, c: char) -> Option<usize> {
        self.plain.iter().position(|&p| p == c)
    }

    pub fn decrypt_position(&self, c: char) -> Option<usize> {
        self.cipher.iter().position(|&p| p == c)
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        if let Some(alphabet) = &self.alphabet {
            for &c in self.plain.iter().chain(self.cipher.iter()) {
                alphabet.index_of(c)?;
            }
        }

        if self.plain.len() != self.cipher.len() {
            return Err(CipherError::InvalidKeyValue(format!(
                "Plain alphabet has {} characters, cipher alphabet has {}",
                self.plain.len(),
                self.cipher.len()
            )));
        }

        for (name, side) in [("plain", &self.plain), ("cipher", &self.cipher)] {
            if let Some(duplicate) = side.iter().duplicates().next() {
                return Err(CipherError::InvalidKeyValue(format!(
                    "Character '{}' appears twice in the {} alphabet",
                    duplicate, name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use std::collections::HashSet;

    #[test]
    fn test_explicit_key() -> Result<(), CipherError> {
        let key = SubstitutionKey::new("ABC", "CAB", &LATIN_UPPERCASE)?;
        assert_eq!(key.encrypt_position('B'), Some(1));
        assert_eq!(key.cipher()[1], 'A');
        assert_eq!(key.decrypt_position('A'), Some(1));
        assert!(key.is_set());
        Ok(())
    }

    #[test]
    fn test_rejects_bad_mappings() {
        assert!(matches!(
            SubstitutionKey::new("ABC", "AB", &LATIN_UPPERCASE),
            Err(CipherError::InvalidKeyValue(_))
        ));
        assert!(matches!(
            SubstitutionKey::new("ABC", "AAB", &LATIN_UPPERCASE),
            Err(CipherError::InvalidKeyValue(_))
        ));
        assert!(matches!(
            SubstitutionKey::new("ABC", "ab1", &LATIN_UPPERCASE),
            Err(CipherError::InvalidSymbol('a'))
        ));
    }

    #[test]
    fn test_empty_cipher_field_generates_bijection() -> Result<(), CipherError> {
        let (key, generated) = SubstitutionKey::from_fields("", "", &LATIN_UPPERCASE)?;
        assert!(generated);
        assert_eq!(key.plain().len(), 26);
        assert_eq!(key.cipher().len(), 26);

        let distinct: HashSet<char> = key.cipher().iter().copied().collect();
        assert_eq!(distinct.len(), 26);
        assert!(key.cipher().iter().all(|c| LATIN_UPPERCASE.contains(*c)));
        Ok(())
    }

    #[test]
    fn test_filled_fields_are_kept() -> Result<(), CipherError> {
        let (key, generated) = SubstitutionKey::from_fields("AB", "BA", &LATIN_UPPERCASE)?;
        assert!(!generated);
        assert_eq!(key.cipher_string(), "BA");
        Ok(())
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = SubstitutionKey::random_with_rng(&LATIN_UPPERCASE, &mut StdRng::seed_from_u64(42));
        let b = SubstitutionKey::random_with_rng(&LATIN_UPPERCASE, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(SubstitutionKey::generate().validate().is_ok());
    }

    #[test]
    fn test_deserialized_key_is_checked_against_its_alphabet() -> Result<(), CipherError> {
        let tampered: SubstitutionKey = serde_json::from_str(
            r#"{"plain":["A","B"],"cipher":["B","1"],"alphabet":"ABCDEFGHIJKLMNOPQRSTUVWXYZ"}"#,
        )?;
        assert!(matches!(tampered.validate(), Err(CipherError::InvalidSymbol('1'))));

        let unbound: SubstitutionKey =
            serde_json::from_str(r#"{"plain":["A","B"],"cipher":["B","1"]}"#)?;
        assert!(unbound.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_default_is_unset() {
        assert!(!SubstitutionKey::default().is_set());
    }
}
