//! # Cipher Module
//!
//! Alphabet-based classical ciphers. Each cipher is bound to a
//! [`CipherContext`] (plaintext alphabet, ciphertext alphabet, normalization
//! policy) and implements [`Cryptosystem`] for its own key type.
//! [`ClassicalCipher`] is the closed sum of all of them, keyed by [`Key`].

pub mod affine;
pub mod multiplicative;
pub mod permutation;
pub mod shift;
pub mod substitution;
pub mod vigenere;

pub use affine::AffineCipher;
pub use multiplicative::MultiplicativeCipher;
pub use permutation::PermutationCipher;
pub use shift::ShiftCipher;
pub use substitution::SubstitutionCipher;
pub use vigenere::VigenereCipher;

use crate::alphabet::Alphabet;
use crate::errors::CipherError;
use crate::keys::Key;
use crate::normalizer::{NormalizationPolicy, TextNormalizer};
use crate::ring::Ring;

use serde::{Deserialize, Serialize};

/// Contract shared by every cipher.
///
/// Implementations are stateless: neither the key nor the context is mutated
/// and repeated calls are independent.
pub trait Cryptosystem {
    type Key;

    fn name(&self) -> &'static str;

    fn context(&self) -> &CipherContext;

    /// Re-checks `key` against its own invariants.
    fn validate(&self, key: &Self::Key) -> Result<(), CipherError>;

    fn encrypt(&self, plaintext: &str, key: &Self::Key) -> Result<String, CipherError>;

    fn decrypt(&self, ciphertext: &str, key: &Self::Key) -> Result<String, CipherError>;
}

/// Alphabets and normalization policy a cipher is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherContext {
    plain_alphabet: Alphabet,
    cipher_alphabet: Alphabet,
    policy: NormalizationPolicy,
}

impl CipherContext {
    /// # Errors
    ///
    /// `CipherError::InvalidAlphabet` when the two alphabets differ in size.
    pub fn new(
        plain_alphabet: Alphabet,
        cipher_alphabet: Alphabet,
        policy: NormalizationPolicy,
    ) -> Result<Self, CipherError> {
        if plain_alphabet.size() != cipher_alphabet.size() {
            return Err(CipherError::InvalidAlphabet(format!(
                "Plaintext alphabet has {} symbols, ciphertext alphabet has {}",
                plain_alphabet.size(),
                cipher_alphabet.size()
            )));
        }

        Ok(Self {
            plain_alphabet,
            cipher_alphabet,
            policy,
        })
    }

    /// Same alphabet on both sides.
    pub fn symmetric(alphabet: Alphabet, policy: NormalizationPolicy) -> Self {
        Self {
            plain_alphabet: alphabet.clone(),
            cipher_alphabet: alphabet,
            policy,
        }
    }

    pub fn plain_alphabet(&self) -> &Alphabet {
        &self.plain_alphabet
    }

    pub fn cipher_alphabet(&self) -> &Alphabet {
        &self.cipher_alphabet
    }

    pub fn policy(&self) -> &NormalizationPolicy {
        &self.policy
    }

    pub fn normalizer(&self) -> TextNormalizer {
        TextNormalizer::new(self.policy)
    }

    /// Z_m for the call-time alphabet size.
    pub fn ring(&self) -> Ring {
        self.plain_alphabet.ring()
    }

    /// Maps every plaintext symbol index through `f` into the ciphertext alphabet.
    pub(crate) fn encrypt_symbols<F>(&self, text: &str, mut f: F) -> Result<String, CipherError>
    where
        F: FnMut(i64) -> i64,
    {
        let ring = self.ring();
        self.normalizer().transform(
            text,
            |c| self.plain_alphabet.position(c),
            |index| {
                self.cipher_alphabet
                    .char_at(ring.normalize(f(index as i64)) as usize)
            },
        )
    }

    /// Maps every ciphertext symbol index through `f` back into the plaintext alphabet.
    pub(crate) fn decrypt_symbols<F>(&self, text: &str, mut f: F) -> Result<String, CipherError>
    where
        F: FnMut(i64) -> i64,
    {
        let ring = self.ring();
        self.normalizer().transform_ciphertext(
            text,
            |c| self.cipher_alphabet.position(c),
            |index| {
                self.plain_alphabet
                    .char_at(ring.normalize(f(index as i64)) as usize)
            },
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherKind {
    Shift,
    Affine,
    Multiplicative,
    Substitution,
    Permutation,
    Vigenere,
}

/// Any classical cipher, selected at runtime.
#[derive(Debug, Clone)]
pub enum ClassicalCipher {
    Shift(ShiftCipher),
    Affine(AffineCipher),
    Multiplicative(MultiplicativeCipher),
    Substitution(SubstitutionCipher),
    Permutation(PermutationCipher),
    Vigenere(VigenereCipher),
}

impl ClassicalCipher {
    pub fn new(kind: CipherKind, context: CipherContext) -> Self {
        log::debug!(
            "Constructing {:?} cipher over {} -> {}",
            kind,
            context.plain_alphabet(),
            context.cipher_alphabet()
        );

        match kind {
            CipherKind::Shift => ClassicalCipher::Shift(ShiftCipher::new(context)),
            CipherKind::Affine => ClassicalCipher::Affine(AffineCipher::new(context)),
            CipherKind::Multiplicative => {
                ClassicalCipher::Multiplicative(MultiplicativeCipher::new(context))
            }
            CipherKind::Substitution => {
                ClassicalCipher::Substitution(SubstitutionCipher::new(context))
            }
            CipherKind::Permutation => ClassicalCipher::Permutation(PermutationCipher::new(context)),
            CipherKind::Vigenere => ClassicalCipher::Vigenere(VigenereCipher::new(context)),
        }
    }

    pub fn kind(&self) -> CipherKind {
        match self {
            ClassicalCipher::Shift(_) => CipherKind::Shift,
            ClassicalCipher::Affine(_) => CipherKind::Affine,
            ClassicalCipher::Multiplicative(_) => CipherKind::Multiplicative,
            ClassicalCipher::Substitution(_) => CipherKind::Substitution,
            ClassicalCipher::Permutation(_) => CipherKind::Permutation,
            ClassicalCipher::Vigenere(_) => CipherKind::Vigenere,
        }
    }

    fn key_mismatch(&self, key: &Key) -> CipherError {
        CipherError::InvalidKeyValue(format!(
            "{} cipher cannot be used with a {} key",
            self.name(),
            key.name()
        ))
    }
}

impl Cryptosystem for ClassicalCipher {
    type Key = Key;

    fn name(&self) -> &'static str {
        match self {
            ClassicalCipher::Shift(c) => c.name(),
            ClassicalCipher::Affine(c) => c.name(),
            ClassicalCipher::Multiplicative(c) => c.name(),
            ClassicalCipher::Substitution(c) => c.name(),
            ClassicalCipher::Permutation(c) => c.name(),
            ClassicalCipher::Vigenere(c) => c.name(),
        }
    }

    fn context(&self) -> &CipherContext {
        match self {
            ClassicalCipher::Shift(c) => c.context(),
            ClassicalCipher::Affine(c) => c.context(),
            ClassicalCipher::Multiplicative(c) => c.context(),
            ClassicalCipher::Substitution(c) => c.context(),
            ClassicalCipher::Permutation(c) => c.context(),
            ClassicalCipher::Vigenere(c) => c.context(),
        }
    }

    fn validate(&self, key: &Key) -> Result<(), CipherError> {
        match (self, key) {
            (ClassicalCipher::Shift(c), Key::Shift(k)) => c.validate(k),
            (ClassicalCipher::Affine(c), Key::Affine(k)) => c.validate(k),
            (ClassicalCipher::Multiplicative(c), Key::Multiplicative(k)) => c.validate(k),
            (ClassicalCipher::Substitution(c), Key::Substitution(k)) => c.validate(k),
            (ClassicalCipher::Permutation(c), Key::Permutation(k)) => c.validate(k),
            (ClassicalCipher::Vigenere(c), Key::Vigenere(k)) => c.validate(k),
            _ => Err(self.key_mismatch(key)),
        }
    }

    fn encrypt(&self, plaintext: &str, key: &Key) -> Result<String, CipherError> {
        log::trace!("{} encrypt of {} chars", self.name(), plaintext.chars().count());
        match (self, key) {
            (ClassicalCipher::Shift(c), Key::Shift(k)) => c.encrypt(plaintext, k),
            (ClassicalCipher::Affine(c), Key::Affine(k)) => c.encrypt(plaintext, k),
            (ClassicalCipher::Multiplicative(c), Key::Multiplicative(k)) => c.encrypt(plaintext, k),
            (ClassicalCipher::Substitution(c), Key::Substitution(k)) => c.encrypt(plaintext, k),
            (ClassicalCipher::Permutation(c), Key::Permutation(k)) => c.encrypt(plaintext, k),
            (ClassicalCipher::Vigenere(c), Key::Vigenere(k)) => c.encrypt(plaintext, k),
            _ => Err(self.key_mismatch(key)),
        }
    }

    fn decrypt(&self, ciphertext: &str, key: &Key) -> Result<String, CipherError> {
        log::trace!("{} decrypt of {} chars", self.name(), ciphertext.chars().count());
        match (self, key) {
            (ClassicalCipher::Shift(c), Key::Shift(k)) => c.decrypt(ciphertext, k),
            (ClassicalCipher::Affine(c), Key::Affine(k)) => c.decrypt(ciphertext, k),
            (ClassicalCipher::Multiplicative(c), Key::Multiplicative(k)) => c.decrypt(ciphertext, k),
            (ClassicalCipher::Substitution(c), Key::Substitution(k)) => c.decrypt(ciphertext, k),
            (ClassicalCipher::Permutation(c), Key::Permutation(k)) => c.decrypt(ciphertext, k),
            (ClassicalCipher::Vigenere(c), Key::Vigenere(k)) => c.decrypt(ciphertext, k),
            _ => Err(self.key_mismatch(key)),
        }
    }
}
