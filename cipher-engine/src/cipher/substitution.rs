use crate::cipher::{CipherContext, Cryptosystem};
use crate::errors::CipherError;
use crate::keys::SubstitutionKey;

/// Character-level bijection given by the key's plain and cipher lists.
///
/// Characters of the alphabet that the key does not map are handled by the
/// unknown-character policy.
#[derive(Debug, Clone)]
pub struct SubstitutionCipher {
    context: CipherContext,
}

impl SubstitutionCipher {
    pub fn new(context: CipherContext) -> Self {
        Self { context }
    }

    /// Fills in missing key fields the way [`SubstitutionKey::from_fields`] does,
    /// against this cipher's plaintext alphabet.
    pub fn key_from_fields(
        &self,
        plain: &str,
        cipher: &str,
    ) -> Result<(SubstitutionKey, bool), CipherError> {
        SubstitutionKey::from_fields(plain, cipher, self.context.plain_alphabet())
    }
}

impl Cryptosystem for SubstitutionCipher {
    type Key = SubstitutionKey;

    fn name(&self) -> &'static str {
        "Substitution"
    }

    fn context(&self) -> &CipherContext {
        &self.context
    }

    fn validate(&self, key: &SubstitutionKey) -> Result<(), CipherError> {
        if !key.is_set() {
            return Err(CipherError::KeyNotSet(
                "substitution alphabets are empty".to_string(),
            ));
        }
        key.validate()?;

        for &c in key.plain() {
            self.context.plain_alphabet().index_of(c)?;
        }
        for &c in key.cipher() {
            self.context.cipher_alphabet().index_of(c)?;
        }
        Ok(())
    }

    fn encrypt(&self, plaintext: &str, key: &SubstitutionKey) -> Result<String, CipherError> {
        self.validate(key)?;
        self.context.normalizer().transform(
            plaintext,
            |c| key.encrypt_position(c),
            |i| Ok(key.cipher()[i]),
        )
    }

    fn decrypt(&self, ciphertext: &str, key: &SubstitutionKey) -> Result<String, CipherError> {
        self.validate(key)?;
        self.context.normalizer().transform_ciphertext(
            ciphertext,
            |c| key.decrypt_position(c),
            |i| Ok(key.plain()[i]),
        )
    }
}
