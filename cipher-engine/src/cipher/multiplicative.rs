use crate::cipher::{CipherContext, Cryptosystem};
use crate::errors::CipherError;
use crate::keys::MultiplicativeKey;

/// `E(x) = (a·x) mod m`, `D(y) = (a⁻¹·y) mod m`.
#[derive(Debug, Clone)]
pub struct MultiplicativeCipher {
    context: CipherContext,
}

impl MultiplicativeCipher {
    pub fn new(context: CipherContext) -> Self {
        Self { context }
    }
}

impl Cryptosystem for MultiplicativeCipher {
    type Key = MultiplicativeKey;

    fn name(&self) -> &'static str {
        "Multiplicative"
    }

    fn context(&self) -> &CipherContext {
        &self.context
    }

    fn validate(&self, key: &MultiplicativeKey) -> Result<(), CipherError> {
        key.validate()
    }

    fn encrypt(&self, plaintext: &str, key: &MultiplicativeKey) -> Result<String, CipherError> {
        self.validate(key)?;
        let ring = self.context.ring();
        ring.inv(key.factor())?;

        self.context
            .encrypt_symbols(plaintext, |x| ring.mul(key.factor(), x))
    }

    fn decrypt(&self, ciphertext: &str, key: &MultiplicativeKey) -> Result<String, CipherError> {
        self.validate(key)?;
        let ring = self.context.ring();
        // keys may come from an alphabet of another size
        let inverse = ring.inv(key.factor())?;

        self.context
            .decrypt_symbols(ciphertext, |y| ring.mul(inverse, y))
    }
}
