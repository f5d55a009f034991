use crate::cipher::{CipherContext, Cryptosystem};
use crate::errors::CipherError;
use crate::keys::ShiftKey;

/// `E(x) = (x + k) mod m`, `D(x) = (x - k) mod m`.
#[derive(Debug, Clone)]
pub struct ShiftCipher {
    context: CipherContext,
}

impl ShiftCipher {
    pub fn new(context: CipherContext) -> Self {
        Self { context }
    }
}

impl Cryptosystem for ShiftCipher {
    type Key = ShiftKey;

    fn name(&self) -> &'static str {
        "Shift"
    }

    fn context(&self) -> &CipherContext {
        &self.context
    }

    fn validate(&self, key: &ShiftKey) -> Result<(), CipherError> {
        key.validate()
    }

    fn encrypt(&self, plaintext: &str, key: &ShiftKey) -> Result<String, CipherError> {
        self.validate(key)?;
        let ring = self.context.ring();
        self.context
            .encrypt_symbols(plaintext, |x| ring.add(x, key.shift()))
    }

    fn decrypt(&self, ciphertext: &str, key: &ShiftKey) -> Result<String, CipherError> {
        self.validate(key)?;
        let ring = self.context.ring();
        self.context
            .decrypt_symbols(ciphertext, |y| ring.sub(y, key.shift()))
    }
}
