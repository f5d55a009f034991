use crate::cipher::{CipherContext, Cryptosystem};
use crate::errors::CipherError;
use crate::keys::VigenereKey;

/// `E(x_i) = (x_i + k_(i mod len)) mod m`.
///
/// `i` counts alphabet symbols only: whitespace and passed-through characters
/// do not consume a keyword position.
#[derive(Debug, Clone)]
pub struct VigenereCipher {
    context: CipherContext,
}

impl VigenereCipher {
    pub fn new(context: CipherContext) -> Self {
        Self { context }
    }

    fn shifts(&self, key: &VigenereKey) -> Result<Vec<i64>, CipherError> {
        self.validate(key)?;
        key.shifts(self.context.plain_alphabet())
    }
}

impl Cryptosystem for VigenereCipher {
    type Key = VigenereKey;

    fn name(&self) -> &'static str {
        "Vigenère"
    }

    fn context(&self) -> &CipherContext {
        &self.context
    }

    fn validate(&self, key: &VigenereKey) -> Result<(), CipherError> {
        key.validate()
    }

    fn encrypt(&self, plaintext: &str, key: &VigenereKey) -> Result<String, CipherError> {
        let shifts = self.shifts(key)?;
        let ring = self.context.ring();
        let mut keyword = shifts.iter().cycle();

        self.context.encrypt_symbols(plaintext, |x| match keyword.next() {
            Some(&k) => ring.add(x, k),
            None => x,
        })
    }

    fn decrypt(&self, ciphertext: &str, key: &VigenereKey) -> Result<String, CipherError> {
        let shifts = self.shifts(key)?;
        let ring = self.context.ring();
        let mut keyword = shifts.iter().cycle();

        self.context.decrypt_symbols(ciphertext, |y| match keyword.next() {
            Some(&k) => ring.sub(y, k),
            None => y,
        })
    }
}
