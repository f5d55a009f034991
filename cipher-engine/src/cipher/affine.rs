use crate::cipher::{CipherContext, Cryptosystem};
use crate::errors::CipherError;
use crate::keys::AffineKey;

/// `E(x) = (a·x + b) mod m`, `D(y) = a⁻¹·(y − b) mod m`.
///
/// `a⁻¹` is recomputed for the call-time alphabet size, so a key validated for
/// another modulus fails with `CipherError::NoModularInverse`.
#[derive(Debug, Clone)]
pub struct AffineCipher {
    context: CipherContext,
}

impl AffineCipher {
    pub fn new(context: CipherContext) -> Self {
        Self { context }
    }
}

impl Cryptosystem for AffineCipher {
    type Key = AffineKey;

    fn name(&self) -> &'static str {
        "Affine"
    }

    fn context(&self) -> &CipherContext {
        &self.context
    }

    fn validate(&self, key: &AffineKey) -> Result<(), CipherError> {
        key.validate()
    }

    fn encrypt(&self, plaintext: &str, key: &AffineKey) -> Result<String, CipherError> {
        self.validate(key)?;
        let ring = self.context.ring();
        ring.inv(key.factor())?;

        self.context.encrypt_symbols(plaintext, |x| {
            ring.add(ring.mul(key.factor(), x), key.offset())
        })
    }

    fn decrypt(&self, ciphertext: &str, key: &AffineKey) -> Result<String, CipherError> {
        self.validate(key)?;
        let ring = self.context.ring();
        let inverse = ring.inv(key.factor())?;

        self.context.decrypt_symbols(ciphertext, |y| {
            ring.mul(inverse, ring.sub(y, key.offset()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::normalizer::NormalizationPolicy;
    use crate::preset::LATIN_UPPERCASE;

    use quickcheck::{TestResult, quickcheck};

    fn affine() -> AffineCipher {
        AffineCipher::new(CipherContext::symmetric(
            LATIN_UPPERCASE.clone(),
            NormalizationPolicy::default(),
        ))
    }

    #[test]
    fn test_known_vector() -> Result<(), CipherError> {
        // E(x) = 5x + 8: A=0 -> I, F=5 -> H, I=8 -> W, N=13 -> V, E=4 -> C
        let key = AffineKey::new(5, 8, &LATIN_UPPERCASE)?;
        let cipher = affine();

        assert_eq!(cipher.encrypt("AFFINE", &key)?, "IHHWVC");
        assert_eq!(cipher.decrypt("IHHWVC", &key)?, "AFFINE");
        Ok(())
    }

    #[test]
    fn test_key_for_other_modulus_has_no_inverse() -> Result<(), CipherError> {
        // 2 is a unit mod 27 but not mod 26
        let alphabet_27 = Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ_")?;
        let key = AffineKey::new(2, 1, &alphabet_27)?;

        assert!(matches!(
            affine().decrypt("ABC", &key),
            Err(CipherError::NoModularInverse { a: 2, modulus: 26 })
        ));
        Ok(())
    }

    quickcheck! {
        fn prop_roundtrip(indices: Vec<u8>, a: i64, b: i64) -> TestResult {
            let Ok(key) = AffineKey::new(a, b, &LATIN_UPPERCASE) else {
                return TestResult::discard();
            };
            let text: String = indices
                .iter()
                .map(|&i| LATIN_UPPERCASE.symbols()[i as usize % 26])
                .collect();
            let cipher = affine();

            let restored = cipher
                .encrypt(&text, &key)
                .and_then(|c| cipher.decrypt(&c, &key));
            TestResult::from_bool(matches!(restored, Ok(p) if p == text))
        }
    }
}
