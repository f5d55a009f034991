use crate::cipher::{CipherContext, Cryptosystem};
use crate::errors::CipherError;
use crate::keys::PermutationKey;
use crate::normalizer::Token;

use rand::Rng;

/// Block transposition with block length `n` = permutation length.
///
/// Within a block, `out[k] = block[perm[k] - 1]`: `(3, 1, 4, 5, 2)` turns
/// `HELLO` into `LHLOE`.
///
/// Only alphabet symbols are transposed; literal tokens (preserved whitespace,
/// passed-through characters) keep their positions. Encryption pads the last
/// block with `n - len mod n` copies of a single random alphabet character, so
/// a round trip reproduces the input only when its symbol count is already a
/// multiple of `n`.
#[derive(Debug, Clone)]
pub struct PermutationCipher {
    context: CipherContext,
}

impl PermutationCipher {
    pub fn new(context: CipherContext) -> Self {
        Self { context }
    }

    /// [`Cryptosystem::encrypt`] with the padding character drawn from `rng`.
    pub fn encrypt_with_rng<R: Rng + ?Sized>(
        &self,
        plaintext: &str,
        key: &PermutationKey,
        rng: &mut R,
    ) -> Result<String, CipherError> {
        self.validate(key)?;
        let n = key.block_size();
        let plain_alphabet = self.context.plain_alphabet();

        let tokens = self
            .context
            .normalizer()
            .tokenize_for(plaintext, plain_alphabet)?;
        let mut symbols = symbols_of(&tokens);

        let remainder = symbols.len() % n;
        if remainder != 0 {
            // one filler for the whole run
            let filler = rng.random_range(0..plain_alphabet.size());
            log::trace!(
                "Padding {} symbols with {} x '{}'",
                symbols.len(),
                n - remainder,
                plain_alphabet.char_at(filler)?
            );
            symbols.extend(std::iter::repeat_n(filler, n - remainder));
        }

        let permuted: Vec<usize> = symbols
            .chunks_exact(n)
            .flat_map(|block| key.permutation().iter().map(move |&k| block[k - 1]))
            .collect();

        reassemble(&tokens, &permuted, |i| self.context.cipher_alphabet().char_at(i))
    }
}

impl Cryptosystem for PermutationCipher {
    type Key = PermutationKey;

    fn name(&self) -> &'static str {
        "Permutation"
    }

    fn context(&self) -> &CipherContext {
        &self.context
    }

    fn validate(&self, key: &PermutationKey) -> Result<(), CipherError> {
        key.validate()
    }

    fn encrypt(&self, plaintext: &str, key: &PermutationKey) -> Result<String, CipherError> {
        self.encrypt_with_rng(plaintext, key, &mut rand::rng())
    }

    /// # Errors
    ///
    /// `CipherError::InvalidLength` when the symbol count is not a multiple of
    /// the block length.
    fn decrypt(&self, ciphertext: &str, key: &PermutationKey) -> Result<String, CipherError> {
        self.validate(key)?;
        let n = key.block_size();

        let tokens = self
            .context
            .normalizer()
            .tokenize_ciphertext_for(ciphertext, self.context.cipher_alphabet())?;
        let symbols = symbols_of(&tokens);

        if symbols.len() % n != 0 {
            return Err(CipherError::InvalidLength {
                length: symbols.len(),
                block_size: n,
            });
        }

        let inverse = key.inverse();
        let restored: Vec<usize> = symbols
            .chunks_exact(n)
            .flat_map(|block| inverse.iter().map(move |&source| block[source]))
            .collect();

        reassemble(&tokens, &restored, |i| self.context.plain_alphabet().char_at(i))
    }
}

fn symbols_of(tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Symbol(index) => Some(*index),
            Token::Literal(_) => None,
        })
        .collect()
}

/// Writes `symbols` back into the symbol slots of `tokens`; symbols beyond the
/// last slot (padding) are appended at the end.
fn reassemble<F>(tokens: &[Token], symbols: &[usize], to_char: F) -> Result<String, CipherError>
where
    F: Fn(usize) -> Result<char, CipherError>,
{
    let mut symbols = symbols.iter();
    let mut out = String::with_capacity(tokens.len() + symbols.len());

    for token in tokens {
        match token {
            Token::Symbol(_) => {
                if let Some(&index) = symbols.next() {
                    out.push(to_char(index)?);
                }
            }
            Token::Literal(c) => out.push(*c),
        }
    }
    for &index in symbols {
        out.push(to_char(index)?);
    }

    Ok(out)
}
