use anyhow::{Context, Result, bail};
use cipher_engine::alphabet::Alphabet;
use cipher_engine::cipher::{CipherContext, CipherKind, ClassicalCipher, Cryptosystem};
use cipher_engine::config::EngineConfig;
use cipher_engine::errors::CipherError;
use cipher_engine::keys::{
    AffineKey, Key, MultiplicativeKey, PermutationKey, ShiftKey, SubstitutionKey, VigenereKey,
};
use cipher_engine::preset::LATIN_UPPERCASE;
use cipher_engine::rabin::{self, RabinConfig, RabinKeyPair, RabinPrivateKey, RabinPublicKey};
use num_bigint::BigUint;

use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

fn parse_int(text: &str) -> Result<i64, CipherError> {
    text.trim()
        .parse()
        .map_err(|_| CipherError::InvalidKeyFormat(format!("'{}' is not an integer", text.trim())))
}

/// Parses the textual key for `kind`. An empty substitution key on encryption
/// generates a random mapping; the flag reports that.
pub fn parse_key(
    kind: CipherKind,
    text: &str,
    alphabet: &Alphabet,
    direction: Direction,
) -> Result<(Key, bool), CipherError> {
    let key = match kind {
        CipherKind::Shift => ShiftKey::new(parse_int(text)?, alphabet).into(),
        CipherKind::Affine => {
            let (a, b) = text.split_once(',').ok_or_else(|| {
                CipherError::InvalidKeyFormat(format!("expected 'a,b', got '{}'", text))
            })?;
            AffineKey::new(parse_int(a)?, parse_int(b)?, alphabet)?.into()
        }
        CipherKind::Multiplicative => MultiplicativeKey::new(parse_int(text)?, alphabet)?.into(),
        CipherKind::Permutation => text.parse::<PermutationKey>()?.into(),
        CipherKind::Vigenere => VigenereKey::new(text, alphabet)?.into(),
        CipherKind::Substitution => {
            if text.is_empty() && direction == Direction::Decrypt {
                return Err(CipherError::KeyNotSet(
                    "decryption needs the cipher mapping".to_string(),
                ));
            }
            let (key, generated) = SubstitutionKey::from_fields("", text, alphabet)?;
            return Ok((key.into(), generated));
        }
    };

    Ok((key, false))
}

pub fn run_classical(
    kind: CipherKind,
    key_text: &str,
    alphabet: Option<&str>,
    text: &str,
    config: &EngineConfig,
    direction: Direction,
) -> Result<String> {
    let alphabet = match alphabet {
        Some(symbols) => Alphabet::new(symbols).context("Invalid --alphabet")?,
        None => LATIN_UPPERCASE.clone(),
    };

    let (key, generated) =
        parse_key(kind, key_text, &alphabet, direction).context("Invalid --key")?;
    if let Key::Substitution(key) = &key {
        if generated {
            eprintln!("generated key: {}", key.cipher_string());
        }
    }

    let cipher = ClassicalCipher::new(kind, CipherContext::symmetric(alphabet, config.policy));
    let output = match direction {
        Direction::Encrypt => cipher.encrypt(text, &key)?,
        Direction::Decrypt => cipher.decrypt(text, &key)?,
    };
    Ok(output)
}

pub fn rabin_keygen(config: RabinConfig) -> Result<RabinKeyPair> {
    let handle = rabin::spawn_key_generation(config);
    match handle.join() {
        Ok(result) => Ok(result?),
        Err(_) => bail!("Key generation thread panicked"),
    }
}

pub fn rabin_encrypt(public: &str, text: &str) -> Result<BigUint> {
    let public_key = RabinPublicKey::from_str(public).context("Invalid --public")?;
    Ok(public_key.encrypt_text(text)?)
}

pub fn rabin_decrypt(public: &str, private: &str, ciphertext: &str) -> Result<[String; 4]> {
    let public_key = RabinPublicKey::from_str(public).context("Invalid --public")?;
    let private_key = RabinPrivateKey::from_str(private).context("Invalid --private")?;
    let ciphertext = BigUint::from_str(ciphertext.trim())
        .with_context(|| format!("Ciphertext '{}' is not a decimal integer", ciphertext))?;

    Ok(rabin::decrypt(&ciphertext, &public_key, &private_key)?.texts())
}
