//! # Rabin Module
//!
//! Public-key encryption by modular squaring, `c = m^2 mod n` with `n = p * q`.
//!
//! Squaring is four-to-one, so decryption yields four square roots. Before
//! encryption a fixed 32-bit marker is appended to the message; after
//! decryption the roots that do not end in the marker are reported as
//! invalid. Every root keeps its slot so callers can present all four.
//!
//! The engine holds no state between calls: keys are generated, then used for
//! any number of independent encrypt/decrypt calls.

pub mod keys;
pub mod primes;

pub use keys::{RabinKeyPair, RabinPrivateKey, RabinPublicKey};

use crate::errors::CipherError;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};

use std::thread::JoinHandle;

/// Redundancy appended to every message in its low 32 bits.
pub const PADDING_MARKER: u32 = 0x5241_4249;
pub const PADDING_MARKER_BITS: usize = 32;
/// Text shown for a root whose marker does not match.
pub const INVALID_PADDING: &str = "Invalid padding";

/// Key-generation settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RabinConfig {
    /// Bit length of each prime; the modulus has about twice as many.
    pub prime_bits: u64,
    /// Candidates tried per prime before giving up.
    pub max_attempts: usize,
    pub miller_rabin_rounds: usize,
}

impl RabinConfig {
    pub const MIN_PRIME_BITS: u64 = 16;

    pub fn validate(&self) -> Result<(), CipherError> {
        if self.prime_bits < Self::MIN_PRIME_BITS {
            return Err(CipherError::KeyGenerationError(format!(
                "prime_bits must be at least {}, got {}",
                Self::MIN_PRIME_BITS,
                self.prime_bits
            )));
        }
        if self.miller_rabin_rounds == 0 {
            return Err(CipherError::KeyGenerationError(
                "miller_rabin_rounds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RabinConfig {
    fn default() -> Self {
        Self {
            prime_bits: 256,
            max_attempts: 10_000,
            miller_rabin_rounds: 32,
        }
    }
}

/// One decryption slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RabinCandidate {
    /// Root carried the marker; holds the message with the marker removed.
    Valid(BigUint),
    InvalidPadding,
}

impl RabinCandidate {
    pub fn is_valid(&self) -> bool {
        matches!(self, RabinCandidate::Valid(_))
    }

    /// Message as lossy UTF-8, or [`INVALID_PADDING`].
    pub fn to_text(&self) -> String {
        match self {
            RabinCandidate::Valid(message) => decode_text(message),
            RabinCandidate::InvalidPadding => INVALID_PADDING.to_string(),
        }
    }
}

/// The four square roots of a ciphertext, in fixed slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RabinCandidateSet {
    roots: [BigUint; 4],
    candidates: [RabinCandidate; 4],
}

impl RabinCandidateSet {
    fn from_roots(roots: [BigUint; 4]) -> Self {
        let candidates = roots.clone().map(|root| unpad(&root));
        Self { roots, candidates }
    }

    /// Raw roots `r` with `r^2 ≡ c (mod n)`, padding still attached.
    pub fn roots(&self) -> &[BigUint; 4] {
        &self.roots
    }

    pub fn candidates(&self) -> &[RabinCandidate; 4] {
        &self.candidates
    }

    pub fn valid(&self) -> impl Iterator<Item = &BigUint> {
        self.candidates.iter().filter_map(|candidate| match candidate {
            RabinCandidate::Valid(message) => Some(message),
            RabinCandidate::InvalidPadding => None,
        })
    }

    pub fn contains(&self, message: &BigUint) -> bool {
        self.valid().any(|valid| valid == message)
    }

    /// Per-slot text; invalid slots read [`INVALID_PADDING`].
    pub fn texts(&self) -> [String; 4] {
        [
            self.candidates[0].to_text(),
            self.candidates[1].to_text(),
            self.candidates[2].to_text(),
            self.candidates[3].to_text(),
        ]
    }
}

/// Generates a key pair using the thread-local RNG.
///
/// # Errors
///
/// `CipherError::KeyGenerationError` for an invalid configuration or when no
/// prime was found within `config.max_attempts` candidates.
pub fn generate_key_pair(config: &RabinConfig) -> Result<RabinKeyPair, CipherError> {
    generate_key_pair_with_rng(config, &mut rand::rng())
}

pub fn generate_key_pair_with_rng<R: Rng + ?Sized>(
    config: &RabinConfig,
    rng: &mut R,
) -> Result<RabinKeyPair, CipherError> {
    config.validate()?;
    log::debug!(
        "Generating Rabin key pair with two {}-bit primes",
        config.prime_bits
    );

    let pair = RabinKeyPair::generate_with_rng(
        config.prime_bits,
        config.max_attempts,
        config.miller_rabin_rounds,
        rng,
    )?;

    log::debug!(
        "Generated Rabin modulus of {} bits",
        pair.public_key().modulus().bits()
    );
    Ok(pair)
}

/// Runs [`generate_key_pair`] on its own thread.
///
/// Dropping the handle abandons the search; the result is then discarded.
pub fn spawn_key_generation(config: RabinConfig) -> JoinHandle<Result<RabinKeyPair, CipherError>> {
    std::thread::spawn(move || generate_key_pair(&config))
}

/// Appends the marker and squares: `c = (m * 2^32 + marker)^2 mod n`.
///
/// # Errors
///
/// `CipherError::MessageTooLarge` when the padded message is not below `n`.
pub fn encrypt(message: &BigUint, public_key: &RabinPublicKey) -> Result<BigUint, CipherError> {
    let n = public_key.modulus();
    let padded = pad(message);

    if &padded >= n {
        return Err(CipherError::MessageTooLarge {
            needed_bits: padded.bits(),
            modulus_bits: n.bits(),
        });
    }

    log::trace!("Rabin encrypt: {} padded bits under a {}-bit modulus", padded.bits(), n.bits());
    Ok((&padded * &padded) % n)
}

/// Encrypts the UTF-8 bytes of `text` read as a big-endian integer.
pub fn encrypt_text(text: &str, public_key: &RabinPublicKey) -> Result<BigUint, CipherError> {
    encrypt(&BigUint::from_bytes_be(text.as_bytes()), public_key)
}

/// Computes the four square roots of `ciphertext` modulo `n` and checks their padding.
///
/// # Errors
///
/// * `CipherError::KeyMismatch` when `p * q != n`; no root is computed then.
/// * `CipherError::InvalidKeyValue` when `p` and `q` are not coprime.
pub fn decrypt(
    ciphertext: &BigUint,
    public_key: &RabinPublicKey,
    private_key: &RabinPrivateKey,
) -> Result<RabinCandidateSet, CipherError> {
    if !private_key.matches(public_key) {
        return Err(CipherError::KeyMismatch);
    }

    let roots = square_roots(ciphertext, private_key)?;
    let candidates = RabinCandidateSet::from_roots(roots);

    if candidates.valid().next().is_none() {
        log::warn!("Rabin decrypt: no root carries the padding marker");
    }
    Ok(candidates)
}

impl RabinPublicKey {
    pub fn encrypt(&self, message: &BigUint) -> Result<BigUint, CipherError> {
        encrypt(message, self)
    }

    pub fn encrypt_text(&self, text: &str) -> Result<BigUint, CipherError> {
        encrypt_text(text, self)
    }
}

impl RabinKeyPair {
    pub fn decrypt(&self, ciphertext: &BigUint) -> Result<RabinCandidateSet, CipherError> {
        decrypt(ciphertext, self.public_key(), self.private_key())
    }
}

/// CRT over `p` and `q`; slot order is `(+mp,+mq), -(+mp,+mq), (+mp,-mq), -(+mp,-mq)`.
fn square_roots(
    ciphertext: &BigUint,
    private_key: &RabinPrivateKey,
) -> Result<[BigUint; 4], CipherError> {
    let p = private_key.p();
    let q = private_key.q();
    let n = private_key.modulus();
    let c = ciphertext % &n;

    // p ≡ q ≡ 3 (mod 4), so c^((p+1)/4) is a square root mod p
    let four = BigUint::from(4u32);
    let mp = c.modpow(&((p + BigUint::one()) / &four), p);
    let mq = c.modpow(&((q + BigUint::one()) / &four), q);

    let q_inv = q.modinv(p).ok_or_else(|| {
        CipherError::InvalidKeyValue("p and q are not coprime".to_string())
    })?;
    let p_inv = p.modinv(q).ok_or_else(|| {
        CipherError::InvalidKeyValue("p and q are not coprime".to_string())
    })?;

    let crt = |rp: &BigUint, rq: &BigUint| -> BigUint {
        (rp * q * &q_inv + rq * p * &p_inv) % &n
    };
    let negate = |x: &BigUint, modulus: &BigUint| -> BigUint { (modulus - x) % modulus };

    let r1 = crt(&mp, &mq);
    let r3 = crt(&mp, &negate(&mq, q));
    let r2 = negate(&r1, &n);
    let r4 = negate(&r3, &n);

    Ok([r1, r2, r3, r4])
}

fn pad(message: &BigUint) -> BigUint {
    (message << PADDING_MARKER_BITS) + BigUint::from(PADDING_MARKER)
}

fn unpad(root: &BigUint) -> RabinCandidate {
    let marker_base = BigUint::one() << PADDING_MARKER_BITS;
    if root % &marker_base == BigUint::from(PADDING_MARKER) {
        RabinCandidate::Valid(root >> PADDING_MARKER_BITS)
    } else {
        RabinCandidate::InvalidPadding
    }
}

fn decode_text(message: &BigUint) -> String {
    if message.is_zero() {
        return String::new();
    }
    String::from_utf8_lossy(&message.to_bytes_be()).into_owned()
}
