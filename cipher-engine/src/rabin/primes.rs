//! Prime search for Rabin keys: trial division followed by Miller–Rabin.

use crate::errors::CipherError;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

const SMALL_PRIMES: [u32; 46] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199,
];

/// Probabilistic primality test.
///
/// False positives happen with probability at most `4^-rounds`; primes are never rejected.
pub fn is_probable_prime<R: Rng + ?Sized>(n: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }

    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd
    let n_minus_one = n - BigUint::one();
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // n > 199 here, so [2, n - 2] is non-empty
    let witness_span = n - BigUint::from(3u32);

    'witness: for _ in 0..rounds {
        let a = random_below(&witness_span, rng) + &two;
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Searches for a prime `p` with exactly `bits` bits and `p ≡ 3 (mod 4)`.
///
/// # Errors
///
/// `CipherError::KeyGenerationError` when none of `max_attempts` candidates is prime.
pub fn generate_blum_prime<R: Rng + ?Sized>(
    bits: u64,
    max_attempts: usize,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint, CipherError> {
    if bits < 3 {
        return Err(CipherError::KeyGenerationError(format!(
            "Cannot build a prime ≡ 3 (mod 4) with {} bits",
            bits
        )));
    }

    for attempt in 1..=max_attempts {
        let candidate = random_blum_candidate(bits, rng);
        if is_probable_prime(&candidate, rounds, rng) {
            log::debug!("Found {}-bit prime after {} candidates", bits, attempt);
            return Ok(candidate);
        }
    }

    Err(CipherError::KeyGenerationError(format!(
        "No {}-bit prime ≡ 3 (mod 4) found within {} candidates",
        bits, max_attempts
    )))
}

/// Random number with its top bit set and its two low bits set (≡ 3 mod 4).
fn random_blum_candidate<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> BigUint {
    let byte_len = bits.div_ceil(8) as usize;
    let excess = (byte_len as u64 * 8 - bits) as u32;

    let mut bytes = vec![0u8; byte_len];
    rng.fill(&mut bytes[..]);

    bytes[0] &= 0xFF >> excess;
    bytes[0] |= 0x80 >> excess;
    bytes[byte_len - 1] |= 0b11;

    BigUint::from_bytes_be(&bytes)
}

/// Roughly uniform value in `[0, bound)`; `bound` must be non-zero.
fn random_below<R: Rng + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    let byte_len = bound.bits().div_ceil(8) as usize + 8;
    let mut bytes = vec![0u8; byte_len];
    rng.fill(&mut bytes[..]);

    BigUint::from_bytes_be(&bytes) % bound
}
