use crate::errors::CipherError;
use crate::rabin::primes::{generate_blum_prime, is_probable_prime};

use num_bigint::BigUint;
use num_traits::One;
use rand::Rng;

use std::fmt;
use std::str::FromStr;

/// Public modulus `n = p * q`. External format: decimal `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RabinPublicKey {
    n: BigUint,
}

/// Private factor pair. External format: `"p,q"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RabinPrivateKey {
    p: BigUint,
    q: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RabinKeyPair {
    public_key: RabinPublicKey,
    private_key: RabinPrivateKey,
}

impl RabinPublicKey {
    pub fn new(n: BigUint) -> Result<Self, CipherError> {
        if n <= BigUint::one() {
            return Err(CipherError::InvalidKeyValue(format!(
                "Rabin modulus must be greater than 1, got {}",
                n
            )));
        }
        Ok(Self { n })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.n
    }
}

impl RabinPrivateKey {
    /// Checks the structural invariants of the pair: both factors are ≡ 3 (mod 4)
    /// and distinct. Primality is checked by [`RabinKeyPair::from_primes`].
    pub fn new(p: BigUint, q: BigUint) -> Result<Self, CipherError> {
        let four = BigUint::from(4u32);
        let three = BigUint::from(3u32);

        for (name, factor) in [("p", &p), ("q", &q)] {
            if factor % &four != three {
                return Err(CipherError::InvalidKeyValue(format!(
                    "{} = {} is not congruent to 3 (mod 4)",
                    name, factor
                )));
            }
        }

        if p == q {
            return Err(CipherError::InvalidKeyValue(
                "p and q must be distinct".to_string(),
            ));
        }

        Ok(Self { p, q })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// `p * q`
    pub fn modulus(&self) -> BigUint {
        &self.p * &self.q
    }

    pub fn matches(&self, public_key: &RabinPublicKey) -> bool {
        self.modulus() == public_key.n
    }
}

impl RabinKeyPair {
    /// Builds a key pair from user-supplied primes.
    ///
    /// # Errors
    ///
    /// `CipherError::InvalidKeyValue` if a factor is not ≡ 3 (mod 4), the
    /// factors are equal, or a factor fails the primality test.
    pub fn from_primes(p: BigUint, q: BigUint, rounds: usize) -> Result<Self, CipherError> {
        let private_key = RabinPrivateKey::new(p, q)?;

        let mut rng = rand::rng();
        for (name, factor) in [("p", &private_key.p), ("q", &private_key.q)] {
            if !is_probable_prime(factor, rounds, &mut rng) {
                return Err(CipherError::InvalidKeyValue(format!(
                    "{} = {} is not prime",
                    name, factor
                )));
            }
        }

        Ok(Self::assemble(private_key))
    }

    /// Generates two distinct `bits`-bit primes ≡ 3 (mod 4).
    pub fn generate_with_rng<R: Rng + ?Sized>(
        bits: u64,
        max_attempts: usize,
        rounds: usize,
        rng: &mut R,
    ) -> Result<Self, CipherError> {
        let p = generate_blum_prime(bits, max_attempts, rounds, rng)?;

        // redraws of q share the per-prime budget
        for _ in 0..max_attempts.max(1) {
            let q = generate_blum_prime(bits, max_attempts, rounds, rng)?;
            if q != p {
                return Ok(Self::assemble(RabinPrivateKey::new(p, q)?));
            }
            log::debug!("Drew the same prime twice, retrying q");
        }

        Err(CipherError::KeyGenerationError(format!(
            "No second {}-bit prime distinct from p found within {} draws",
            bits, max_attempts
        )))
    }

    fn assemble(private_key: RabinPrivateKey) -> Self {
        Self {
            public_key: RabinPublicKey {
                n: private_key.modulus(),
            },
            private_key,
        }
    }

    pub fn public_key(&self) -> &RabinPublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &RabinPrivateKey {
        &self.private_key
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        if !self.private_key.matches(&self.public_key) {
            return Err(CipherError::KeyMismatch);
        }
        Ok(())
    }
}

impl fmt::Display for RabinPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.n)
    }
}

impl fmt::Display for RabinPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.p, self.q)
    }
}

impl FromStr for RabinPublicKey {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RabinPublicKey::new(parse_decimal(s, "public key")?)
    }
}

impl FromStr for RabinPrivateKey {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (p, q) = s.split_once(',').ok_or_else(|| {
            CipherError::InvalidKeyFormat(format!(
                "Private key must be written as \"p,q\", got {:?}",
                s
            ))
        })?;

        RabinPrivateKey::new(parse_decimal(p, "p")?, parse_decimal(q, "q")?)
    }
}

pub(crate) fn parse_decimal(s: &str, what: &str) -> Result<BigUint, CipherError> {
    s.trim().parse::<BigUint>().map_err(|e| {
        CipherError::InvalidKeyFormat(format!("Invalid decimal {} {:?}: {}", what, s.trim(), e))
    })
}
