//! Implementation of ring ops using modular arithmetic.

use crate::errors::CipherError;

use serde::{Deserialize, Serialize};

/// Represents the residue ring Z_m using modular arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Ring {
    pub modulus: u64,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1.
    pub fn try_with(modulus: u64) -> Result<Self, CipherError> {
        if modulus <= 1 {
            return Err(CipherError::InvalidAlphabet(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use cipher_engine::ring::Ring;
    /// let ring = Ring::try_with(26).unwrap();
    /// assert_eq!(ring.modulus(), 26);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// Handles negative values correctly by adding the modulus.
    ///
    /// # Example
    ///
    /// ```
    /// # use cipher_engine::ring::Ring;
    /// let ring = Ring::try_with(26).unwrap();
    /// assert_eq!(ring.normalize(29), 3);
    /// assert_eq!(ring.normalize(-3), 23);
    /// assert_eq!(ring.normalize(26), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        let m = self.modulus as i64;

        let rem = value % m;
        if rem < 0 {
            return rem + m;
        }

        rem
    }

    /// Computes `(a + b) mod modulus`.
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(a_norm.wrapping_add(b_norm))
    }

    /// Computes `(a - b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use cipher_engine::ring::Ring;
    /// let ring = Ring::try_with(26).unwrap();
    /// assert_eq!(ring.sub(3, 5), 24);
    /// assert_eq!(ring.sub(-2, 3), 21);
    /// ```
    pub fn sub(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(a_norm.wrapping_sub(b_norm))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication before the modulo operation.
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        let result = (a_norm as i128 * b_norm as i128) % (self.modulus as i128);

        self.normalize(result as i64)
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// Scans every candidate `x` in `[1, modulus)` until `(a * x) mod modulus == 1`.
    /// This is O(m), not extended Euclid.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::NoModularInverse` if no such `x` exists, which is the
    /// case whenever `gcd(a, modulus) != 1` (including `a == 0`).
    ///
    /// # Example
    ///
    /// ```
    /// # use cipher_engine::ring::Ring;
    /// let ring = Ring::try_with(26).unwrap();
    /// assert_eq!(ring.inv(5).unwrap(), 21); // 5 * 21 = 105 = 1 mod 26
    /// assert_eq!(ring.inv(25).unwrap(), 25);
    /// assert!(ring.inv(13).is_err());
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, CipherError> {
        let a_norm = self.normalize(a);

        (1..self.modulus as i64)
            .find(|&x| self.mul(a_norm, x) == 1)
            .ok_or(CipherError::NoModularInverse {
                a,
                modulus: self.modulus,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_creation() {
        assert!(Ring::try_with(26).is_ok());
        assert!(Ring::try_with(2).is_ok());
        assert!(Ring::try_with(1).is_err());
        assert!(Ring::try_with(0).is_err());
    }

    #[test]
    fn test_element_normalization() -> Result<(), CipherError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.normalize(5), 5);
        assert_eq!(ring.normalize(16), 5);
        assert_eq!(ring.normalize(-6), 5);
        Ok(())
    }

    #[test]
    fn test_addition() -> Result<(), CipherError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.add(5, 8), 2);
        assert_eq!(ring.add(-3, 8), 5);
        Ok(())
    }

    #[test]
    fn test_subtraction() -> Result<(), CipherError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.sub(5, 8), 8);
        assert_eq!(ring.sub(8, 5), 3);
        Ok(())
    }

    #[test]
    fn test_multiplication() -> Result<(), CipherError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.mul(5, 8), 7);
        assert_eq!(ring.mul(-2, 8), 6);
        Ok(())
    }

    #[test]
    fn test_inversion() -> Result<(), CipherError> {
        let ring = Ring::try_with(26)?;
        for a in [1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25] {
            let inv = ring.inv(a)?;
            assert_eq!(ring.mul(a, inv), 1, "inverse of {} failed", a);
        }
        Ok(())
    }

    #[test]
    fn test_no_inverse_for_shared_factor() -> Result<(), CipherError> {
        let ring = Ring::try_with(26)?;
        for a in [0, 2, 4, 13, 26] {
            match ring.inv(a) {
                Err(CipherError::NoModularInverse { modulus, .. }) => assert_eq!(modulus, 26),
                other => panic!("expected NoModularInverse for {}, got {:?}", a, other),
            }
        }
        Ok(())
    }
}
