//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing the residue ring Z_m that the
//! arithmetic ciphers (shift, affine, multiplicative, Vigenère) operate in.
//! The modulus is always the size of the alphabet in use.

pub mod helper;
pub mod math;

pub use helper::gcd;
pub use math::Ring;
