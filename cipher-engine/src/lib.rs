//! Classical cipher engine and the Rabin public-key cryptosystem.
//!
//! Classical ciphers ([`cipher`]) operate over a user-defined [`alphabet::Alphabet`]
//! through a shared [`normalizer`]. Rabin ([`rabin`]) works on big integers and
//! is independent of alphabets.

pub mod alphabet;
pub mod cipher;
pub mod config;
pub mod errors;
pub mod keys;
pub mod normalizer;
pub mod preset;
pub mod rabin;
pub mod ring;
