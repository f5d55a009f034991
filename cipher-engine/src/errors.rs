#[derive(thiserror::Error, Debug)]
pub enum CipherError {
    /// Alphabet has duplicate characters or fewer than two symbols.
    #[error("InvalidAlphabet: {0}")]
    InvalidAlphabet(String),
    /// Character is not part of the alphabet it was looked up in.
    #[error("InvalidSymbol: '{0}' is not part of the alphabet")]
    InvalidSymbol(char),
    #[error("IndexOutOfRange: index {index} is outside [0, {size})")]
    IndexOutOfRange { index: usize, size: usize },

    /// Textual key could not be parsed (e.g. a permutation without parentheses).
    #[error("InvalidKeyFormat: {0}")]
    InvalidKeyFormat(String),
    /// Key parsed but violates its invariant (non-coprime factor, non-permutation, ...).
    #[error("InvalidKeyValue: {0}")]
    InvalidKeyValue(String),
    #[error("Key is not set: {0}")]
    KeyNotSet(String),

    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, m) != 1).
    #[error("NoModularInverse: {a} has no inverse modulo {modulus}")]
    NoModularInverse { a: i64, modulus: u64 },
    #[error("InvalidLength: length {length} is not a multiple of the block size {block_size}")]
    InvalidLength { length: usize, block_size: usize },

    #[error("KeyMismatch: p * q does not equal the public modulus n")]
    KeyMismatch,
    #[error("KeyGenerationError: {0}")]
    KeyGenerationError(String),
    #[error("MessageTooLarge: padded message needs {needed_bits} bits, modulus has {modulus_bits}")]
    MessageTooLarge { needed_bits: u64, modulus_bits: u64 },

    #[error("UnknownCharacter: '{0}' is not part of the active alphabet")]
    UnknownCharacter(char),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
