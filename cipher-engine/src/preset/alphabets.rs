use crate::alphabet::Alphabet;

use lazy_static::lazy_static;

pub const LATIN_UPPERCASE_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LATIN_LOWERCASE_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const ALPHANUMERIC_UPPERCASE_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

lazy_static! {
    /// The 26-letter uppercase Latin alphabet `A..Z`.
    pub static ref LATIN_UPPERCASE: Alphabet = build(LATIN_UPPERCASE_CHARS);

    /// The 26-letter lowercase Latin alphabet `a..z`.
    pub static ref LATIN_LOWERCASE: Alphabet = build(LATIN_LOWERCASE_CHARS);

    /// Uppercase Latin letters followed by the digits `0..9` (m = 36).
    pub static ref ALPHANUMERIC_UPPERCASE: Alphabet = build(ALPHANUMERIC_UPPERCASE_CHARS);
}

fn build(symbols: &str) -> Alphabet {
    match Alphabet::new(symbols) {
        Ok(alphabet) => alphabet,
        Err(e) => unreachable!("preset alphabet {:?} is invalid: {}", symbols, e),
    }
}
