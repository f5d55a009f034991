pub mod alphabets;

pub use alphabets::{ALPHANUMERIC_UPPERCASE, LATIN_LOWERCASE, LATIN_UPPERCASE};
