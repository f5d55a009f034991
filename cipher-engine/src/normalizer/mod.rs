//! # Text Normalizer
//!
//! Shared pre-processing applied before every classical cipher transform. The
//! normalizer turns raw text into a stream of [`Token`]s: alphabet positions that
//! the cipher transforms and literal characters that it must leave alone.

use crate::alphabet::Alphabet;
use crate::errors::CipherError;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseHandling {
    Preserve,
    #[default]
    Upper,
    Lower,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnknownCharHandling {
    #[default]
    Error,
    Skip,
    PassThrough,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WhitespaceHandling {
    #[default]
    Preserve,
    Strip,
}

/// Normalization policy fixed per cryptosystem at construction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationPolicy {
    pub case_handling: CaseHandling,
    pub unknown_char_handling: UnknownCharHandling,
    pub whitespace_handling: WhitespaceHandling,
}

impl NormalizationPolicy {
    pub fn new(
        case_handling: CaseHandling,
        unknown_char_handling: UnknownCharHandling,
        whitespace_handling: WhitespaceHandling,
    ) -> Self {
        Self {
            case_handling,
            unknown_char_handling,
            whitespace_handling,
        }
    }
}

/// One unit of normalized input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    /// Position of a character in the active alphabet; the cipher transforms it.
    Symbol(usize),
    /// Character emitted as is (preserved whitespace or a passed-through unknown).
    Literal(char),
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TextNormalizer {
    policy: NormalizationPolicy,
}

impl TextNormalizer {
    pub fn new(policy: NormalizationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &NormalizationPolicy {
        &self.policy
    }

    /// Applies the case policy to a single character.
    ///
    /// Conversions that expand into several characters (`ß` -> `SS`) leave the
    /// character unchanged.
    pub fn apply_case(&self, c: char) -> char {
        match self.policy.case_handling {
            CaseHandling::Preserve => c,
            CaseHandling::Upper => only_char(c.to_uppercase()).unwrap_or(c),
            CaseHandling::Lower => only_char(c.to_lowercase()).unwrap_or(c),
        }
    }

    /// Splits `text` into tokens, resolving characters with `lookup`.
    ///
    /// # Errors
    ///
    /// `CipherError::UnknownCharacter` for the first character `lookup` does not
    /// know when the policy is [`UnknownCharHandling::Error`].
    pub fn tokenize<F>(&self, text: &str, lookup: F) -> Result<Vec<Token>, CipherError>
    where
        F: Fn(char) -> Option<usize>,
    {
        self.tokenize_with(text, |c| lookup(self.apply_case(c)))
    }

    /// Like [`tokenize`](Self::tokenize), for text written in a ciphertext alphabet.
    ///
    /// The case policy is applied only when the converted character belongs to
    /// the alphabet; otherwise the raw character is looked up. A ciphertext
    /// alphabet whose case differs from the policy still reads its own output.
    pub fn tokenize_ciphertext<F>(&self, text: &str, lookup: F) -> Result<Vec<Token>, CipherError>
    where
        F: Fn(char) -> Option<usize>,
    {
        self.tokenize_with(text, |c| lookup(self.apply_case(c)).or_else(|| lookup(c)))
    }

    fn tokenize_with<F>(&self, text: &str, resolve: F) -> Result<Vec<Token>, CipherError>
    where
        F: Fn(char) -> Option<usize>,
    {
        let mut tokens = Vec::with_capacity(text.len());

        for c in text.chars() {
            if c.is_whitespace() {
                match self.policy.whitespace_handling {
                    WhitespaceHandling::Strip => continue,
                    WhitespaceHandling::Preserve => {
                        tokens.push(Token::Literal(c));
                        continue;
                    }
                }
            }

            match resolve(c) {
                Some(index) => tokens.push(Token::Symbol(index)),
                None => match self.policy.unknown_char_handling {
                    UnknownCharHandling::Error => return Err(CipherError::UnknownCharacter(c)),
                    UnknownCharHandling::Skip => {}
                    UnknownCharHandling::PassThrough => tokens.push(Token::Literal(c)),
                },
            }
        }

        Ok(tokens)
    }

    /// [`tokenize`](Self::tokenize) against the positions of `alphabet`.
    pub fn tokenize_for(&self, text: &str, alphabet: &Alphabet) -> Result<Vec<Token>, CipherError> {
        self.tokenize(text, |c| alphabet.position(c))
    }

    /// [`tokenize_ciphertext`](Self::tokenize_ciphertext) against the positions of `alphabet`.
    pub fn tokenize_ciphertext_for(
        &self,
        text: &str,
        alphabet: &Alphabet,
    ) -> Result<Vec<Token>, CipherError> {
        self.tokenize_ciphertext(text, |c| alphabet.position(c))
    }

    /// Tokenizes `text` and maps every symbol through `transform`, keeping literals.
    ///
    /// `transform` is called once per symbol in input order.
    pub fn transform<L, F>(&self, text: &str, lookup: L, transform: F) -> Result<String, CipherError>
    where
        L: Fn(char) -> Option<usize>,
        F: FnMut(usize) -> Result<char, CipherError>,
    {
        map_symbols(self.tokenize(text, lookup)?, transform)
    }

    /// [`transform`](Self::transform) with ciphertext-side lookup.
    pub fn transform_ciphertext<L, F>(
        &self,
        text: &str,
        lookup: L,
        transform: F,
    ) -> Result<String, CipherError>
    where
        L: Fn(char) -> Option<usize>,
        F: FnMut(usize) -> Result<char, CipherError>,
    {
        map_symbols(self.tokenize_ciphertext(text, lookup)?, transform)
    }
}

fn map_symbols<F>(tokens: Vec<Token>, mut transform: F) -> Result<String, CipherError>
where
    F: FnMut(usize) -> Result<char, CipherError>,
{
    tokens
        .into_iter()
        .map(|token| match token {
            Token::Symbol(index) => transform(index),
            Token::Literal(c) => Ok(c),
        })
        .collect()
}

fn only_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let first = chars.next()?;
    match chars.next() {
        Some(_) => None,
        None => Some(first),
    }
}
