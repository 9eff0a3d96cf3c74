//! Random password generation.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{Error, Result};

/// Character classes a password can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    LowercaseLetters,
    UppercaseLetters,
    Numbers,
    /// The ASCII range `'!'..='+'`.
    Symbols,
}

impl Charset {
    /// Pool used when no charset is requested.
    pub const DEFAULT: [Charset; 3] = [
        Charset::LowercaseLetters,
        Charset::UppercaseLetters,
        Charset::Numbers,
    ];

    pub fn characters(self) -> RangeInclusive<char> {
        match self {
            Charset::LowercaseLetters => 'a'..='z',
            Charset::UppercaseLetters => 'A'..='Z',
            Charset::Numbers => '0'..='9',
            Charset::Symbols => '!'..='+',
        }
    }
}

/// Builds the union of the given charsets, or the default pool if empty.
fn pool(charsets: &[Charset]) -> Vec<char> {
    let selected = if charsets.is_empty() {
        &Charset::DEFAULT[..]
    } else {
        charsets
    };
    selected
        .iter()
        .flat_map(|c| c.characters())
        .collect::<BTreeSet<char>>()
        .into_iter()
        .collect()
}

/// Generates a password of exactly `length` characters using the thread-local
/// CSPRNG.
pub fn generate_password(length: usize, charsets: &[Charset]) -> Result<String> {
    generate_password_with(&mut rand::rng(), length, charsets)
}

/// Generates a password with a caller-supplied RNG.
///
/// Each character is drawn uniformly and independently from the pool.
pub fn generate_password_with<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    charsets: &[Charset],
) -> Result<String> {
    if length == 0 {
        return Err(Error::validation("Length must be greater than 0."));
    }

    let pool = pool(charsets);
    (0..length)
        .map(|_| {
            pool.choose(rng)
                .copied()
                .ok_or_else(|| Error::validation("Character pool is empty."))
        })
        .collect()
}

/// Parses a length typed at a prompt: a positive integer without sign or
/// leading zeros.
pub fn parse_length(input: &str) -> Option<usize> {
    let mut chars = input.chars();
    match chars.next() {
        Some('1'..='9') => {}
        _ => return None,
    }
    if !chars.all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}
