//! Letter-frequency signatures.
//!
//! A [`Signature`] counts how often each letter `A`-`Z` occurs in a word. Two
//! words are anagrams of each other exactly when their signatures are equal,
//! and a word can be "taken out" of a pool of letters exactly when its
//! signature is dominated by the pool's.

use std::fmt;
use std::ops::{Add, Index};

/// Number of letters in the canonical alphabet.
pub const ALPHABET_LEN: usize = 26;

/// Strips everything outside `A`-`Z` (case-insensitively) and uppercases the rest.
pub fn canonicalize(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Letter counts of a canonicalized word, one component per letter.
///
/// The derived ordering is lexicographic over the components (`A` first),
/// which is the total order combination search uses to keep tuples sorted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Signature([u32; ALPHABET_LEN]);

impl Signature {
    /// The all-zero signature.
    pub const ZERO: Signature = Signature([0; ALPHABET_LEN]);

    pub fn new(counts: [u32; ALPHABET_LEN]) -> Self {
        Signature(counts)
    }

    /// Signature of an arbitrary string; non-letters never contribute.
    pub fn of(word: &str) -> Self {
        let mut counts = [0; ALPHABET_LEN];
        for b in word.bytes().filter(u8::is_ascii_alphabetic) {
            counts[(b.to_ascii_uppercase() - b'A') as usize] += 1;
        }
        Signature(counts)
    }

    pub fn components(&self) -> &[u32; ALPHABET_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Total number of letters counted.
    pub fn letter_count(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }

    /// `true` iff every component of `self` is `<=` the same component of `other`.
    pub fn is_dominated_by(&self, other: &Signature) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// Component-wise `self - other`, or `None` unless `other` is dominated by `self`.
    pub fn checked_sub(&self, other: &Signature) -> Option<Signature> {
        let mut counts = [0; ALPHABET_LEN];
        for (i, slot) in counts.iter_mut().enumerate() {
            *slot = self.0[i].checked_sub(other.0[i])?;
        }
        Some(Signature(counts))
    }
}

impl Index<usize> for Signature {
    type Output = u32;

    fn index(&self, letter: usize) -> &u32 {
        &self.0[letter]
    }
}

impl Add for Signature {
    type Output = Signature;

    fn add(mut self, rhs: Signature) -> Signature {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
        self
    }
}

impl From<&str> for Signature {
    fn from(word: &str) -> Self {
        Signature::of(word)
    }
}

// Prints as the sorted letters, e.g. `ACT` for "cat".
impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Signature(")?;
        for (i, &count) in self.0.iter().enumerate() {
            for _ in 0..count {
                write!(f, "{}", (b'A' + i as u8) as char)?;
            }
        }
        f.write_str(")")
    }
}
