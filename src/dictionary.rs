use std::collections::HashMap;

use tracing::trace;

use crate::signature::{canonicalize, Signature};
use crate::trie::SignatureTrie;

/// Canonicalized words grouped by signature.
///
/// Every stored list is non-empty, keeps first-appearance order and holds
/// each canonical word once. Words without letters are never stored.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    index: HashMap<Signature, usize>,
    lists: Vec<Vec<String>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Canonicalizes and stores `word`, returning its signature if it was kept.
    pub fn insert(&mut self, word: &str) -> Option<Signature> {
        let word = canonicalize(word);
        if word.is_empty() {
            return None;
        }

        let signature = Signature::of(&word);
        let slot = *self.index.entry(signature).or_insert_with(|| {
            self.lists.push(Vec::new());
            self.lists.len() - 1
        });
        let words = &mut self.lists[slot];
        if !words.contains(&word) {
            words.push(word);
        }
        Some(signature)
    }

    pub fn get(&self, signature: &Signature) -> Option<&[String]> {
        self.slot(signature).map(|slot| self.lists[slot].as_slice())
    }

    fn slot(&self, signature: &Signature) -> Option<usize> {
        self.index.get(signature).copied()
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct canonical words.
    pub fn word_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.index.keys()
    }

    /// Keeps only the words of the signatures for which `f` returns `true`.
    pub fn retain<F: FnMut(&Signature, &[String]) -> bool>(&mut self, mut f: F) {
        let mut lists: Vec<Option<Vec<String>>> =
            std::mem::take(&mut self.lists).into_iter().map(Some).collect();
        for (signature, slot) in std::mem::take(&mut self.index) {
            let Some(words) = lists[slot].take() else {
                continue;
            };
            if f(&signature, &words) {
                self.index.insert(signature, self.lists.len());
                self.lists.push(words);
            }
        }
    }

    /// Keeps only words whose length lies in `min..=max`.
    pub fn retain_lengths(&mut self, min: usize, max: usize) {
        self.retain(|signature, _| {
            let len = signature.letter_count();
            len >= min && len <= max
        });
    }

    /// Builds the set of signatures present in this dictionary.
    pub fn build_trie(&self) -> SignatureTrie {
        let mut trie = SignatureTrie::new();
        for signature in self.index.keys() {
            trie.insert(signature);
        }
        trie
    }

    /// Every word tuple realizing `tuple`: the cartesian product of the word
    /// lists of its signatures, head word varying slowest.
    pub fn expand(&self, tuple: &[Signature]) -> Expansion<'_> {
        Expansion {
            dictionary: self,
            cursor: ExpansionCursor::new(self, tuple),
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        for word in iter {
            dictionary.insert(word.as_ref());
        }
        dictionary
    }
}

/// Odometer over the word lists of a signature tuple; the last position turns fastest.
///
/// Lists are resolved to their slots once, so advancing never hashes.
#[derive(Debug, Clone)]
pub(crate) struct ExpansionCursor {
    slots: Vec<usize>,
    positions: Vec<usize>,
    done: bool,
}

impl ExpansionCursor {
    pub(crate) fn new(dictionary: &Dictionary, tuple: &[Signature]) -> Self {
        let slots: Option<Vec<usize>> = tuple.iter().map(|s| dictionary.slot(s)).collect();
        let slots = slots.unwrap_or_default();
        let done = slots.len() != tuple.len()
            || slots.iter().any(|&slot| dictionary.lists[slot].is_empty());
        ExpansionCursor {
            positions: vec![0; slots.len()],
            slots,
            done,
        }
    }

    pub(crate) fn advance(&mut self, dictionary: &Dictionary) -> Option<Vec<String>> {
        if self.done {
            return None;
        }

        let words: Vec<String> = self
            .slots
            .iter()
            .zip(&self.positions)
            .map(|(&slot, &i)| dictionary.lists[slot][i].clone())
            .collect();
        trace!(?words, "expanded");

        self.done = true;
        for (position, &slot) in self.positions.iter_mut().zip(&self.slots).rev() {
            *position += 1;
            if *position < dictionary.lists[slot].len() {
                self.done = false;
                break;
            }
            *position = 0;
        }
        Some(words)
    }
}

/// Iterator returned by [`Dictionary::expand`].
#[derive(Debug, Clone)]
pub struct Expansion<'a> {
    dictionary: &'a Dictionary,
    cursor: ExpansionCursor,
}

impl Iterator for Expansion<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        self.cursor.advance(self.dictionary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_signature() {
        let dictionary: Dictionary = ["cat", "Act", "dog", "god", "Cat!"].into_iter().collect();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.word_count(), 4);
        assert_eq!(dictionary.get(&Signature::of("tac")), Some(&["CAT".to_string(), "ACT".to_string()][..]));
        assert_eq!(dictionary.get(&Signature::of("x")), None);
    }

    #[test]
    fn letterless_words_are_dropped() {
        let mut dictionary = Dictionary::new();
        assert_eq!(dictionary.insert("  \n"), None);
        assert_eq!(dictionary.insert("123-!"), None);
        assert!(dictionary.is_empty());
        assert!(dictionary.build_trie().is_empty());
    }

    #[test]
    fn trie_and_dictionary_agree() {
        let dictionary: Dictionary = ["a", "b", "ab", "ba", "abc"].into_iter().collect();
        let trie = dictionary.build_trie();
        assert_eq!(trie.len(), dictionary.len());
        for signature in trie.iter() {
            assert!(dictionary.get(&signature).is_some());
        }
    }

    #[test]
    fn retain_lengths_filters_entries() {
        let mut dictionary: Dictionary = ["a", "ab", "abc", "abcd"].into_iter().collect();
        dictionary.retain_lengths(2, 3);
        let mut kept: Vec<_> = dictionary.signatures().map(Signature::letter_count).collect();
        kept.sort();
        assert_eq!(kept, vec![2, 3]);
    }

    #[test]
    fn expansion_is_head_major_product() {
        let dictionary: Dictionary = ["ab", "ba", "c", "cc"].into_iter().collect();
        let tuple = [Signature::of("ab"), Signature::of("c")];
        let got: Vec<_> = dictionary.expand(&tuple).collect();
        assert_eq!(
            got,
            vec![vec!["AB".to_string(), "C".to_string()], vec!["BA".to_string(), "C".to_string()]]
        );

        let tuple = [Signature::of("ab"), Signature::of("ab")];
        let got: Vec<Vec<String>> = dictionary.expand(&tuple).collect();
        let joined: Vec<String> = got.iter().map(|w| w.join(" ")).collect();
        assert_eq!(joined, ["AB AB", "AB BA", "BA AB", "BA BA"]);
    }

    #[test]
    fn expansion_survives_retain() {
        let mut dictionary: Dictionary = ["a", "cat", "act", "dog", "t", "ca"].into_iter().collect();
        dictionary.retain_lengths(2, 3);
        assert_eq!(dictionary.len(), 3);
        assert_eq!(dictionary.word_count(), 4);
        assert_eq!(dictionary.get(&Signature::of("a")), None);

        let got: Vec<String> = dictionary
            .expand(&[Signature::of("ac"), Signature::of("cat")])
            .map(|w| w.join(" "))
            .collect();
        assert_eq!(got, ["CA CAT", "CA ACT"]);
    }

    #[test]
    fn empty_tuple_expands_to_one_empty_tuple() {
        let dictionary = Dictionary::new();
        let got: Vec<_> = dictionary.expand(&[]).collect();
        assert_eq!(got, vec![Vec::<String>::new()]);
    }

    #[test]
    fn unknown_signature_expands_to_nothing() {
        let dictionary: Dictionary = ["a"].into_iter().collect();
        assert_eq!(dictionary.expand(&[Signature::of("a"), Signature::of("q")]).count(), 0);
    }
}
