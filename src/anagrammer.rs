use std::path::Path;

use tracing::debug;

use crate::dictionary::{Dictionary, ExpansionCursor};
use crate::error::{AnagramError, Result};
use crate::search::CombinationCursor;
use crate::signature::Signature;
use crate::trie::SignatureTrie;
use crate::words::read_word_list;

/// Bounds applied to a single search.
///
/// The defaults impose no restriction beyond ignoring empty words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Shortest dictionary word considered; `0` behaves as `1`.
    pub min_word_length: usize,
    pub max_word_length: usize,
    /// Fewest words per anagram.
    pub min_words: usize,
    /// Most words per anagram.
    pub max_words: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            min_word_length: 1,
            max_word_length: usize::MAX,
            min_words: 0,
            max_words: usize::MAX,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<()> {
        if self.min_word_length.max(1) > self.max_word_length {
            return Err(AnagramError::invalid_option(
                "max_word_length",
                format!(
                    "{} is below the minimum word length {}",
                    self.max_word_length,
                    self.min_word_length.max(1)
                ),
            ));
        }
        if self.min_words > self.max_words {
            return Err(AnagramError::invalid_option(
                "max_words",
                format!("{} is below the minimum word count {}", self.max_words, self.min_words),
            ));
        }
        Ok(())
    }
}

/// A word list prepared for anagram searches.
///
/// Searching consumes the anagrammer, since the dictionary is narrowed down to
/// the query's letters; clone it to run several queries against one list.
#[derive(Debug, Clone, Default)]
pub struct Anagrammer {
    dictionary: Dictionary,
}

impl Anagrammer {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dictionary: Dictionary = words.into_iter().collect();
        debug!(
            signatures = dictionary.len(),
            words = dictionary.word_count(),
            "built dictionary"
        );
        Anagrammer { dictionary }
    }

    pub fn from_dictionary_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Anagrammer::from_words(read_word_list(path)?))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Drops words that cannot be taken out of `pool`.
    pub fn restrict(&mut self, pool: &Signature) {
        self.dictionary.retain(|signature, _| signature.is_dominated_by(pool));
    }

    pub fn restrict_letters(&mut self, min_letters: usize, max_letters: usize) {
        self.dictionary.retain_lengths(min_letters.max(1), max_letters);
    }

    /// Lazily enumerates every anagram of `query` allowed by `options`.
    pub fn find_anagrams(self, query: &str, options: &SearchOptions) -> Result<Anagrams> {
        options.validate()?;
        Ok(self.search(Signature::of(query), options))
    }

    fn search(mut self, query: Signature, options: &SearchOptions) -> Anagrams {
        self.restrict_letters(options.min_word_length, options.max_word_length);
        self.restrict(&query);

        let trie = self.dictionary.build_trie();
        debug!(?query, candidates = trie.len(), "indexed candidate signatures");

        let combinations =
            CombinationCursor::new(&trie, query, options.min_words..=options.max_words);
        Anagrams {
            trie,
            dictionary: self.dictionary,
            combinations,
            expansion: None,
        }
    }
}

/// Every anagram of `query` using words from `words` of at least
/// `min_word_length` letters.
///
/// Each item is one tuple of canonicalized (uppercase, letters-only) words. A
/// query without letters has exactly one anagram: the empty tuple.
pub fn find_anagrams<I, S>(query: &str, words: I, min_word_length: usize) -> Anagrams
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let options = SearchOptions {
        min_word_length,
        ..SearchOptions::default()
    };
    Anagrammer::from_words(words).search(Signature::of(query), &options)
}

/// Lazy stream of anagrams; owns the indices it searches.
///
/// Each call to `next` does only the work needed for one more result.
#[derive(Debug, Clone)]
pub struct Anagrams {
    trie: SignatureTrie,
    dictionary: Dictionary,
    combinations: CombinationCursor,
    expansion: Option<ExpansionCursor>,
}

impl Iterator for Anagrams {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Vec<String>> {
        loop {
            if let Some(expansion) = self.expansion.as_mut() {
                if let Some(words) = expansion.advance(&self.dictionary) {
                    return Some(words);
                }
            }
            let tuple = self.combinations.advance(&self.trie)?;
            self.expansion = Some(ExpansionCursor::new(&self.dictionary, &tuple));
        }
    }
}
