//! Multi-word anagram search.
//!
//! Words are reduced to letter-frequency [`Signature`]s. The distinct
//! signatures of a word list go into a [`SignatureTrie`], which can list every
//! member that fits inside a pool of letters without scanning the rest. A
//! search repeatedly takes such a member out of the query's letters until none
//! are left, then expands each resulting signature tuple into words.
//!
//! ```
//! let mut anagrams: Vec<_> = anagrams::find_anagrams("cat", ["act", "cat", "dog"], 1).collect();
//! anagrams.sort();
//! assert_eq!(anagrams, [["ACT"], ["CAT"]]);
//! ```

mod anagrammer;
mod dictionary;
mod error;
mod search;
mod signature;
mod trie;
mod words;

pub use anagrammer::{find_anagrams, Anagrammer, Anagrams, SearchOptions};
pub use dictionary::{Dictionary, Expansion};
pub use error::{AnagramError, Result};
pub use search::Combinations;
pub use signature::{canonicalize, Signature, ALPHABET_LEN};
pub use trie::{DominatedBy, SignatureTrie};
pub use words::{read_word_list, DEFAULT_WORD_LIST};
