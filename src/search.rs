//! Combination search: every multiset of indexed signatures summing to a query.
//!
//! Each multiset is reported once, as a tuple sorted ascending. The search
//! picks candidates in ascending order and asks the trie only for candidates
//! no smaller than the previous pick, so permutations are never produced.

use std::ops::RangeInclusive;

use tracing::trace;

use crate::signature::Signature;
use crate::trie::{DominanceCursor, SignatureTrie};

#[derive(Debug, Clone)]
struct Level {
    candidates: DominanceCursor,
    remaining: Signature,
}

/// Resumable depth-first search state.
#[derive(Debug, Clone)]
pub(crate) struct CombinationCursor {
    stack: Vec<Level>,
    chosen: Vec<Signature>,
    lengths: RangeInclusive<usize>,
    /// The zero query is solved by the empty tuple, reported once.
    empty_pending: bool,
}

impl CombinationCursor {
    pub(crate) fn new(trie: &SignatureTrie, query: Signature, lengths: RangeInclusive<usize>) -> Self {
        let mut cursor = CombinationCursor {
            stack: Vec::new(),
            chosen: Vec::new(),
            empty_pending: false,
            lengths,
        };
        if query.is_zero() {
            cursor.empty_pending = cursor.lengths.contains(&0);
        } else if *cursor.lengths.end() > 0 {
            cursor.stack.push(Level {
                candidates: DominanceCursor::new(trie, query, Signature::ZERO),
                remaining: query,
            });
        }
        cursor
    }

    pub(crate) fn advance(&mut self, trie: &SignatureTrie) -> Option<Vec<Signature>> {
        if self.empty_pending {
            self.empty_pending = false;
            return Some(Vec::new());
        }

        loop {
            let level = self.stack.last_mut()?;
            let Some(pick) = level.candidates.advance(trie) else {
                self.stack.pop();
                self.chosen.pop();
                continue;
            };
            if pick.is_zero() {
                continue;
            }

            let rest = match level.remaining.checked_sub(&pick) {
                Some(rest) => rest,
                None => continue,
            };
            self.chosen.push(pick);

            if rest.is_zero() {
                let tuple = self.chosen.clone();
                self.chosen.pop();
                if self.lengths.contains(&tuple.len()) {
                    trace!(?tuple, "combination");
                    return Some(tuple);
                }
            } else if self.chosen.len() < *self.lengths.end() {
                self.stack.push(Level {
                    candidates: DominanceCursor::new(trie, rest, pick),
                    remaining: rest,
                });
            } else {
                self.chosen.pop();
            }
        }
    }
}

/// Iterator returned by [`SignatureTrie::combinations`].
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    trie: &'a SignatureTrie,
    cursor: CombinationCursor,
}

impl Iterator for Combinations<'_> {
    type Item = Vec<Signature>;

    fn next(&mut self) -> Option<Vec<Signature>> {
        self.cursor.advance(self.trie)
    }
}

impl SignatureTrie {
    /// Every ascending tuple of members whose component-wise sum is `query`,
    /// in ascending lexicographic order of the tuples.
    pub fn combinations(&self, query: &Signature) -> Combinations<'_> {
        self.combinations_with_lengths(query, 0..=usize::MAX)
    }

    /// Like [`combinations`](Self::combinations), restricted to tuples whose
    /// length lies in `lengths`. Deeper tuples are never explored.
    pub fn combinations_with_lengths(
        &self,
        query: &Signature,
        lengths: RangeInclusive<usize>,
    ) -> Combinations<'_> {
        Combinations {
            trie: self,
            cursor: CombinationCursor::new(self, *query, lengths),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn trie_of(words: &[&str]) -> SignatureTrie {
        let mut trie = SignatureTrie::new();
        for word in words {
            trie.insert(&Signature::of(word));
        }
        trie
    }

    fn sum(tuple: &[Signature]) -> Signature {
        tuple.iter().fold(Signature::ZERO, |acc, &s| acc + s)
    }

    /// All ascending tuples over `members` summing to `query`, by exhaustive search.
    fn brute_force(members: &[Signature], query: Signature) -> BTreeSet<Vec<Signature>> {
        fn go(
            members: &[Signature],
            from: usize,
            remaining: Signature,
            chosen: &mut Vec<Signature>,
            out: &mut BTreeSet<Vec<Signature>>,
        ) {
            if remaining.is_zero() {
                out.insert(chosen.clone());
                return;
            }
            for (i, member) in members.iter().enumerate().skip(from) {
                if let Some(rest) = remaining.checked_sub(member) {
                    chosen.push(*member);
                    go(members, i, rest, chosen, out);
                    chosen.pop();
                }
            }
        }

        let mut sorted = members.to_vec();
        sorted.sort();
        let mut out = BTreeSet::new();
        go(&sorted, 0, query, &mut Vec::new(), &mut out);
        out
    }

    #[test]
    fn zero_query_yields_only_empty_tuple() {
        let trie = trie_of(&["a", "b"]);
        let got: Vec<_> = trie.combinations(&Signature::ZERO).collect();
        assert_eq!(got, vec![Vec::<Signature>::new()]);

        let empty = SignatureTrie::new();
        assert_eq!(empty.combinations(&Signature::of("")).count(), 1);
    }

    #[test]
    fn unreachable_query_yields_nothing() {
        let trie = trie_of(&["abc"]);
        assert_eq!(trie.combinations(&Signature::of("xyz")).count(), 0);
        assert_eq!(trie.combinations(&Signature::of("ab")).count(), 0);
    }

    #[test]
    fn tuples_sum_to_query() {
        let trie = trie_of(&["a", "b", "ab", "aab", "bb", "ba", "c", "abc"]);
        let query = Signature::of("aabbc");
        let mut count = 0;
        for tuple in trie.combinations(&query) {
            assert_eq!(sum(&tuple), query);
            count += 1;
        }
        assert!(count > 0);
    }

    #[test]
    fn no_permutations_are_repeated() {
        let trie = trie_of(&["x", "y", "xy"]);
        let got: Vec<_> = trie.combinations(&Signature::of("xy")).collect();
        // {Y, X} and {XY}; never {X, Y} as a second result
        assert_eq!(got.len(), 2);
        let as_sets: BTreeSet<BTreeSet<Signature>> =
            got.iter().map(|t| t.iter().copied().collect()).collect();
        assert_eq!(as_sets.len(), got.len());
        for tuple in &got {
            assert!(tuple.windows(2).all(|w| w[0] <= w[1]), "{tuple:?}");
        }
    }

    #[test]
    fn results_are_in_ascending_order() {
        let trie = trie_of(&["a", "b", "c", "ab", "bc", "ac", "abc", "aa"]);
        let got: Vec<_> = trie.combinations(&Signature::of("aabc")).collect();
        let mut sorted = got.clone();
        sorted.sort();
        assert_eq!(got, sorted);
    }

    #[test]
    fn repeated_signatures_are_allowed() {
        let trie = trie_of(&["a", "b"]);
        let got: Vec<_> = trie.combinations(&Signature::of("aab")).collect();
        let (a, b) = (Signature::of("a"), Signature::of("b"));
        assert_eq!(got, vec![vec![b, a, a]]);
    }

    #[test]
    fn matches_brute_force_on_small_dictionaries() {
        let dictionaries: [&[&str]; 4] = [
            &["a", "b", "ab", "ba", "abb", "c", "cab", "bc"],
            &["on", "no", "to", "ton", "not", "o", "t", "n", "tot"],
            &["cat", "act", "dog", "god", "ca", "t", "do", "g"],
            &["ee", "e", "eel", "l", "le", "leel"],
        ];
        let queries = ["abbc", "aabbcc", "onto", "ntoot", "catdog", "godact", "eelee", "leel"];

        for words in dictionaries {
            let trie = trie_of(words);
            let members: Vec<_> = trie.iter().collect();
            for query in queries {
                let query = Signature::of(query);
                let got: Vec<_> = trie.combinations(&query).collect();
                let unique: BTreeSet<_> = got.iter().cloned().collect();
                assert_eq!(unique.len(), got.len(), "duplicates for {query:?}");
                assert_eq!(unique, brute_force(&members, query), "{words:?} {query:?}");
            }
        }
    }

    #[test]
    fn length_range_bounds_tuples() {
        let trie = trie_of(&["a", "aa", "aaa"]);
        let query = Signature::of("aaa");
        assert_eq!(trie.combinations(&query).count(), 3);

        let short: Vec<_> = trie.combinations_with_lengths(&query, 0..=2).collect();
        assert!(short.iter().all(|t| t.len() <= 2));
        assert_eq!(short.len(), 2);

        let long: Vec<_> = trie.combinations_with_lengths(&query, 3..=3).collect();
        assert_eq!(long, vec![vec![Signature::of("a"); 3]]);

        assert_eq!(trie.combinations_with_lengths(&query, 0..=0).count(), 0);
        assert_eq!(trie.combinations_with_lengths(&Signature::ZERO, 1..=3).count(), 0);
    }
}
