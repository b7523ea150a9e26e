//! Prefix tree over signatures.
//!
//! Every member signature is a path of exactly [`ALPHABET_LEN`] edges from the
//! root, one edge per letter count (`A` first). Nodes live in a flat arena and
//! refer to their children by index, so queries can keep their position as
//! plain integers and resume against any borrow of the tree.

use crate::signature::{Signature, ALPHABET_LEN};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    /// Sorted by component value.
    children: Vec<(u32, NodeId)>,
    terminal: bool,
}

/// The set of distinct signatures present in a dictionary.
#[derive(Debug, Clone)]
pub struct SignatureTrie {
    nodes: Vec<Node>,
    len: usize,
}

impl Default for SignatureTrie {
    fn default() -> Self {
        SignatureTrie::new()
    }
}

impl SignatureTrie {
    pub fn new() -> Self {
        SignatureTrie {
            nodes: vec![Node::default()],
            len: 0,
        }
    }

    /// Number of distinct member signatures.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `signature`, returning `false` if it was already a member.
    pub fn insert(&mut self, signature: &Signature) -> bool {
        let mut node = ROOT;
        for &value in signature.components() {
            let children = &self.nodes[node].children;
            node = match children.binary_search_by_key(&value, |&(v, _)| v) {
                Ok(i) => children[i].1,
                Err(i) => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.insert(i, (value, child));
                    child
                }
            };
        }

        let inserted = !self.nodes[node].terminal;
        self.nodes[node].terminal = true;
        self.len += inserted as usize;
        inserted
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        let mut node = ROOT;
        for &value in signature.components() {
            let children = &self.nodes[node].children;
            match children.binary_search_by_key(&value, |&(v, _)| v) {
                Ok(i) => node = children[i].1,
                Err(_) => return false,
            }
        }
        self.nodes[node].terminal
    }

    /// Every member `s` with `s <= query` component-wise and `s >= lower_bound`
    /// lexicographically, in ascending order.
    ///
    /// Only subtrees that can still lead to such a member are visited: at each
    /// level the child values are clamped to `query` above and, while the path
    /// so far equals the bound's prefix, to `lower_bound` below.
    pub fn dominated_by(&self, query: &Signature, lower_bound: &Signature) -> DominatedBy<'_> {
        DominatedBy {
            trie: self,
            cursor: DominanceCursor::new(self, *query, *lower_bound),
        }
    }

    /// All members in ascending order.
    pub fn iter(&self) -> DominatedBy<'_> {
        self.dominated_by(&Signature::new([u32::MAX; ALPHABET_LEN]), &Signature::ZERO)
    }
}

#[derive(Debug, Clone)]
struct Frame {
    node: NodeId,
    next: usize,
    end: usize,
    /// Path so far equals the lower bound's prefix.
    bounded: bool,
}

/// Resumable state of a dominance query.
///
/// Holds no borrow of the tree; every step is driven with the tree it was
/// created from.
#[derive(Debug, Clone)]
pub(crate) struct DominanceCursor {
    query: Signature,
    lower: Signature,
    prefix: [u32; ALPHABET_LEN],
    stack: Vec<Frame>,
}

impl DominanceCursor {
    pub(crate) fn new(trie: &SignatureTrie, query: Signature, lower: Signature) -> Self {
        let mut stack = Vec::with_capacity(ALPHABET_LEN);
        stack.extend(Self::frame(trie, ROOT, 0, true, &query, &lower));
        DominanceCursor {
            query,
            lower,
            prefix: [0; ALPHABET_LEN],
            stack,
        }
    }

    fn frame(
        trie: &SignatureTrie,
        node: NodeId,
        level: usize,
        bounded: bool,
        query: &Signature,
        lower: &Signature,
    ) -> Option<Frame> {
        let lo = if bounded { lower[level] } else { 0 };
        let hi = query[level];
        if lo > hi {
            return None;
        }

        let children = &trie.nodes[node].children;
        Some(Frame {
            node,
            next: children.partition_point(|&(v, _)| v < lo),
            end: children.partition_point(|&(v, _)| v <= hi),
            bounded,
        })
    }

    pub(crate) fn advance(&mut self, trie: &SignatureTrie) -> Option<Signature> {
        loop {
            let level = self.stack.len().checked_sub(1)?;
            let frame = &mut self.stack[level];
            if frame.next == frame.end {
                self.stack.pop();
                continue;
            }

            let (value, child) = trie.nodes[frame.node].children[frame.next];
            frame.next += 1;
            let bounded = frame.bounded && value == self.lower[level];
            self.prefix[level] = value;

            if level + 1 == ALPHABET_LEN {
                if trie.nodes[child].terminal {
                    return Some(Signature::new(self.prefix));
                }
            } else if let Some(frame) =
                Self::frame(trie, child, level + 1, bounded, &self.query, &self.lower)
            {
                self.stack.push(frame);
            }
        }
    }
}

/// Iterator returned by [`SignatureTrie::dominated_by`].
#[derive(Debug, Clone)]
pub struct DominatedBy<'a> {
    trie: &'a SignatureTrie,
    cursor: DominanceCursor,
}

impl Iterator for DominatedBy<'_> {
    type Item = Signature;

    fn next(&mut self) -> Option<Signature> {
        self.cursor.advance(self.trie)
    }
}
