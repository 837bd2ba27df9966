//! Persistent clause sequences.
//!
//! A [`ClauseChain`] is an append-only radix trie with a tail buffer. Clauses
//! are stored in leaves of up to 32 entries; the most recent leaf lives in
//! the tail until it is full and is then linked into the trie. Appending
//! copies only the tail and the path to the rightmost leaf, so chains grown
//! from a common prefix share every other node.
//!
//! ```text
//! prefix              root ─┬─ leaf[c0..c31]
//!                           └─ tail[c32, c33]
//! left  = push(c34):  same root, tail[c32, c33, c34]
//! right = push(c35):  same root, tail[c32, c33, c35]
//! ```
//!
//! Scanning walks the leaves front to back and stops at the first
//! qualifying clause; clauses after it are never visited.

use std::slice;
use std::sync::Arc;

use smallvec::SmallVec;

use super::pattern::Pattern;

/// A shared clause handler, applied to the match argument.
pub(crate) type Handler<A, R> = Arc<dyn Fn(A) -> R + Send + Sync>;

/// A shared guard, evaluated independently of the match argument.
pub(crate) type Guard = Arc<dyn Fn() -> bool + Send + Sync>;

/// Branching factor (2^5 = 32)
const BRANCHING_FACTOR: usize = 32;

/// Bits per level in the trie
const BITS_PER_LEVEL: usize = 5;

/// Bit mask for extracting index within a node
const MASK: usize = BRANCHING_FACTOR - 1;

/// Levels needed to address any `usize` length.
const MAX_DEPTH: usize = usize::BITS.div_ceil(BITS_PER_LEVEL as u32) as usize;

/// One `(matcher, handler, guard)` triple.
pub(crate) struct Clause<A, R> {
    pattern: Pattern<A>,
    handler: Handler<A, R>,
    guard: Option<Guard>,
}

impl<A, R> Clause<A, R> {
    pub(crate) fn new(pattern: Pattern<A>, handler: Handler<A, R>, guard: Option<Guard>) -> Self {
        Self {
            pattern,
            handler,
            guard,
        }
    }

    /// The matcher must hold and the guard, if any, must return `true`.
    ///
    /// The guard is only consulted once the matcher holds.
    pub(crate) fn qualifies(&self, argument: &A) -> bool
    where
        A: PartialEq,
    {
        self.pattern.matches(argument) && self.guard.as_ref().is_none_or(|guard| guard())
    }

    pub(crate) fn apply(&self, argument: A) -> R {
        (self.handler)(argument)
    }
}

type Entry<A, R> = Arc<Clause<A, R>>;

enum Node<A, R> {
    /// Children in registration order; never more than `BRANCHING_FACTOR`.
    Branch(Vec<Arc<Self>>),
    /// A full leaf of exactly `BRANCHING_FACTOR` clauses.
    Leaf(Arc<[Entry<A, R>]>),
}

impl<A, R> Node<A, R> {
    /// Wraps `node` in single-child branches up to `level`.
    fn new_path(level: usize, node: Self) -> Self {
        if level == 0 {
            node
        } else {
            Self::Branch(vec![Arc::new(Self::new_path(level - BITS_PER_LEVEL, node))])
        }
    }

    /// Returns a copy of this branch with `leaf` linked at `tail_offset`.
    fn push_tail(&self, level: usize, tail_offset: usize, leaf: Self) -> Self {
        let Self::Branch(children) = self else {
            return leaf;
        };
        let mut children = children.clone();

        if level == BITS_PER_LEVEL {
            children.push(Arc::new(leaf));
        } else {
            let index = (tail_offset >> level) & MASK;
            match children.get(index).cloned() {
                Some(child) => {
                    children[index] =
                        Arc::new(child.push_tail(level - BITS_PER_LEVEL, tail_offset, leaf));
                }
                None => children.push(Arc::new(Self::new_path(level - BITS_PER_LEVEL, leaf))),
            }
        }

        Self::Branch(children)
    }
}

/// An immutable, append-only sequence of clauses with structural sharing.
pub(crate) struct ClauseChain<A, R> {
    /// Total number of clauses
    length: usize,
    /// Shift amount for the root level: (depth - 1) * `BITS_PER_LEVEL`
    shift: usize,
    /// Root branch holding every full leaf
    root: Arc<Node<A, R>>,
    /// The most recent clauses, up to `BRANCHING_FACTOR`
    tail: Arc<[Entry<A, R>]>,
}

impl<A, R> ClauseChain<A, R> {
    pub(crate) fn new() -> Self {
        Self {
            length: 0,
            shift: BITS_PER_LEVEL,
            root: Arc::new(Node::Branch(Vec::new())),
            tail: Arc::from(Vec::new()),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Index of the first clause held in the tail.
    const fn tail_offset(&self) -> usize {
        if self.length < BRANCHING_FACTOR {
            0
        } else {
            ((self.length - 1) >> BITS_PER_LEVEL) << BITS_PER_LEVEL
        }
    }

    /// Returns a new chain with `clause` appended; `self` is unchanged.
    pub(crate) fn push(&self, clause: Clause<A, R>) -> Self {
        let entry = Arc::new(clause);

        if self.tail.len() < BRANCHING_FACTOR {
            let mut tail = Vec::with_capacity(self.tail.len() + 1);
            tail.extend(self.tail.iter().cloned());
            tail.push(entry);
            return Self {
                length: self.length + 1,
                shift: self.shift,
                root: Arc::clone(&self.root),
                tail: Arc::from(tail),
            };
        }

        // The tail is full: it becomes a leaf, shared rather than copied.
        let leaf = Node::Leaf(Arc::clone(&self.tail));
        let tail_offset = self.tail_offset();

        let (root, shift) = if (tail_offset >> self.shift) >= BRANCHING_FACTOR {
            let children = vec![
                Arc::clone(&self.root),
                Arc::new(Node::new_path(self.shift, leaf)),
            ];
            (Node::Branch(children), self.shift + BITS_PER_LEVEL)
        } else {
            (self.root.push_tail(self.shift, tail_offset, leaf), self.shift)
        };

        Self {
            length: self.length + 1,
            shift,
            root: Arc::new(root),
            tail: Arc::from(vec![entry]),
        }
    }

    /// Iterates the clauses in registration order.
    pub(crate) fn iter(&self) -> Clauses<'_, A, R> {
        let mut iterator = Clauses {
            stack: SmallVec::new(),
            leaf: slice::Iter::default(),
            tail: Some(&self.tail),
        };
        match self.root.as_ref() {
            Node::Branch(children) => iterator.stack.push(children.iter()),
            Node::Leaf(entries) => iterator.leaf = entries.iter(),
        }
        iterator
    }

    /// Returns the first qualifying clause and its 0-based position.
    ///
    /// Clauses after the returned one are not examined.
    pub(crate) fn first_match(&self, argument: &A) -> Option<(usize, &Clause<A, R>)>
    where
        A: PartialEq,
    {
        self.iter()
            .enumerate()
            .find(|(_, clause)| clause.qualifies(argument))
    }
}

impl<A, R> Clone for ClauseChain<A, R> {
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            shift: self.shift,
            root: Arc::clone(&self.root),
            tail: Arc::clone(&self.tail),
        }
    }
}

/// A lazy front-to-back walk over a [`ClauseChain`].
///
/// Descends into one leaf at a time, so reaching the `n`-th clause costs the
/// trie depth plus `n` steps regardless of the chain length.
pub(crate) struct Clauses<'a, A, R> {
    /// Unvisited siblings at each level of the current path
    stack: SmallVec<[slice::Iter<'a, Arc<Node<A, R>>>; MAX_DEPTH]>,
    /// Remaining clauses of the current leaf
    leaf: slice::Iter<'a, Entry<A, R>>,
    /// The tail, until the trie is exhausted
    tail: Option<&'a Arc<[Entry<A, R>]>>,
}

impl<'a, A, R> Iterator for Clauses<'a, A, R> {
    type Item = &'a Clause<A, R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.leaf.next() {
                return Some(entry.as_ref());
            }

            let Some(siblings) = self.stack.last_mut() else {
                self.leaf = self.tail.take()?.iter();
                continue;
            };

            match siblings.next().map(|node| &**node) {
                Some(Node::Branch(children)) => self.stack.push(children.iter()),
                Some(Node::Leaf(entries)) => self.leaf = entries.iter(),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn literal(value: i32) -> Clause<i32, i32> {
        Clause::new(Pattern::value(value), Arc::new(move |_: i32| value), None)
    }

    fn chain_of(values: std::ops::Range<i32>) -> ClauseChain<i32, i32> {
        values.fold(ClauseChain::new(), |chain, value| chain.push(literal(value)))
    }

    fn labels(chain: &ClauseChain<i32, i32>) -> Vec<i32> {
        chain.iter().map(|clause| clause.apply(0)).collect()
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(32)]
    #[case(33)]
    #[case(1056)]
    #[case(1057)]
    #[case(40_000)]
    fn test_iter_follows_registration_order(#[case] length: i32) {
        let chain = chain_of(0..length);
        assert_eq!(labels(&chain), (0..length).collect::<Vec<_>>());
        assert_eq!(chain.len(), usize::try_from(length).unwrap());
    }

    #[rstest]
    fn test_push_leaves_prefix_untouched() {
        let prefix = chain_of(0..2);
        let left = prefix.push(literal(10));
        let right = prefix.push(literal(20));

        assert_eq!(labels(&prefix), vec![0, 1]);
        assert_eq!(labels(&left), vec![0, 1, 10]);
        assert_eq!(labels(&right), vec![0, 1, 20]);
    }

    #[rstest]
    #[case(32)]
    #[case(1056)]
    fn test_branches_split_at_full_tail(#[case] length: i32) {
        let prefix = chain_of(0..length);
        let left = prefix.push(literal(-1));
        let right = prefix.push(literal(-2)).push(literal(-3));

        assert_eq!(labels(&prefix).len(), prefix.len());
        assert_eq!(labels(&left).last(), Some(&-1));
        assert_eq!(labels(&right)[prefix.len()..], [-2, -3]);
        assert_eq!(left.first_match(&-2).map(|(position, _)| position), None);
    }

    #[rstest]
    fn test_guard_checked_after_matcher() {
        let guard: Guard =
            Arc::new(|| -> bool { panic!("guard must not run for a non-matching argument") });
        let guarded: Clause<i32, ()> =
            Clause::new(Pattern::value(1), Arc::new(|_: i32| ()), Some(guard));
        assert!(!guarded.qualifies(&2));
    }

    #[rstest]
    fn test_first_match_position() {
        let chain = chain_of(0..3).push(literal(1));
        let (position, clause) = chain.first_match(&1).expect("a clause matches 1");
        assert_eq!(position, 1);
        assert_eq!(clause.apply(1), 1);
        assert!(chain.first_match(&7).is_none());
    }

    #[rstest]
    #[case(0)]
    #[case(31)]
    #[case(5_000)]
    fn test_scan_stops_at_first_match_in_long_chain(#[case] target: usize) {
        let visits = Arc::new(AtomicUsize::new(0));
        let chain = (0..100_000_usize).fold(ClauseChain::new(), |chain, index| {
            let visits = Arc::clone(&visits);
            let pattern = Pattern::predicate(move |argument: &usize| {
                visits.fetch_add(1, Ordering::SeqCst);
                *argument == index
            });
            chain.push(Clause::new(pattern, Arc::new(|argument: usize| argument), None))
        });

        let (position, _) = chain.first_match(&target).expect("a clause matches");
        assert_eq!(position, target);
        assert_eq!(visits.load(Ordering::SeqCst), target + 1);
    }

    #[rstest]
    fn test_long_chain_drops() {
        let chain = chain_of(0..200_000);
        assert_eq!(chain.len(), 200_000);
        drop(chain);
    }

    #[rstest]
    fn test_branches_sharing_prefix_drop_on_separate_threads() {
        for _ in 0..8 {
            let prefix = chain_of(0..50_000);
            let left = prefix.push(literal(-1));
            let right = prefix.push(literal(-2));
            drop(prefix);

            let handles = [left, right].map(|branch| thread::spawn(move || drop(branch)));
            for handle in handles {
                handle.join().expect("drop completes without overflowing the stack");
            }
        }
    }
}
