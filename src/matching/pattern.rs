//! Clause matchers.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::union::Union2;

/// A shared predicate over the match argument.
pub(crate) type Predicate<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;

/// Literal sets up to this size are stored inline.
const INLINE_LITERALS: usize = 4;

/// The matcher half of a match clause.
///
/// A pattern is either a finite set of literal values, matched by equality,
/// or a predicate over the argument. It is encoded as a [`Union2`] of the
/// two forms.
///
/// # Examples
///
/// ```rust
/// use casematch::matching::Pattern;
///
/// assert!(Pattern::value(3).matches(&3));
/// assert!(Pattern::one_of([1, 2, 3]).matches(&2));
/// assert!(!Pattern::one_of(Vec::<i32>::new()).matches(&2));
/// assert!(Pattern::predicate(|n: &i32| n % 2 == 0).matches(&4));
/// ```
#[derive(Clone)]
pub struct Pattern<A>(Union2<SmallVec<[A; INLINE_LITERALS]>, Predicate<A>>);

impl<A> Pattern<A> {
    /// Matches arguments equal to `value`.
    pub fn value(value: A) -> Self {
        let mut values = SmallVec::new();
        values.push(value);
        Self(Union2::Case1(values))
    }

    /// Matches arguments equal to any of `values`.
    ///
    /// An empty set matches nothing.
    pub fn one_of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        Self(Union2::Case1(values.into_iter().collect()))
    }

    /// Matches arguments for which `predicate` returns `true`.
    pub fn predicate<P>(predicate: P) -> Self
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        Self(Union2::Case2(Arc::new(predicate)))
    }

    /// Returns `true` if this is a literal-set pattern.
    pub const fn is_literal(&self) -> bool {
        self.0.is_case1()
    }

    /// Tests the pattern against `argument`.
    ///
    /// Literal sets are scanned in order and compared with `==`.
    pub fn matches(&self, argument: &A) -> bool
    where
        A: PartialEq,
    {
        self.0.as_ref().fold(
            |values| values.iter().any(|value| value == argument),
            |predicate| predicate(argument),
        )
    }
}

impl<A: fmt::Debug> fmt::Debug for Pattern<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Union2::Case1(values) => formatter
                .debug_tuple("OneOf")
                .field(&values.as_slice())
                .finish(),
            Union2::Case2(_) => formatter.write_str("Predicate(..)"),
        }
    }
}
