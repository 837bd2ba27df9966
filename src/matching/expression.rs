//! Fluent match expression builders and their evaluation.

use std::fmt;
use std::sync::Arc;

use super::chain::{Clause, ClauseChain, Guard, Handler};
use super::pattern::Pattern;
use crate::error::MatchError;

/// Starts a match expression over `argument`.
///
/// # Examples
///
/// ```rust
/// use casematch::matching::match_on;
///
/// let size = match_on(42)
///     .with_if(|n| *n < 10, |_| "small")
///     .with_if(|n| *n < 100, |_| "medium")
///     .with_default(|_| "large")
///     .evaluate();
/// assert_eq!(size, "medium");
/// ```
#[inline]
pub const fn match_on<A>(argument: A) -> MatchExpression<A> {
    MatchExpression::new(argument)
}

/// Starts match expressions from any value.
///
/// Implemented for every sized type.
///
/// # Examples
///
/// ```rust
/// use casematch::matching::Matchable;
///
/// let word = String::from("two");
/// let number = word
///     .matching_cloned()
///     .with_any(["one".to_string(), "uno".to_string()], |_| 1)
///     .with_any(["two".to_string(), "dos".to_string()], |_| 2)
///     .evaluate();
/// assert_eq!(number, 2);
/// assert_eq!(word, "two");
/// ```
pub trait Matchable: Sized {
    /// Starts a match expression over `self`.
    fn matching(self) -> MatchExpression<Self> {
        MatchExpression::new(self)
    }

    /// Starts a match expression over a clone of `self`.
    fn matching_cloned(&self) -> MatchExpression<Self>
    where
        Self: Clone,
    {
        MatchExpression::new(self.clone())
    }
}

impl<T> Matchable for T {}

/// A match expression with its argument bound and no clauses yet.
///
/// Registering the first clause fixes the result type and yields a
/// [`WithExpression`].
#[must_use = "a match expression does nothing until it is evaluated"]
pub struct MatchExpression<A> {
    argument: A,
}

impl<A> MatchExpression<A> {
    /// Binds `argument`.
    #[inline]
    pub const fn new(argument: A) -> Self {
        Self { argument }
    }

    /// Returns the bound argument.
    #[inline]
    pub const fn argument(&self) -> &A {
        &self.argument
    }

    /// Fixes the result type without registering a clause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use casematch::matching::match_on;
    ///
    /// let empty = match_on('x').returning::<u8>();
    /// assert!(empty.is_empty());
    /// assert_eq!(empty.evaluate(), 0);
    /// ```
    #[inline]
    pub fn returning<R>(self) -> WithExpression<A, R> {
        WithExpression {
            argument: self.argument,
            clauses: ClauseChain::new(),
        }
    }

    /// Registers a clause for arguments matching `pattern`.
    pub fn with_pattern<R, H>(self, pattern: Pattern<A>, handler: H) -> WithExpression<A, R>
    where
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.returning().with_pattern(pattern, handler)
    }

    /// Registers a clause for arguments matching `pattern` while `guard` holds.
    pub fn with_pattern_when<R, H, G>(
        self,
        pattern: Pattern<A>,
        handler: H,
        guard: G,
    ) -> WithExpression<A, R>
    where
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.returning().with_pattern_when(pattern, handler, guard)
    }

    /// Registers a clause for arguments equal to `value`.
    pub fn with<R, H>(self, value: A, handler: H) -> WithExpression<A, R>
    where
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.with_pattern(Pattern::value(value), handler)
    }

    /// Registers a clause for arguments equal to any of `values`.
    pub fn with_any<R, I, H>(self, values: I, handler: H) -> WithExpression<A, R>
    where
        I: IntoIterator<Item = A>,
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.with_pattern(Pattern::one_of(values), handler)
    }

    /// Registers a clause for arguments satisfying `predicate`.
    pub fn with_if<R, P, H>(self, predicate: P, handler: H) -> WithExpression<A, R>
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.with_pattern(Pattern::predicate(predicate), handler)
    }

    /// Registers a guarded clause for arguments equal to `value`.
    pub fn with_when<R, H, G>(self, value: A, handler: H, guard: G) -> WithExpression<A, R>
    where
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_pattern_when(Pattern::value(value), handler, guard)
    }

    /// Registers a guarded clause for arguments equal to any of `values`.
    pub fn with_any_when<R, I, H, G>(self, values: I, handler: H, guard: G) -> WithExpression<A, R>
    where
        I: IntoIterator<Item = A>,
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_pattern_when(Pattern::one_of(values), handler, guard)
    }

    /// Registers a guarded clause for arguments satisfying `predicate`.
    pub fn with_if_when<R, P, H, G>(self, predicate: P, handler: H, guard: G) -> WithExpression<A, R>
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_pattern_when(Pattern::predicate(predicate), handler, guard)
    }
}

impl<A: Clone> Clone for MatchExpression<A> {
    fn clone(&self) -> Self {
        Self::new(self.argument.clone())
    }
}

impl<A: fmt::Debug> fmt::Debug for MatchExpression<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MatchExpression")
            .field("argument", &self.argument)
            .finish()
    }
}

/// A match expression with an ordered, persistent sequence of clauses.
///
/// Every registration returns a new builder; builders cloned from a common
/// prefix grow independently and never see each other's clauses.
///
/// # Examples
///
/// ```rust
/// use casematch::matching::match_on;
///
/// let prefix = match_on(2).with(1, |_| "one");
/// let english = prefix.clone().with(2, |_| "two");
/// let spanish = prefix.clone().with(2, |_| "dos");
///
/// assert_eq!(prefix.len(), 1);
/// assert_eq!(english.evaluate(), "two");
/// assert_eq!(spanish.evaluate(), "dos");
/// ```
#[must_use = "a match expression does nothing until it is evaluated"]
pub struct WithExpression<A, R> {
    argument: A,
    clauses: ClauseChain<A, R>,
}

impl<A, R> WithExpression<A, R> {
    /// Returns the bound argument.
    #[inline]
    pub const fn argument(&self) -> &A {
        &self.argument
    }

    /// Returns the number of registered clauses.
    #[inline]
    pub const fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if no clause is registered.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn push(self, pattern: Pattern<A>, handler: Handler<A, R>, guard: Option<Guard>) -> Self {
        let clauses = self.clauses.push(Clause::new(pattern, handler, guard));
        Self {
            argument: self.argument,
            clauses,
        }
    }

    /// Appends a clause for arguments matching `pattern`.
    pub fn with_pattern<H>(self, pattern: Pattern<A>, handler: H) -> Self
    where
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.push(pattern, Arc::new(handler), None)
    }

    /// Appends a clause for arguments matching `pattern` while `guard` holds.
    ///
    /// The guard takes no argument; it is consulted only when the pattern
    /// matches, and may read any external state.
    pub fn with_pattern_when<H, G>(self, pattern: Pattern<A>, handler: H, guard: G) -> Self
    where
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        let guard: Guard = Arc::new(guard);
        self.push(pattern, Arc::new(handler), Some(guard))
    }

    /// Appends a clause for arguments equal to `value`.
    pub fn with<H>(self, value: A, handler: H) -> Self
    where
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.with_pattern(Pattern::value(value), handler)
    }

    /// Appends a clause for arguments equal to any of `values`.
    pub fn with_any<I, H>(self, values: I, handler: H) -> Self
    where
        I: IntoIterator<Item = A>,
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.with_pattern(Pattern::one_of(values), handler)
    }

    /// Appends a clause for arguments satisfying `predicate`.
    pub fn with_if<P, H>(self, predicate: P, handler: H) -> Self
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        self.with_pattern(Pattern::predicate(predicate), handler)
    }

    /// Appends a guarded clause for arguments equal to `value`.
    pub fn with_when<H, G>(self, value: A, handler: H, guard: G) -> Self
    where
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_pattern_when(Pattern::value(value), handler, guard)
    }

    /// Appends a guarded clause for arguments equal to any of `values`.
    pub fn with_any_when<I, H, G>(self, values: I, handler: H, guard: G) -> Self
    where
        I: IntoIterator<Item = A>,
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_pattern_when(Pattern::one_of(values), handler, guard)
    }

    /// Appends a guarded clause for arguments satisfying `predicate`.
    pub fn with_if_when<P, H, G>(self, predicate: P, handler: H, guard: G) -> Self
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
        H: Fn(A) -> R + Send + Sync + 'static,
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.with_pattern_when(Pattern::predicate(predicate), handler, guard)
    }

    /// Ends clause registration with a fallback handler.
    pub fn with_default<H>(self, handler: H) -> WithDefaultExpression<A, R>
    where
        H: Fn(A) -> R + Send + Sync + 'static,
    {
        WithDefaultExpression {
            argument: self.argument,
            clauses: self.clauses,
            default: Arc::new(handler),
        }
    }

    /// Evaluates the clauses in registration order.
    ///
    /// The first clause whose pattern matches and whose guard holds is
    /// applied to the argument; later clauses are never examined. When no
    /// clause qualifies, `R::default()` is returned.
    pub fn evaluate(self) -> R
    where
        A: PartialEq,
        R: Default,
    {
        or_default_value(self.try_evaluate())
    }

    /// Evaluates the clauses, reporting a miss as an error.
    ///
    /// # Errors
    ///
    /// - [`MatchError::EmptyExpression`] when no clause is registered
    /// - [`MatchError::NoMatchingClause`] when no clause qualifies
    pub fn try_evaluate(self) -> Result<R, MatchError>
    where
        A: PartialEq,
    {
        run(self.argument, &self.clauses, None)
    }
}

impl<A: Clone, R> Clone for WithExpression<A, R> {
    fn clone(&self) -> Self {
        Self {
            argument: self.argument.clone(),
            clauses: self.clauses.clone(),
        }
    }
}

impl<A: fmt::Debug, R> fmt::Debug for WithExpression<A, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WithExpression")
            .field("argument", &self.argument)
            .field("clauses", &self.clauses.len())
            .finish()
    }
}

/// A match expression whose clause registration ended with a default handler.
#[must_use = "a match expression does nothing until it is evaluated"]
pub struct WithDefaultExpression<A, R> {
    argument: A,
    clauses: ClauseChain<A, R>,
    default: Handler<A, R>,
}

impl<A, R> WithDefaultExpression<A, R> {
    /// Returns the bound argument.
    #[inline]
    pub const fn argument(&self) -> &A {
        &self.argument
    }

    /// Returns the number of registered clauses.
    #[inline]
    pub const fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if no clause is registered.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluates the clauses in registration order, falling back to the
    /// default handler when none qualifies.
    ///
    /// An expression without clauses yields `R::default()` and does not
    /// invoke the default handler.
    pub fn evaluate(self) -> R
    where
        A: PartialEq,
        R: Default,
    {
        or_default_value(self.try_evaluate())
    }

    /// Evaluates the clauses, falling back to the default handler.
    ///
    /// # Errors
    ///
    /// [`MatchError::EmptyExpression`] when no clause is registered.
    pub fn try_evaluate(self) -> Result<R, MatchError>
    where
        A: PartialEq,
    {
        run(self.argument, &self.clauses, Some(&self.default))
    }
}

impl<A: Clone, R> Clone for WithDefaultExpression<A, R> {
    fn clone(&self) -> Self {
        Self {
            argument: self.argument.clone(),
            clauses: self.clauses.clone(),
            default: Arc::clone(&self.default),
        }
    }
}

impl<A: fmt::Debug, R> fmt::Debug for WithDefaultExpression<A, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WithDefaultExpression")
            .field("argument", &self.argument)
            .field("clauses", &self.clauses.len())
            .finish_non_exhaustive()
    }
}

/// First-match-wins evaluation shared by both builder stages.
fn run<A, R>(
    argument: A,
    clauses: &ClauseChain<A, R>,
    default: Option<&Handler<A, R>>,
) -> Result<R, MatchError>
where
    A: PartialEq,
{
    if clauses.is_empty() {
        return Err(MatchError::EmptyExpression);
    }

    if let Some((position, clause)) = clauses.first_match(&argument) {
        #[cfg(feature = "tracing")]
        tracing::trace!(clause = position, clauses = clauses.len(), "match clause selected");
        #[cfg(not(feature = "tracing"))]
        let _ = position;
        return Ok(clause.apply(argument));
    }

    match default {
        Some(handler) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                clauses = clauses.len(),
                "no clause matched, applying the default handler"
            );
            Ok(handler(argument))
        }
        None => Err(MatchError::NoMatchingClause {
            clauses: clauses.len(),
        }),
    }
}

fn or_default_value<R: Default>(outcome: Result<R, MatchError>) -> R {
    outcome.unwrap_or_else(|error| {
        #[cfg(feature = "tracing")]
        tracing::debug!(%error, "match expression produced no value, using the default value");
        #[cfg(not(feature = "tracing"))]
        let _ = error;
        R::default()
    })
}

static_assertions::assert_impl_all!(WithExpression<i32, String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(WithDefaultExpression<String, i32>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(WithExpression<std::rc::Rc<i32>, i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    #[case(0, "zero")]
    #[case(1, "small")]
    #[case(3, "small")]
    #[case(7, "other")]
    fn test_evaluate_selects_clause(#[case] argument: i32, #[case] expected: &str) {
        let result = match_on(argument)
            .with(0, |_| "zero")
            .with_any([1, 2, 3], |_| "small")
            .with_default(|_| "other")
            .evaluate();
        assert_eq!(result, expected);
    }

    #[rstest]
    fn test_handler_receives_argument() {
        let result = match_on(String::from("abc"))
            .with_if(|text: &String| text.len() == 3, |text| text.to_uppercase())
            .evaluate();
        assert_eq!(result, "ABC");
    }

    #[rstest]
    fn test_later_clauses_not_examined_after_match() {
        let examined = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&examined);
        let result = match_on(1)
            .with(1, |_| 'a')
            .with_if(
                move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    true
                },
                |_| 'b',
            )
            .evaluate();
        assert_eq!(result, 'a');
        assert_eq!(examined.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn test_default_handler_receives_argument() {
        let result = match_on(9)
            .with(1, |n| n * 100)
            .with_default(|n| n + 1)
            .evaluate();
        assert_eq!(result, 10);
    }

    #[rstest]
    fn test_try_evaluate_reports_miss() {
        let outcome = match_on(5).with(1, |_| ()).with(2, |_| ()).try_evaluate();
        assert_eq!(outcome, Err(MatchError::NoMatchingClause { clauses: 2 }));
    }

    #[rstest]
    fn test_empty_expression_ignores_default_handler() {
        let empty = match_on(5).returning::<i32>().with_default(|_| 99);
        assert!(empty.is_empty());
        assert_eq!(empty.clone().try_evaluate(), Err(MatchError::EmptyExpression));
        assert_eq!(empty.evaluate(), 0);
    }

    #[rstest]
    fn test_debug_shows_argument_and_clause_count() {
        let expression = match_on(3).with(3, |_| 0_u8);
        assert_eq!(
            format!("{expression:?}"),
            "WithExpression { argument: 3, clauses: 1 }"
        );
    }
}
