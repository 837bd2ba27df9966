//! Closed sum types with exhaustive dispatch.
//!
//! This module provides the two predefined unions [`Union2`] and [`Union3`]
//! and the [`define_union!`](crate::define_union) macro that declares them.
//! A union value always has exactly one active case, carrying exactly one
//! payload; the case is chosen at construction and never changes.
//!
//! # Dispatch
//!
//! - [`Union2::fold`] takes one handler per case and invokes exactly the
//!   handler of the active case. Side effects are expressed with handlers
//!   returning `()`.
//! - [`Union2::partial`] starts a permissive dispatch in which handlers may be
//!   omitted. An unhandled case resolves to the result type's default value
//!   (`or_default`), a fallback (`or_else`) or an error (`try_finish`).
//!
//! # Equality
//!
//! Two unions are equal iff the same case is active and the payloads are
//! equal. Unions with different type arguments are distinct types and can
//! never be equal.
//!
//! # Examples
//!
//! ```rust
//! use casematch::union::Union2;
//!
//! let number: Union2<i32, String> = Union2::case1(42);
//! let text: Union2<i32, String> = Union2::case2("forty-two".to_string());
//!
//! assert_eq!(number, Union2::case1(42));
//! assert_ne!(number, text);
//!
//! let describe = |union: Union2<i32, String>| {
//!     union.fold(|n| format!("number {n}"), |s| format!("text {s}"))
//! };
//! assert_eq!(describe(number), "number 42");
//! assert_eq!(describe(text), "text forty-two");
//!
//! // Permissive dispatch: the second case has no handler.
//! let length: usize = Union2::<i32, String>::case2("abc".to_string())
//!     .partial()
//!     .case1(|n| n.unsigned_abs() as usize)
//!     .or_default();
//! assert_eq!(length, 0);
//! ```

mod macros;

crate::define_union! {
    /// A closed sum type with two cases.
    ///
    /// # Type Parameters
    ///
    /// * `T1` - The payload type of the first case
    /// * `T2` - The payload type of the second case
    ///
    /// # Examples
    ///
    /// ```rust
    /// use casematch::union::Union2;
    ///
    /// let union: Union2<i32, &str> = Union2::case2("hello");
    /// assert!(union.is_case2());
    /// assert_eq!(union.index(), 2);
    /// assert_eq!(union.case2_ref(), Some(&"hello"));
    /// assert_eq!(union.fold(|n| n.to_string(), str::to_uppercase), "HELLO");
    /// ```
    pub enum Union2 {
        /// The first case.
        Case1(T1) = 1,
        /// The second case.
        Case2(T2) = 2,
    }
}

crate::define_union! {
    /// A closed sum type with three cases.
    ///
    /// # Type Parameters
    ///
    /// * `T1` - The payload type of the first case
    /// * `T2` - The payload type of the second case
    /// * `T3` - The payload type of the third case
    ///
    /// # Examples
    ///
    /// ```rust
    /// use casematch::union::Union3;
    ///
    /// let union: Union3<i32, &str, bool> = Union3::case3(true);
    /// let description = union.fold(
    ///     |n| format!("int {n}"),
    ///     |s| format!("str {s}"),
    ///     |b| format!("bool {b}"),
    /// );
    /// assert_eq!(description, "bool true");
    /// ```
    pub enum Union3 {
        /// The first case.
        Case1(T1) = 1,
        /// The second case.
        Case2(T2) = 2,
        /// The third case.
        Case3(T3) = 3,
    }
}

static_assertions::assert_impl_all!(Union2<i32, String>: Send, Sync, Clone, Eq, std::hash::Hash);
static_assertions::assert_impl_all!(Union3<i32, String, Vec<u8>>: Send, Sync, Clone, Eq, std::hash::Hash);
static_assertions::assert_not_impl_any!(Union2<std::rc::Rc<i32>, String>: Send, Sync);

/// Reports a partial dispatch that had no handler for the active case.
#[doc(hidden)]
#[inline]
pub fn report_unhandled(union: &'static str, case: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        union,
        case,
        "no handler supplied for the active case, using the default value"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (union, case);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest]
    #[case(Union3::case1(7), 1)]
    #[case(Union3::case2('x'), 2)]
    #[case(Union3::case3("seven"), 3)]
    fn test_index_reports_active_case(#[case] union: Union3<i32, char, &str>, #[case] expected: usize) {
        assert_eq!(union.index(), expected);
    }

    #[rstest]
    fn test_cases_constant() {
        assert_eq!(Union2::<(), ()>::CASES, 2);
        assert_eq!(Union3::<(), (), ()>::CASES, 3);
    }

    #[rstest]
    fn test_fold_invokes_only_active_handler() {
        let first = Cell::new(0);
        let second = Cell::new(0);
        let third = Cell::new(0);

        Union3::<i32, i32, i32>::case2(5).fold(
            |_| first.set(first.get() + 1),
            |_| second.set(second.get() + 1),
            |_| third.set(third.get() + 1),
        );

        assert_eq!((first.get(), second.get(), third.get()), (0, 1, 0));
    }

    #[rstest]
    fn test_equal_unions_hash_equally() {
        let left: Union2<i32, String> = Union2::case2("a".to_string());
        let right: Union2<i32, String> = Union2::case2("a".to_string());
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[rstest]
    fn test_as_ref_keeps_case() {
        let union: Union2<String, i32> = Union2::case1("owned".to_string());
        assert_eq!(union.as_ref(), Union2::case1(&"owned".to_string()));
        assert_eq!(union.as_ref().into_case1().map(String::len), Some(5));
    }

    #[rstest]
    fn test_into_case_extracts_only_active_payload() {
        let union: Union3<i32, char, bool> = Union3::case2('q');
        assert_eq!(union.into_case1(), None);
        assert_eq!(union.into_case2(), Some('q'));
        assert_eq!(union.into_case3(), None);
    }

    #[rstest]
    fn test_partial_first_handler_for_active_case_wins() {
        let result = Union2::<i32, i32>::case1(1)
            .partial()
            .case1(|n| n + 10)
            .case1(|n| n + 100)
            .or_default();
        assert_eq!(result, 11);
    }

    #[rstest]
    fn test_partial_unhandled_case() {
        let dispatch = Union3::<i32, char, bool>::case3(true)
            .partial::<String>()
            .case1(|n| n.to_string())
            .case2(|c| c.to_string());

        assert!(!dispatch.is_handled());
        assert_eq!(
            dispatch.try_finish(),
            Err(crate::error::MatchError::UnhandledCase {
                union: "Union3",
                case: 3,
            })
        );
    }

    #[rstest]
    fn test_partial_or_else_receives_unhandled_union() {
        let result = Union2::<i32, &str>::case2("fallback")
            .partial()
            .case1(|n| n.to_string())
            .or_else(|union| union.fold(|n| n.to_string(), |s| format!("<{s}>")));
        assert_eq!(result, "<fallback>");
    }
}
