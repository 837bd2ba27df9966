//! Optional values built on [`Union2`].
//!
//! [`Optional<T>`] is either `Present(value)` or `Absent`. It is a thin
//! layer over `Union2<T, ()>`: the first case carries the value and the
//! second case carries nothing.
//!
//! # Examples
//!
//! ```rust
//! use casematch::control::Optional;
//!
//! let present = Optional::present(5);
//! assert_eq!(present.map(|x| x + 1), Optional::present(6));
//! assert_eq!(present.fold(|x| x * 2, -1), 10);
//!
//! let absent: Optional<i32> = Optional::absent();
//! assert_eq!(absent.map(|x| x + 1), Optional::absent());
//! assert_eq!(absent.fold(|x| x * 2, -1), -1);
//! ```

use std::fmt;

use crate::union::Union2;

/// A value that is either present or absent.
///
/// Equality and hashing follow the underlying union: two optionals are
/// equal iff both are absent, or both are present with equal values.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Optional<T>(Union2<T, ()>);

impl<T> Optional<T> {
    /// Creates a present value.
    #[inline]
    pub const fn present(value: T) -> Self {
        Self(Union2::Case1(value))
    }

    /// Creates an absent value.
    #[inline]
    pub const fn absent() -> Self {
        Self(Union2::Case2(()))
    }

    /// Creates a present value from `Some` and an absent one from `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use casematch::control::Optional;
    ///
    /// assert_eq!(Optional::from_nullable(Some(3)), Optional::present(3));
    /// assert_eq!(Optional::<i32>::from_nullable(None), Optional::absent());
    /// ```
    #[inline]
    pub fn from_nullable(value: Option<T>) -> Self {
        value.map_or_else(Self::absent, Self::present)
    }

    /// Returns `true` if a value is present.
    #[inline]
    pub const fn is_present(&self) -> bool {
        self.0.is_case1()
    }

    /// Returns `true` if no value is present.
    #[inline]
    pub const fn is_absent(&self) -> bool {
        self.0.is_case2()
    }

    /// Returns a reference to the value if present.
    #[inline]
    pub const fn value(&self) -> Option<&T> {
        self.0.case1_ref()
    }

    /// Applies `function` to the value if present.
    ///
    /// `function` is not invoked when the value is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use casematch::control::Optional;
    ///
    /// let length = Optional::present("four").map(str::len);
    /// assert_eq!(length, Optional::present(4));
    /// ```
    #[inline]
    pub fn map<U, F>(self, function: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        self.0
            .fold(|value| Optional::present(function(value)), |()| Optional::absent())
    }

    /// Returns `function(value)` if present, otherwise `default`.
    ///
    /// `function` is not invoked when the value is absent.
    #[inline]
    pub fn fold<U, F>(self, function: F, default: U) -> U
    where
        F: FnOnce(T) -> U,
    {
        self.0.fold(function, |()| default)
    }

    /// Applies `on_present` to the value, or calls `on_absent`.
    ///
    /// Exactly one of the two handlers is invoked.
    #[inline]
    pub fn fold_with<U, F, G>(self, on_present: F, on_absent: G) -> U
    where
        F: FnOnce(T) -> U,
        G: FnOnce() -> U,
    {
        self.0.fold(on_present, |()| on_absent())
    }

    /// Converts into a standard `Option`.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.0.into_case1()
    }

    /// Returns the underlying union.
    #[inline]
    pub fn into_union(self) -> Union2<T, ()> {
        self.0
    }

    /// Borrows the underlying union.
    #[inline]
    pub const fn as_union(&self) -> &Union2<T, ()> {
        &self.0
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_nullable(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        optional.into_option()
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Union2::Case1(value) => formatter.debug_tuple("Present").field(value).finish(),
            Union2::Case2(()) => formatter.write_str("Absent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_present_carries_value() {
        let optional = Optional::present(String::from("hi"));
        assert!(optional.is_present());
        assert_eq!(optional.value(), Some(&String::from("hi")));
    }

    #[rstest]
    fn test_absent_map_does_not_invoke_function() {
        let mut calls = 0;
        let result: Optional<i32> = Optional::<i32>::absent().map(|x| {
            calls += 1;
            x + 1
        });
        assert_eq!(result, Optional::absent());
        assert_eq!(calls, 0);
    }

    #[rstest]
    fn test_fold_with_calls_single_handler() {
        let mut absent_calls = 0;
        let value = Optional::present(2).fold_with(
            |x| x * 10,
            || {
                absent_calls += 1;
                0
            },
        );
        assert_eq!(value, 20);
        assert_eq!(absent_calls, 0);
    }

    #[rstest]
    #[case(Optional::present(1), "Present(1)")]
    #[case(Optional::absent(), "Absent")]
    fn test_debug_format(#[case] optional: Optional<i32>, #[case] expected: &str) {
        assert_eq!(format!("{optional:?}"), expected);
    }

    #[rstest]
    fn test_option_conversion() {
        let optional: Optional<u8> = Some(9).into();
        let back: Option<u8> = optional.into();
        assert_eq!(back, Some(9));
        assert_eq!(Optional::<u8>::default(), Optional::from(None));
    }
}
