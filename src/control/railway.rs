//! Railway-oriented results built on [`Union2`].
//!
//! A [`Railway<S, E>`] is on the success track (`Success(value)`) or on the
//! error track (`Error(error)`). [`Railway::bind`] chains steps that may
//! switch to the error track; once there, every following step is skipped
//! and the error travels to the end unchanged.
//!
//! # Examples
//!
//! ```rust
//! use casematch::control::{Railway, Switch};
//!
//! fn parse(input: &str) -> Railway<i32, String> {
//!     input
//!         .parse::<i32>()
//!         .map_or_else(|error| Railway::error(error.to_string()), Railway::success)
//! }
//!
//! fn non_negative(value: i32) -> Railway<i32, String> {
//!     if value >= 0 {
//!         value.switch()
//!     } else {
//!         Railway::error(format!("{value} is negative"))
//!     }
//! }
//!
//! assert_eq!(parse("12").bind(non_negative), Railway::success(12));
//! assert_eq!(parse("-3").bind(non_negative), Railway::error("-3 is negative".to_string()));
//! assert!(parse("x").bind(non_negative).is_error());
//! ```

use std::fmt;

use crate::union::Union2;

/// A two-track result: success with `S` or error with `E`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Railway<S, E>(Union2<S, E>);

impl<S, E> Railway<S, E> {
    /// Creates a value on the success track.
    #[inline]
    pub const fn success(value: S) -> Self {
        Self(Union2::Case1(value))
    }

    /// Creates a value on the error track.
    #[inline]
    pub const fn error(error: E) -> Self {
        Self(Union2::Case2(error))
    }

    /// Returns `true` if this is a success.
    #[inline]
    pub const fn is_success(&self) -> bool {
        self.0.is_case1()
    }

    /// Returns `true` if this is an error.
    #[inline]
    pub const fn is_error(&self) -> bool {
        self.0.is_case2()
    }

    /// Continues with `function` on success.
    ///
    /// On success the result of `function` is returned as is, whichever
    /// track it is on. On error the original error is returned unchanged and
    /// `function` is never invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use casematch::control::Railway;
    ///
    /// let ok: Railway<i32, &str> = Railway::success(5);
    /// assert_eq!(ok.bind(|x| Railway::success(x + 1)), Railway::success(6));
    ///
    /// let failed: Railway<i32, &str> = Railway::error("e");
    /// assert_eq!(failed.bind(|x| Railway::success(x + 1)), Railway::error("e"));
    /// ```
    #[inline]
    pub fn bind<S2, F>(self, function: F) -> Railway<S2, E>
    where
        F: FnOnce(S) -> Railway<S2, E>,
    {
        self.0.fold(function, Railway::error)
    }

    /// Transforms the success value, leaving errors untouched.
    #[inline]
    pub fn map<S2, F>(self, function: F) -> Railway<S2, E>
    where
        F: FnOnce(S) -> S2,
    {
        self.bind(|value| Railway::success(function(value)))
    }

    /// Transforms the error, leaving successes untouched.
    #[inline]
    pub fn map_error<E2, F>(self, function: F) -> Railway<S, E2>
    where
        F: FnOnce(E) -> E2,
    {
        self.0
            .fold(Railway::success, |error| Railway::error(function(error)))
    }

    /// Applies `on_success` or `on_error`, whichever matches the track.
    #[inline]
    pub fn fold<T, F, G>(self, on_success: F, on_error: G) -> T
    where
        F: FnOnce(S) -> T,
        G: FnOnce(E) -> T,
    {
        self.0.fold(on_success, on_error)
    }

    /// Returns a reference to the success value, if any.
    #[inline]
    pub const fn success_ref(&self) -> Option<&S> {
        self.0.case1_ref()
    }

    /// Returns a reference to the error, if any.
    #[inline]
    pub const fn error_ref(&self) -> Option<&E> {
        self.0.case2_ref()
    }

    /// Converts into a standard `Result`.
    #[inline]
    pub fn into_result(self) -> Result<S, E> {
        self.0.fold(Ok, Err)
    }

    /// Returns the underlying union.
    #[inline]
    pub fn into_union(self) -> Union2<S, E> {
        self.0
    }

    /// Borrows the underlying union.
    #[inline]
    pub const fn as_union(&self) -> &Union2<S, E> {
        &self.0
    }
}

impl<S, E> From<Result<S, E>> for Railway<S, E> {
    fn from(result: Result<S, E>) -> Self {
        result.map_or_else(Self::error, Self::success)
    }
}

impl<S, E> From<Railway<S, E>> for Result<S, E> {
    fn from(railway: Railway<S, E>) -> Self {
        railway.into_result()
    }
}

impl<S: fmt::Debug, E: fmt::Debug> fmt::Debug for Railway<S, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Union2::Case1(value) => formatter.debug_tuple("Success").field(value).finish(),
            Union2::Case2(error) => formatter.debug_tuple("Error").field(error).finish(),
        }
    }
}

/// Lifts plain values onto the success track.
///
/// Implemented for every sized type.
///
/// # Examples
///
/// ```rust
/// use casematch::control::{Railway, Switch};
///
/// let lifted: Railway<i32, String> = 4.switch();
/// assert_eq!(lifted, Railway::success(4));
///
/// let doubled: Railway<i32, String> = 4.switch_with(|x| x * 2);
/// assert_eq!(doubled, Railway::success(8));
///
/// let described: Railway<String, ()> = 4.switch_with(|x: i32| x.to_string());
/// assert_eq!(described, Railway::success("4".to_string()));
/// ```
pub trait Switch: Sized {
    /// Wraps `self` as a success.
    fn switch<E>(self) -> Railway<Self, E> {
        Railway::success(self)
    }

    /// Applies `function` to `self` and wraps the result as a success.
    fn switch_with<T, E, F>(self, function: F) -> Railway<T, E>
    where
        F: FnOnce(Self) -> T,
    {
        Railway::success(function(self))
    }
}

impl<T> Switch for T {}
