//! # casematch
//!
//! Closed sum types and runtime pattern matching for Rust.
//!
//! ## Overview
//!
//! - **Unions**: [`Union2`](union::Union2) and [`Union3`](union::Union3),
//!   closed sum types with exhaustive dispatch, declared with the exported
//!   [`define_union!`] macro
//! - **Control**: [`Optional`](control::Optional) and
//!   [`Railway`](control::Railway), two-case unions for optional values and
//!   short-circuiting success/error pipelines
//! - **Matching**: fluent, ordered match expressions over arbitrary values,
//!   with literal, literal-set and predicate clauses, guards and a default
//!
//! ## Feature Flags
//!
//! - `union`: union types and `define_union!`
//! - `control`: `Optional`, `Railway` and `Switch`
//! - `matching`: fluent match expressions
//! - `tracing`: diagnostics through the `tracing` facade
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use casematch::prelude::*;
//!
//! let shape: Union3<f64, (f64, f64), ()> = Union3::case2((2.0, 3.0));
//! let area = shape.fold(|radius| 3.0 * radius * radius, |(w, h)| w * h, |()| 0.0);
//! assert_eq!(area, 6.0);
//!
//! let grade = match_on(area)
//!     .with_if(|a| *a > 10.0, |_| "large")
//!     .with_default(|_| "small")
//!     .evaluate();
//! assert_eq!(grade, "small");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use casematch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::MatchError;

    #[cfg(feature = "union")]
    pub use crate::union::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "matching")]
    pub use crate::matching::*;
}

#[doc(hidden)]
pub use paste;

pub mod error;

#[cfg(feature = "union")]
pub mod union;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "matching")]
pub mod matching;
