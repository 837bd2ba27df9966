//! Fluent, ordered pattern matching over arbitrary values.
//!
//! A match expression binds an argument and collects clauses, each made of
//! a [`Pattern`], a handler and an optional guard. Evaluation scans the
//! clauses in registration order and applies the handler of the first
//! clause whose pattern matches and whose guard holds (first match wins).
//!
//! The builder goes through three stages:
//!
//! - [`MatchExpression`]: argument bound, no clause yet
//! - [`WithExpression`]: one or more clauses, open for more
//! - [`WithDefaultExpression`]: closed with a fallback handler
//!
//! Builders are immutable and persistent. Each registration returns a new
//! builder sharing the existing clauses, so a partially built expression can
//! be cloned and extended in several directions.
//!
//! # Outcomes without a matching clause
//!
//! | Stage                   | `evaluate()`          | `try_evaluate()`                    |
//! |-------------------------|-----------------------|-------------------------------------|
//! | no clauses              | `R::default()`        | `Err(MatchError::EmptyExpression)`  |
//! | clauses, no default     | `R::default()`        | `Err(MatchError::NoMatchingClause)` |
//! | clauses, default        | default handler       | `Ok(default handler result)`        |
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! use casematch::matching::{Matchable, Pattern};
//!
//! let maintenance = Arc::new(AtomicBool::new(true));
//! let flag = Arc::clone(&maintenance);
//!
//! let route = |path: &'static str| {
//!     let flag = Arc::clone(&flag);
//!     path.matching()
//!         .with_when("/admin", |_| "maintenance page", move || flag.load(Ordering::SeqCst))
//!         .with_any(["/", "/index"], |_| "home")
//!         .with_pattern(Pattern::predicate(|p: &&str| p.starts_with("/admin")), |_| "admin")
//!         .with_default(|p| p)
//!         .evaluate()
//! };
//!
//! assert_eq!(route("/admin"), "maintenance page");
//! maintenance.store(false, Ordering::SeqCst);
//! assert_eq!(route("/admin"), "admin");
//! assert_eq!(route("/index"), "home");
//! assert_eq!(route("/about"), "/about");
//! ```

mod chain;
mod expression;
mod pattern;

pub use expression::{MatchExpression, Matchable, WithDefaultExpression, WithExpression, match_on};
pub use pattern::Pattern;
