//! Canonical unions for everyday control flow.
//!
//! Both types in this module are two-case unions over [`Union2`](crate::union::Union2):
//!
//! - [`Optional`]: a value that is `Present` or `Absent`
//! - [`Railway`]: a `Success` or an `Error`, chained with short-circuiting
//!   [`Railway::bind`]
//!
//! [`Switch`] lifts plain values onto the success track.
//!
//! # Examples
//!
//! ```rust
//! use casematch::control::{Optional, Railway, Switch};
//!
//! let price = Optional::from_nullable(Some(120_u32));
//! let label = price.map(|cents| cents / 100).fold(|euros| format!("{euros} EUR"), "n/a".to_string());
//! assert_eq!(label, "1 EUR");
//!
//! let checked: Railway<u32, &str> = 120_u32
//!     .switch()
//!     .bind(|cents| if cents > 0 { Railway::success(cents) } else { Railway::error("free") });
//! assert!(checked.is_success());
//! ```

mod optional;
mod railway;

pub use optional::Optional;
pub use railway::{Railway, Switch};
