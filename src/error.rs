//! Error types for strict dispatch and evaluation.
//!
//! The permissive operations of this crate ([`or_default`] on partial union
//! dispatchers and `evaluate` on match expressions) never fail: they fall
//! back to the result type's default value. Their strict counterparts
//! ([`try_finish`] and `try_evaluate`) report the same situations as a
//! [`MatchError`] instead.
//!
//! [`or_default`]: crate::union::Union2Partial::or_default
//! [`try_finish`]: crate::union::Union2Partial::try_finish

use thiserror::Error;

/// The reasons a strict dispatch or evaluation can fail to produce a value.
///
/// # Examples
///
/// ```rust
/// use casematch::error::MatchError;
///
/// let error = MatchError::NoMatchingClause { clauses: 3 };
/// assert_eq!(
///     error.to_string(),
///     "no clause matched the argument (3 clauses examined) and no default handler was set"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MatchError {
    /// A partial union dispatch found no handler for the active case.
    #[error("no handler supplied for case {case} of {union}")]
    UnhandledCase {
        /// The name of the union type.
        union: &'static str,
        /// The 1-based index of the active case.
        case: usize,
    },

    /// No clause qualified and no default handler was registered.
    #[error(
        "no clause matched the argument ({clauses} clauses examined) and no default handler was set"
    )]
    NoMatchingClause {
        /// The number of clauses that were examined.
        clauses: usize,
    },

    /// The match expression was evaluated without any clause.
    #[error("the match expression has no clauses")]
    EmptyExpression,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        MatchError::UnhandledCase { union: "Union3", case: 2 },
        "no handler supplied for case 2 of Union3"
    )]
    #[case(MatchError::EmptyExpression, "the match expression has no clauses")]
    fn test_match_error_display(#[case] error: MatchError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_match_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_error: &E) {}
        assert_error(&MatchError::EmptyExpression);
    }
}
