//! Property-based tests for union equality and dispatch.
//!
//! - **Reflexivity**: `Case1(x) == Case1(x)`
//! - **Payload sensitivity**: `Case1(x) != Case1(y)` when `x != y`
//! - **Case separation**: `Case1(x) != Case2(y)` for all `x`, `y`
//! - **Dispatch**: `fold` selects the handler of the active case

#![cfg(feature = "union")]

use casematch::union::{Union2, Union3};
use proptest::prelude::*;

fn union3_strategy() -> impl Strategy<Value = Union3<i32, String, bool>> {
    prop_oneof![
        any::<i32>().prop_map(Union3::<i32, String, bool>::case1),
        any::<String>().prop_map(Union3::<i32, String, bool>::case2),
        any::<bool>().prop_map(Union3::<i32, String, bool>::case3),
    ]
}

proptest! {
    #[test]
    fn prop_union2_reflexive(value in any::<i32>()) {
        prop_assert_eq!(Union2::<i32, String>::case1(value), Union2::case1(value));
    }

    #[test]
    fn prop_union2_payload_sensitive(left in any::<i32>(), right in any::<i32>()) {
        prop_assume!(left != right);
        prop_assert_ne!(Union2::<i32, String>::case1(left), Union2::case1(right));
    }

    #[test]
    fn prop_union2_cases_never_equal(left in any::<i32>(), right in any::<i32>()) {
        prop_assert_ne!(Union2::<i32, i32>::case1(left), Union2::case2(right));
    }

    #[test]
    fn prop_union3_fold_matches_index(union in union3_strategy()) {
        let selected = union.clone().fold(|_| 1, |_| 2, |_| 3);
        prop_assert_eq!(selected, union.index());
    }

    #[test]
    fn prop_union3_partial_matches_fold(union in union3_strategy()) {
        let exhaustive = union.clone().fold(|n| n.to_string(), |s| s, |b| b.to_string());
        let partial = union
            .partial()
            .case3(|b: bool| b.to_string())
            .case1(|n: i32| n.to_string())
            .case2(|s: String| s)
            .try_finish();
        prop_assert_eq!(partial, Ok(exhaustive));
    }
}
