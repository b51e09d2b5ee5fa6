//! End-to-end tests for the value ordering rules.
//!
//! Property tests cover the invariants that SORT, FILTER and GROUP rely on:
//! cross-type ordering by type weight, agreement between `equal` and the
//! three-way compare, and the non-strict default of `>=` / `<=`.

use std::cmp::Ordering;

use aql_core::compare::{
    compare, equal, greater, greater_or_equal, less, less_or_equal, sort_values, unequal,
};
use aql_core::{TypeWeight, Value};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ============================================================================
// Strategy: arbitrary values, a few levels deep
// ============================================================================

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6).prop_map(Value::number),
        (-3i32..3).prop_map(Value::from),
        "[a-c]{0,3}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-d]", inner), 0..4)
                .prop_map(|pairs| pairs.into_iter().collect::<Value>()),
        ]
    })
}

fn doc(pairs: &[(&str, Value)]) -> Value {
    pairs.iter().cloned().collect()
}

// ============================================================================
// 1. Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_different_weights_never_compare_equal(a in arb_value(), b in arb_value()) {
        let (wa, wb) = (a.type_weight(), b.type_weight());
        if wa != wb {
            prop_assert_eq!(compare(&a, &b), wa.cmp(&wb));
            prop_assert!(unequal(&a, &b));
        }
    }

    #[test]
    fn prop_equal_iff_compare_equal(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(equal(&a, &b), compare(&a, &b) == Ordering::Equal);
        prop_assert_eq!(unequal(&a, &b), !equal(&a, &b));
    }

    #[test]
    fn prop_compare_is_antisymmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    #[test]
    fn prop_compare_is_transitive(a in arb_value(), b in arb_value(), c in arb_value()) {
        if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
            prop_assert_ne!(compare(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn prop_relational_wrappers_agree_with_compare(a in arb_value(), b in arb_value()) {
        let ord = compare(&a, &b);
        prop_assert_eq!(greater(&a, &b), ord == Ordering::Greater);
        prop_assert_eq!(less(&a, &b), ord == Ordering::Less);
        prop_assert_eq!(greater_or_equal(&a, &b), ord != Ordering::Less);
        prop_assert_eq!(less_or_equal(&a, &b), ord != Ordering::Greater);
    }

    #[test]
    fn prop_reflexive_non_strict_default(x in arb_value()) {
        prop_assert!(greater_or_equal(&x, &x));
        prop_assert!(less_or_equal(&x, &x));
        prop_assert!(!greater(&x, &x));
        prop_assert!(!less(&x, &x));
        prop_assert!(equal(&x, &x));
    }

    #[test]
    fn prop_sort_groups_by_type_weight(mut values in prop::collection::vec(arb_value(), 0..16)) {
        sort_values(&mut values);
        let weights: Vec<TypeWeight> = values.iter().map(Value::type_weight).collect();
        let mut sorted = weights.clone();
        sorted.sort();
        prop_assert_eq!(weights, sorted);
        for pair in values.windows(2) {
            prop_assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
        }
    }
}

// ============================================================================
// 2. Named cases
// ============================================================================

#[test]
fn test_first_differing_attribute_decides() {
    let lhs = doc(&[("a", Value::from(1)), ("b", Value::from(2))]);
    let rhs = doc(&[("a", Value::from(1)), ("b", Value::from(3))]);
    assert_eq!(compare(&lhs, &rhs), Ordering::Less);
    assert!(less(&lhs, &rhs));
    assert!(!greater_or_equal(&lhs, &rhs));
}

#[test]
fn test_shorter_list_sorts_first_when_prefix_ties() {
    let short = Value::from(vec![1, 2]);
    let long = Value::from(vec![1, 2, 3]);
    assert_eq!(compare(&short, &long), Ordering::Less);
    assert_eq!(compare(&long, &short), Ordering::Greater);
}

#[test]
fn test_trailing_null_is_invisible() {
    let lhs = Value::from(vec![Value::from(1), Value::Null]);
    let rhs = Value::from(vec![1]);
    assert!(equal(&lhs, &rhs));
    assert_eq!(compare(&lhs, &rhs), Ordering::Equal);
    assert!(greater_or_equal(&lhs, &rhs));
    assert!(!greater(&lhs, &rhs));
}

#[test]
fn test_empty_composites_use_non_strict_default() {
    for x in [Value::List(vec![]), doc(&[])] {
        assert!(greater_or_equal(&x, &x));
        assert!(less_or_equal(&x, &x));
        assert!(!greater(&x, &x));
        assert!(!less(&x, &x));
    }
}

#[test]
fn test_nan_sorts_with_null() {
    let nan = Value::from(f64::NAN);
    assert_eq!(nan.type_weight(), TypeWeight::Null);
    assert!(equal(&nan, &Value::Null));
    assert_eq!(compare(&nan, &Value::from(false)), Ordering::Less);
}

#[test]
fn test_mixed_sort() {
    let mut values = vec![
        doc(&[("z", Value::from(1))]),
        Value::from("b"),
        Value::from(vec![0]),
        Value::from(10),
        Value::from("a"),
        Value::from(true),
        Value::Null,
        Value::from(-1),
    ];
    sort_values(&mut values);
    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::from(true),
            Value::from(-1),
            Value::from(10),
            Value::from("a"),
            Value::from("b"),
            Value::from(vec![0]),
            doc(&[("z", Value::from(1))]),
        ]
    );
}
