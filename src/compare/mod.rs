//! # Value Comparator
//!
//! Equality and ordering over the full value domain. Every function here is
//! total: values of different type weight order by weight, composites descend
//! key by key over their reconciled key set, and a missing member compares as
//! `null`.
//!
//! The relational operators share one recursive helper that reports a
//! [`Verdict`]. `Inconclusive` means "no ordering signal anywhere below this
//! point". It is resolved only at the public entry points: strict operators
//! (`<`, `>`) read it as `false`, non-strict ones (`<=`, `>=`) as `true`.

pub mod keys;

use std::cmp::Ordering;

use crate::model::{TypeWeight, Value};
use crate::{Error, Result};

pub use keys::{reconcile_keys, KeyList};

/// Outcome of the recursive comparison helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Less,
    Equal,
    Greater,
    /// Composite operands with no differing member.
    Inconclusive,
}

impl Verdict {
    fn is_decisive(self) -> bool {
        matches!(self, Verdict::Less | Verdict::Greater)
    }
}

impl From<Ordering> for Verdict {
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::Less => Verdict::Less,
            Ordering::Equal => Verdict::Equal,
            Ordering::Greater => Verdict::Greater,
        }
    }
}

/// Locale-independent string ordering by Unicode code point.
pub fn string_compare(lhs: &str, rhs: &str) -> Ordering {
    lhs.cmp(rhs)
}

/// Recursive comparison. The first decisive member of a composite wins.
pub fn compare_verdict(lhs: &Value, rhs: &Value) -> Verdict {
    let (lw, rw) = (lhs.type_weight(), rhs.type_weight());
    if lw != rw {
        return lw.cmp(&rw).into();
    }

    match (lhs, rhs) {
        (Value::Null, Value::Null) => Verdict::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b).into(),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).map_or(Verdict::Equal, Verdict::from),
        (Value::String(a), Value::String(b)) => string_compare(a, b).into(),
        _ => {
            debug_assert!(lw.is_composite());
            reconcile_keys(lhs, rhs)
                .into_iter()
                .map(|k| compare_verdict(lhs.get(k), rhs.get(k)))
                .find(|v| v.is_decisive())
                .unwrap_or(Verdict::Inconclusive)
        }
    }
}

/// Three-way comparison. Lower type weight sorts first.
pub fn compare(lhs: &Value, rhs: &Value) -> Ordering {
    match compare_verdict(lhs, rhs) {
        Verdict::Less => Ordering::Less,
        Verdict::Greater => Ordering::Greater,
        Verdict::Equal | Verdict::Inconclusive => Ordering::Equal,
    }
}

/// Query-language `==`.
pub fn equal(lhs: &Value, rhs: &Value) -> bool {
    if lhs.type_weight() != rhs.type_weight() {
        return false;
    }

    match (lhs, rhs) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => string_compare(a, b) == Ordering::Equal,
        _ => reconcile_keys(lhs, rhs)
            .into_iter()
            .all(|k| equal(lhs.get(k), rhs.get(k))),
    }
}

/// Query-language `!=`. Stops at the first member that differs.
pub fn unequal(lhs: &Value, rhs: &Value) -> bool {
    if lhs.type_weight() != rhs.type_weight() {
        return true;
    }

    match (lhs, rhs) {
        (Value::Null, Value::Null) => false,
        (Value::Bool(a), Value::Bool(b)) => a != b,
        (Value::Number(a), Value::Number(b)) => a != b,
        (Value::String(a), Value::String(b)) => string_compare(a, b) != Ordering::Equal,
        _ => reconcile_keys(lhs, rhs)
            .into_iter()
            .any(|k| unequal(lhs.get(k), rhs.get(k))),
    }
}

/// `>`; false when no ordering signal is found.
pub fn greater(lhs: &Value, rhs: &Value) -> bool {
    match compare_verdict(lhs, rhs) {
        Verdict::Greater => true,
        Verdict::Less | Verdict::Equal | Verdict::Inconclusive => false,
    }
}

/// `>=`; true when no ordering signal is found.
pub fn greater_or_equal(lhs: &Value, rhs: &Value) -> bool {
    match compare_verdict(lhs, rhs) {
        Verdict::Less => false,
        Verdict::Greater | Verdict::Equal | Verdict::Inconclusive => true,
    }
}

/// `<`; false when no ordering signal is found.
pub fn less(lhs: &Value, rhs: &Value) -> bool {
    match compare_verdict(lhs, rhs) {
        Verdict::Less => true,
        Verdict::Greater | Verdict::Equal | Verdict::Inconclusive => false,
    }
}

/// `<=`; true when no ordering signal is found.
pub fn less_or_equal(lhs: &Value, rhs: &Value) -> bool {
    match compare_verdict(lhs, rhs) {
        Verdict::Greater => false,
        Verdict::Less | Verdict::Equal | Verdict::Inconclusive => true,
    }
}

/// Query-language `IN`: is `lhs` equal to some element of the list `rhs`?
pub fn in_list(lhs: &Value, rhs: &Value) -> Result<bool> {
    match rhs {
        Value::List(items) => Ok(items.iter().any(|item| equal(lhs, item))),
        other => Err(Error::ListExpected {
            operator: "IN",
            got: other.type_weight(),
        }),
    }
}

/// Stable sort by [`compare`].
pub fn sort_values(values: &mut [Value]) {
    values.sort_by(compare);
}

/// Drop values `equal` to an earlier one, keeping first occurrences in order.
pub fn unique(values: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(values.len());
    for v in values {
        if !out.iter().any(|seen| equal(seen, v)) {
            out.push(v.clone());
        }
    }
    out
}

/// Largest non-null value, or `Null` when there is none.
pub fn max_value(values: &[Value]) -> Value {
    pick(values, greater)
}

/// Smallest non-null value, or `Null` when there is none.
pub fn min_value(values: &[Value]) -> Value {
    pick(values, less)
}

fn pick(values: &[Value], better: fn(&Value, &Value) -> bool) -> Value {
    let mut best: Option<&Value> = None;
    for v in values.iter().filter(|v| v.type_weight() != TypeWeight::Null) {
        if best.is_none_or(|b| better(v, b)) {
            best = Some(v);
        }
    }
    best.cloned().unwrap_or(Value::Null)
}
