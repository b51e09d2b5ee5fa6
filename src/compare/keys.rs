//! Key-set reconciliation for structural comparison of composites.

use smallvec::SmallVec;

use crate::model::{Key, Value};

/// Reconciled key sequence. Small composites stay on the stack.
pub type KeyList<'a> = SmallVec<[Key<'a>; 8]>;

/// The keys that drive a recursive comparison of two composites of the same
/// type weight.
///
/// Lists yield `0..max(len)`. Documents yield the union of both attribute
/// sets in lexicographic order; the ordering is what keeps comparisons
/// deterministic and transitive.
///
/// # Panics
///
/// When the operands are not both lists or both documents. Callers check
/// the type weights first, so reaching that case is a bug.
pub fn reconcile_keys<'a>(lhs: &'a Value, rhs: &'a Value) -> KeyList<'a> {
    match (lhs, rhs) {
        (Value::List(l), Value::List(r)) => (0..l.len().max(r.len())).map(Key::Index).collect(),
        (Value::Document(l), Value::Document(r)) => {
            let mut names: SmallVec<[&'a str; 8]> = l.keys().map(String::as_str).collect();
            names.extend(r.keys().map(String::as_str).filter(|k| !l.contains_key(*k)));
            names.sort_unstable();
            names.into_iter().map(Key::Name).collect()
        }
        _ => panic!(
            "reconcile_keys needs two lists or two documents, got {} and {}",
            lhs.type_name(),
            rhs.type_name()
        ),
    }
}
