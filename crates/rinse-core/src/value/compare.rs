use crate::value::Value;
use std::cmp::Ordering;

///
/// Comparison semantics
///
/// Three distinct equality relations are in play and filters pick between
/// them deliberately:
///
/// - `strict_eq`: identity-style equality. Scalars compare by value,
///   arrays and objects are never strictly equal to anything.
/// - `deep_eq`: structural equality. Arrays compare element by element in
///   order, objects compare by key set regardless of entry order.
/// - `canonical_cmp`: a total order over all variants, used only for
///   deterministic sorting.
///

/// Scalar-only equality. `NaN` is not equal to itself; `-0.0` equals `0.0`.
#[must_use]
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        _ => false,
    }
}

/// Structural equality across the whole tree.
///
/// Object entry order is ignored; array element order is not.
#[must_use]
pub fn deep_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_eq(x, y))
        }
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| right.get(k).is_some_and(|w| deep_eq(v, w)))
        }
        _ => strict_eq(left, right),
    }
}

/// Every element of `left` occurs in `right`, under strict equality.
///
/// Duplicates are not counted; `[]` is a subset of everything.
#[must_use]
pub fn is_subset_of(left: &[Value], right: &[Value]) -> bool {
    left.iter()
        .all(|item| right.iter().any(|other| strict_eq(item, other)))
}

/// Every element of `right` occurs in `left`, under strict equality.
#[must_use]
pub fn is_superset_of(left: &[Value], right: &[Value]) -> bool {
    is_subset_of(right, left)
}

// Cross-variant rank for the canonical order.
const fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::Text(_) => 3,
        Value::List(_) => 4,
        Value::Map(_) => 5,
    }
}

/// Total deterministic order over values.
///
/// Variants order by rank (null < bool < number < string < array < object),
/// then within a variant by natural order. Numbers use IEEE-754 total
/// ordering so `NaN` sorts after every finite number instead of poisoning
/// the sort.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => cmp_lists(a, b),
        (Value::Map(a), Value::Map(b)) => cmp_maps(a, b),
        _ => rank(left).cmp(&rank(right)),
    }
}

// Lexicographic, shorter-is-less on a common prefix.
fn cmp_lists(left: &[Value], right: &[Value]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        let ord = canonical_cmp(a, b);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

// Entry-wise in stored order: key first, then value.
fn cmp_maps(left: &[(String, Value)], right: &[(String, Value)]) -> Ordering {
    for ((ka, va), (kb, vb)) in left.iter().zip(right) {
        let ord = ka.cmp(kb);
        if ord != Ordering::Equal {
            return ord;
        }
        let ord = canonical_cmp(va, vb);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}
