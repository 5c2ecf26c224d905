use crate::{
    diag::Diagnostics,
    path::resolve,
    query::Predicate,
    value::Value,
};
use std::collections::HashSet;

// Below this many ids a linear probe beats building a hash set.
const SMALL_ID_LOOKUP: usize = 10;

/// True when the record satisfies every predicate in the conjunction.
pub fn matches(record: &Value, predicates: &[Predicate], diag: &mut Diagnostics) -> bool {
    predicates.iter().all(|p| eval(record, p, diag))
}

fn eval(record: &Value, predicate: &Predicate, diag: &mut Diagnostics) -> bool {
    match predicate {
        Predicate::Filter { path, op, operand } => {
            let resolved = resolve(record, path);
            op.apply(resolved.value(), operand, path, diag)
        }
        Predicate::Any(branches) => branches.iter().any(|b| matches(record, b, diag)),
        Predicate::All(branches) => branches.iter().all(|b| matches(record, b, diag)),
    }
}

/// Linear scan returning every matching record in collection order.
pub fn find<'a>(
    records: &'a [Value],
    predicates: &[Predicate],
    diag: &mut Diagnostics,
) -> Vec<&'a Value> {
    records
        .iter()
        .filter(|record| matches(record, predicates, diag))
        .collect()
}

/// First matching record, stopping the scan at the first hit.
pub fn find_one<'a>(
    records: &'a [Value],
    predicates: &[Predicate],
    diag: &mut Diagnostics,
) -> Option<&'a Value> {
    records
        .iter()
        .find(|record| matches(record, predicates, diag))
}

/// Record whose identity field equals `id`.
#[must_use]
pub fn find_by_id<'a>(records: &'a [Value], id_key: &str, id: &str) -> Option<&'a Value> {
    records
        .iter()
        .find(|record| record_id(record, id_key) == Some(id))
}

/// Records whose identity field is one of `ids`, in collection order.
///
/// Identity fields are text; records with a missing or non-text identity
/// never match. The scan stops once every distinct id has been seen.
#[must_use]
pub fn find_by_ids<'a>(records: &'a [Value], id_key: &str, ids: &[&str]) -> Vec<&'a Value> {
    if ids.is_empty() {
        return Vec::new();
    }

    if ids.len() <= SMALL_ID_LOOKUP {
        let mut distinct: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            if !distinct.contains(id) {
                distinct.push(id);
            }
        }
        collect_with_ids(records, id_key, distinct.len(), |id| {
            distinct.contains(&id)
        })
    } else {
        let wanted: HashSet<&str> = ids.iter().copied().collect();
        collect_with_ids(records, id_key, wanted.len(), |id| wanted.contains(id))
    }
}

fn collect_with_ids<'a>(
    records: &'a [Value],
    id_key: &str,
    distinct: usize,
    wanted: impl Fn(&str) -> bool,
) -> Vec<&'a Value> {
    let mut found = Vec::new();
    for record in records {
        if record_id(record, id_key).is_some_and(&wanted) {
            found.push(record);
            if found.len() == distinct {
                break;
            }
        }
    }

    found
}

fn record_id<'a>(record: &'a Value, id_key: &str) -> Option<&'a str> {
    record.get(id_key)?.as_text()
}
