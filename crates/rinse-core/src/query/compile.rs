use crate::{error::QueryError, query::FilterOp, value::Value};

///
/// Predicate
///
/// Compiled form of a query document. A document compiles to a list of
/// predicates joined by implicit conjunction; the logical combinators
/// compile to branch groups, each branch itself a conjunction.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// A single filter clause against one resolved path.
    Filter {
        path: String,
        op: FilterOp,
        operand: Value,
    },
    /// `$or`: at least one branch must hold. Empty means no branch can
    /// hold, so it matches nothing.
    Any(Vec<Vec<Predicate>>),
    /// `$and`: every branch must hold. Empty is vacuously true.
    All(Vec<Vec<Predicate>>),
}

const KEY_OR: &str = "$or";
const KEY_AND: &str = "$and";
const FILTER_MARKER: char = '$';

/// Compile a query document into its conjunction of predicates.
///
/// # Errors
///
/// Fails when the document (or a combinator element) is not an object,
/// when a `$or`/`$and` operand is not an array, or when a filter clause
/// names an unknown operator.
pub fn compile(document: &Value) -> Result<Vec<Predicate>, QueryError> {
    let entries = document
        .as_entries()
        .ok_or(QueryError::DocumentNotObject {
            found: document.variant_name(),
        })?;

    compile_level(entries, "")
}

fn compile_level(
    entries: &[(String, Value)],
    prefix: &str,
) -> Result<Vec<Predicate>, QueryError> {
    let mut predicates = Vec::new();
    let or_operand = lookup(entries, KEY_OR);
    let and_operand = lookup(entries, KEY_AND);

    // A lone combinator replaces the whole level; sibling field clauses
    // only participate when $or and $and appear together.
    match (or_operand, and_operand) {
        (Some(or), Some(and)) => {
            predicates.push(compile_group(or, KEY_OR)?);
            predicates.push(compile_group(and, KEY_AND)?);
        }
        (Some(or), None) => return Ok(vec![compile_group(or, KEY_OR)?]),
        (None, Some(and)) => return Ok(vec![compile_group(and, KEY_AND)?]),
        (None, None) => {}
    }

    for (key, value) in entries {
        if key == KEY_OR || key == KEY_AND {
            continue;
        }

        let base = key.strip_suffix(FILTER_MARKER);

        // plain key holding a nested object: recurse with a longer prefix
        if base.is_none() {
            if let Value::Map(nested) = value {
                let nested_prefix = join(prefix, key);
                predicates.extend(compile_level(nested, &nested_prefix)?);
                continue;
            }
        }

        match base {
            // implicit equality clause
            None => predicates.push(Predicate::Filter {
                path: join(prefix, key),
                op: FilterOp::Equals,
                operand: value.clone(),
            }),
            // filter-marker clause: each entry is one operator application
            Some(base) => {
                let path = join(prefix, base);
                if let Some(clauses) = value.as_entries() {
                    for (filter_key, operand) in clauses {
                        let op = FilterOp::parse(filter_key).ok_or_else(|| {
                            QueryError::UnknownFilter {
                                name: filter_key.clone(),
                            }
                        })?;
                        predicates.push(Predicate::Filter {
                            path: path.clone(),
                            op,
                            operand: operand.clone(),
                        });
                    }
                }
                // a non-object operand has no clauses to apply
            }
        }
    }

    Ok(predicates)
}

// Combinator elements are full documents in their own right; paths inside
// them resolve from the record root, not from the enclosing prefix.
fn compile_group(operand: &Value, key: &'static str) -> Result<Predicate, QueryError> {
    let conditions = operand
        .as_list()
        .ok_or(QueryError::LogicalOperandNotArray { key })?;

    let branches = conditions
        .iter()
        .map(compile)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(if key == KEY_OR {
        Predicate::Any(branches)
    } else {
        Predicate::All(branches)
    })
}

fn lookup<'a>(entries: &'a [(String, Value)], key: &str) -> Option<&'a Value> {
    entries.iter().find_map(|(k, v)| (k == key).then_some(v))
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
