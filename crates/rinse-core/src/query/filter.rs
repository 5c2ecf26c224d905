use crate::{
    diag::{Diagnostics, Warning},
    value::{Value, deep_eq, is_subset_of, is_superset_of, strict_eq},
};

///
/// FilterOp
///
/// The closed set of named filter operators. Every operator is total over
/// (resolved value, operand): type mismatches degrade to a non-match, with
/// a [`Warning`] where the mismatch likely signals caller error.
///
/// Negated operators come in two flavours. Most are pure negations of
/// their twin, so an absent field satisfies them. The negated numeric
/// comparisons ($isNotGreaterThan and friends) are NOT pure negations:
/// they still require a numeric value, so both twins are false on a
/// non-number.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterOp {
    Is,
    IsNot,
    IsBetween,
    IsNotBetween,
    Equals,
    DoesNotEqual,
    IsIn,
    IsNotIn,
    IsSubsetOf,
    IsSupersetOf,
    IsOneOf,
    IsNotOneOf,
    Matches,
    DoesNotMatch,
    IsGreaterThan,
    IsLessThan,
    IsGreaterThanOrEqualTo,
    IsLessThanOrEqualTo,
    IsNotGreaterThan,
    IsNotLessThan,
    IsNotGreaterThanOrEqualTo,
    IsNotLessThanOrEqualTo,
    Contains,
    ContainsAll,
    ContainsSome,
    DoesNotContain,
    StartsWith,
    EndsWith,
    DoesNotStartWith,
    DoesNotEndWith,
    IsLongerThan,
    IsShorterThan,
    IsNotLongerThan,
    IsNotShorterThan,
    Exists,
    IsEmpty,
    DoesNotExist,
    IsNotEmpty,
}

impl FilterOp {
    pub const ALL: [Self; 38] = [
        Self::Is,
        Self::IsNot,
        Self::IsBetween,
        Self::IsNotBetween,
        Self::Equals,
        Self::DoesNotEqual,
        Self::IsIn,
        Self::IsNotIn,
        Self::IsSubsetOf,
        Self::IsSupersetOf,
        Self::IsOneOf,
        Self::IsNotOneOf,
        Self::Matches,
        Self::DoesNotMatch,
        Self::IsGreaterThan,
        Self::IsLessThan,
        Self::IsGreaterThanOrEqualTo,
        Self::IsLessThanOrEqualTo,
        Self::IsNotGreaterThan,
        Self::IsNotLessThan,
        Self::IsNotGreaterThanOrEqualTo,
        Self::IsNotLessThanOrEqualTo,
        Self::Contains,
        Self::ContainsAll,
        Self::ContainsSome,
        Self::DoesNotContain,
        Self::StartsWith,
        Self::EndsWith,
        Self::DoesNotStartWith,
        Self::DoesNotEndWith,
        Self::IsLongerThan,
        Self::IsShorterThan,
        Self::IsNotLongerThan,
        Self::IsNotShorterThan,
        Self::Exists,
        Self::IsEmpty,
        Self::DoesNotExist,
        Self::IsNotEmpty,
    ];

    /// Dollar-prefixed name as written in query documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Is => "$is",
            Self::IsNot => "$isNot",
            Self::IsBetween => "$isBetween",
            Self::IsNotBetween => "$isNotBetween",
            Self::Equals => "$equals",
            Self::DoesNotEqual => "$doesNotEqual",
            Self::IsIn => "$isIn",
            Self::IsNotIn => "$isNotIn",
            Self::IsSubsetOf => "$isSubsetOf",
            Self::IsSupersetOf => "$isSupersetOf",
            Self::IsOneOf => "$isOneOf",
            Self::IsNotOneOf => "$isNotOneOf",
            Self::Matches => "$matches",
            Self::DoesNotMatch => "$doesNotMatch",
            Self::IsGreaterThan => "$isGreaterThan",
            Self::IsLessThan => "$isLessThan",
            Self::IsGreaterThanOrEqualTo => "$isGreaterThanOrEqualTo",
            Self::IsLessThanOrEqualTo => "$isLessThanOrEqualTo",
            Self::IsNotGreaterThan => "$isNotGreaterThan",
            Self::IsNotLessThan => "$isNotLessThan",
            Self::IsNotGreaterThanOrEqualTo => "$isNotGreaterThanOrEqualTo",
            Self::IsNotLessThanOrEqualTo => "$isNotLessThanOrEqualTo",
            Self::Contains => "$contains",
            Self::ContainsAll => "$containsAll",
            Self::ContainsSome => "$containsSome",
            Self::DoesNotContain => "$doesNotContain",
            Self::StartsWith => "$startsWith",
            Self::EndsWith => "$endsWith",
            Self::DoesNotStartWith => "$doesNotStartWith",
            Self::DoesNotEndWith => "$doesNotEndWith",
            Self::IsLongerThan => "$isLongerThan",
            Self::IsShorterThan => "$isShorterThan",
            Self::IsNotLongerThan => "$isNotLongerThan",
            Self::IsNotShorterThan => "$isNotShorterThan",
            Self::Exists => "$exists",
            Self::IsEmpty => "$isEmpty",
            Self::DoesNotExist => "$doesNotExist",
            Self::IsNotEmpty => "$isNotEmpty",
        }
    }

    /// Look an operator up by its dollar-prefixed name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Apply the operator to a resolved field value.
    ///
    /// `resolved` is `None` when the path did not resolve; a present null
    /// arrives as `Some(&Value::Null)`.
    pub fn apply(
        self,
        resolved: Option<&Value>,
        operand: &Value,
        path: &str,
        diag: &mut Diagnostics,
    ) -> bool {
        match self {
            Self::Matches => resolved.is_some_and(|v| strict_eq(v, operand)),
            Self::DoesNotMatch => !Self::Matches.apply(resolved, operand, path, diag),

            Self::Is | Self::Equals => resolved.is_some_and(|v| deep_eq(v, operand)),
            Self::IsNot | Self::DoesNotEqual => {
                !Self::Equals.apply(resolved, operand, path, diag)
            }

            Self::IsGreaterThan => numeric(resolved, operand, path, self, diag, |v, b| v > b),
            Self::IsLessThan => numeric(resolved, operand, path, self, diag, |v, b| v < b),
            Self::IsGreaterThanOrEqualTo => {
                numeric(resolved, operand, path, self, diag, |v, b| v >= b)
            }
            Self::IsLessThanOrEqualTo => {
                numeric(resolved, operand, path, self, diag, |v, b| v <= b)
            }
            // not-greater means at-most, still numeric-only
            Self::IsNotGreaterThan => numeric(resolved, operand, path, self, diag, |v, b| v <= b),
            Self::IsNotLessThan => numeric(resolved, operand, path, self, diag, |v, b| v >= b),
            Self::IsNotGreaterThanOrEqualTo => {
                numeric(resolved, operand, path, self, diag, |v, b| v < b)
            }
            Self::IsNotLessThanOrEqualTo => {
                numeric(resolved, operand, path, self, diag, |v, b| v > b)
            }

            Self::IsBetween => between(resolved, operand, path, diag),
            Self::IsNotBetween => !between(resolved, operand, path, diag),

            Self::IsOneOf => one_of(resolved, operand, path, self, diag),
            Self::IsNotOneOf => !one_of(resolved, operand, path, self, diag),

            Self::IsIn => is_in(resolved, operand, path, self, diag),
            Self::IsNotIn => !is_in(resolved, operand, path, self, diag),

            Self::IsSubsetOf => set_relation(resolved, operand, path, self, diag, is_subset_of),
            Self::IsSupersetOf => set_relation(resolved, operand, path, self, diag, is_superset_of),

            Self::Contains => contains(resolved, operand),
            Self::DoesNotContain => does_not_contain(resolved, operand),
            Self::ContainsAll => contains_by(resolved, operand, path, self, diag, true),
            Self::ContainsSome => contains_by(resolved, operand, path, self, diag, false),

            Self::StartsWith => starts_with(resolved, operand),
            Self::DoesNotStartWith => !starts_with(resolved, operand),
            Self::EndsWith => ends_with(resolved, operand),
            Self::DoesNotEndWith => !ends_with(resolved, operand),

            Self::IsLongerThan => length_cmp(resolved, operand, path, self, diag, |l, b| l > b),
            Self::IsShorterThan => length_cmp(resolved, operand, path, self, diag, |l, b| l < b),
            Self::IsNotLongerThan => {
                !Self::IsLongerThan.apply(resolved, operand, path, diag)
            }
            Self::IsNotShorterThan => {
                !Self::IsShorterThan.apply(resolved, operand, path, diag)
            }

            Self::Exists => exists(resolved, operand),
            Self::DoesNotExist => match operand.as_bool() {
                Some(want) => exists(resolved, &Value::Bool(!want)),
                None => !exists(resolved, operand),
            },
            Self::IsEmpty => is_empty(resolved, operand),
            Self::IsNotEmpty => !is_empty(resolved, operand),
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

///
/// Operator bodies
///

fn numeric(
    resolved: Option<&Value>,
    operand: &Value,
    path: &str,
    filter: FilterOp,
    diag: &mut Diagnostics,
    test: impl Fn(f64, f64) -> bool,
) -> bool {
    let Some(bound) = operand.as_number() else {
        diag.warn(Warning::MalformedOperand {
            path: path.to_string(),
            filter: filter.name(),
            expected: "a number",
        });
        return false;
    };

    match resolved.and_then(Value::as_number) {
        Some(v) => test(v, bound),
        None => {
            diag.warn(Warning::NumericComparisonOnNonNumber {
                path: path.to_string(),
                filter: filter.name(),
            });
            false
        }
    }
}

fn between(resolved: Option<&Value>, operand: &Value, path: &str, diag: &mut Diagnostics) -> bool {
    let bounds = operand
        .as_list()
        .filter(|xs| xs.len() == 2)
        .and_then(|xs| Some((xs[0].as_number()?, xs[1].as_number()?)));

    let Some((min, max)) = bounds else {
        diag.warn(Warning::MalformedOperand {
            path: path.to_string(),
            filter: FilterOp::IsBetween.name(),
            expected: "a [min, max] pair of numbers",
        });
        return false;
    };

    resolved
        .and_then(Value::as_number)
        .is_some_and(|v| v >= min && v <= max)
}

fn one_of(
    resolved: Option<&Value>,
    operand: &Value,
    path: &str,
    filter: FilterOp,
    diag: &mut Diagnostics,
) -> bool {
    let Some(options) = operand.as_list() else {
        diag.warn(Warning::MalformedOperand {
            path: path.to_string(),
            filter: filter.name(),
            expected: "an array of candidate values",
        });
        return false;
    };

    // membership against an array value is ambiguous, flag it
    if resolved.is_some_and(|v| v.as_list().is_some()) {
        diag.warn(Warning::OneOfAppliedToList {
            path: path.to_string(),
            filter: filter.name(),
        });
    }

    resolved.is_some_and(|v| options.iter().any(|option| deep_eq(v, option)))
}

fn is_in(
    resolved: Option<&Value>,
    operand: &Value,
    path: &str,
    filter: FilterOp,
    diag: &mut Diagnostics,
) -> bool {
    let Some(options) = operand.as_list() else {
        diag.warn(Warning::MalformedOperand {
            path: path.to_string(),
            filter: filter.name(),
            expected: "an array of candidate values",
        });
        return false;
    };

    match resolved {
        Some(Value::List(items)) => is_subset_of(items, options),
        Some(v) => options.iter().any(|option| strict_eq(v, option)),
        None => false,
    }
}

fn set_relation(
    resolved: Option<&Value>,
    operand: &Value,
    path: &str,
    filter: FilterOp,
    diag: &mut Diagnostics,
    relation: impl Fn(&[Value], &[Value]) -> bool,
) -> bool {
    let Some(options) = operand.as_list() else {
        diag.warn(Warning::MalformedOperand {
            path: path.to_string(),
            filter: filter.name(),
            expected: "an array of values",
        });
        return false;
    };

    match resolved {
        Some(Value::Text(_)) => {
            diag.warn(Warning::SetComparisonOnScalar {
                path: path.to_string(),
                filter: filter.name(),
            });
            false
        }
        Some(Value::List(items)) => relation(items, options),
        _ => false,
    }
}

fn contains(resolved: Option<&Value>, operand: &Value) -> bool {
    match (resolved, operand) {
        (Some(Value::Text(haystack)), Value::Text(needle)) => haystack.contains(needle),
        (Some(Value::List(items)), Value::List(needles)) => needles
            .iter()
            .all(|needle| items.iter().any(|item| strict_eq(item, needle))),
        (Some(Value::List(items)), needle) => items.iter().any(|item| strict_eq(item, needle)),
        _ => false,
    }
}

// For an array operand this is none-of, not not-all-of, so it is not the
// pure negation of `contains`.
fn does_not_contain(resolved: Option<&Value>, operand: &Value) -> bool {
    match (resolved, operand) {
        (Some(Value::Text(haystack)), Value::Text(needle)) => !haystack.contains(needle),
        (Some(Value::List(items)), Value::List(needles)) => !needles
            .iter()
            .any(|needle| items.iter().any(|item| strict_eq(item, needle))),
        (Some(Value::List(items)), needle) => !items.iter().any(|item| strict_eq(item, needle)),
        _ => true,
    }
}

fn contains_by(
    resolved: Option<&Value>,
    operand: &Value,
    path: &str,
    filter: FilterOp,
    diag: &mut Diagnostics,
    require_all: bool,
) -> bool {
    let Some(needles) = operand.as_list() else {
        diag.warn(Warning::MalformedOperand {
            path: path.to_string(),
            filter: filter.name(),
            expected: "an array of values",
        });
        return false;
    };

    let Some(items) = resolved.and_then(Value::as_list) else {
        return false;
    };

    let hit = |needle: &Value| items.iter().any(|item| deep_eq(item, needle));
    if require_all {
        needles.iter().all(hit)
    } else {
        needles.iter().any(hit)
    }
}

// Prefix and suffix share one shape dispatch: string-on-string, array
// operand against the leading/trailing slice, scalar operand against the
// first/last element.
fn starts_with(resolved: Option<&Value>, operand: &Value) -> bool {
    match (resolved, operand) {
        (Some(Value::Text(text)), Value::Text(prefix)) => text.starts_with(prefix.as_str()),
        (Some(Value::List(items)), Value::List(prefix)) => {
            prefix.len() <= items.len()
                && prefix.iter().zip(items).all(|(a, b)| deep_eq(a, b))
        }
        (
            Some(Value::List(items)),
            Value::Bool(_) | Value::Number(_) | Value::Text(_),
        ) => items.first().is_some_and(|first| deep_eq(first, operand)),
        _ => false,
    }
}

fn ends_with(resolved: Option<&Value>, operand: &Value) -> bool {
    match (resolved, operand) {
        (Some(Value::Text(text)), Value::Text(suffix)) => text.ends_with(suffix.as_str()),
        (Some(Value::List(items)), Value::List(suffix)) => {
            suffix.len() <= items.len()
                && suffix
                    .iter()
                    .zip(&items[items.len() - suffix.len()..])
                    .all(|(a, b)| deep_eq(a, b))
        }
        (
            Some(Value::List(items)),
            Value::Bool(_) | Value::Number(_) | Value::Text(_),
        ) => items.last().is_some_and(|last| deep_eq(last, operand)),
        _ => false,
    }
}

#[allow(clippy::cast_precision_loss)]
fn length_cmp(
    resolved: Option<&Value>,
    operand: &Value,
    path: &str,
    filter: FilterOp,
    diag: &mut Diagnostics,
    test: impl Fn(f64, f64) -> bool,
) -> bool {
    let Some(bound) = operand.as_number() else {
        diag.warn(Warning::MalformedOperand {
            path: path.to_string(),
            filter: filter.name(),
            expected: "a number",
        });
        return false;
    };

    resolved
        .and_then(Value::length)
        .is_some_and(|len| test(len as f64, bound))
}

fn exists(resolved: Option<&Value>, operand: &Value) -> bool {
    let present = resolved.is_some_and(|v| !v.is_null());
    match operand.as_bool() {
        Some(want) => present == want,
        // non-boolean operand falls back to plain existence
        None => present,
    }
}

fn is_empty(resolved: Option<&Value>, operand: &Value) -> bool {
    let empty = resolved.is_none_or(Value::is_empty_value);
    match operand.as_bool() {
        Some(want) => empty == want,
        None => false,
    }
}
