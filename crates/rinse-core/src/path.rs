use crate::value::Value;

///
/// Resolved
///
/// Outcome of walking a dotted path through a record. Absence is kept
/// distinct from an explicit null so existence filters can tell the two
/// apart.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolved<'a> {
    Present(&'a Value),
    Absent,
}

impl<'a> Resolved<'a> {
    #[must_use]
    pub const fn value(self) -> Option<&'a Value> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Walk `path` through `record`, one dot-separated segment at a time.
///
/// Each segment indexes into the current value: object values look the
/// segment up as a key, array values accept a non-negative decimal index.
/// Any failed step (missing key, out-of-range index, scalar in the middle)
/// resolves the whole path to `Absent`; it is never an error.
///
/// Keys containing literal dots cannot be addressed; the path grammar has
/// no escape syntax.
#[must_use]
pub fn resolve<'a>(record: &'a Value, path: &str) -> Resolved<'a> {
    let mut current = record;
    for segment in path.split('.') {
        let next = match current {
            Value::Map(_) => current.get(segment),
            Value::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Resolved::Absent,
        }
    }
    Resolved::Present(current)
}
