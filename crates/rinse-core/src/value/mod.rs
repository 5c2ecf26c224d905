mod compare;
mod json;


use std::cmp::Ordering;

// re-exports
pub use compare::{canonical_cmp, deep_eq, is_subset_of, is_superset_of, strict_eq};

///
/// Value
///
/// The schema-less record model. Records, operands, and query documents are
/// all built from this one closed variant.
///
/// Null → a present field holding an explicit null. Absence of a field is a
/// resolver-level concept ([`crate::path::Resolved::Absent`]), never a value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// All numbers share one representation; comparison semantics follow
    /// IEEE-754 doubles (NaN never equals itself, -0.0 equals 0.0).
    Number(f64),
    Text(String),
    /// Ordered sequence. Element order is significant for equality and
    /// prefix/suffix filters.
    List(Vec<Self>),
    /// Object entries in insertion order. Query compilation iterates entries
    /// in this order; keys are expected to be unique.
    Map(Vec<(String, Self)>),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from a list literal.
    ///
    /// Intended for tests and inline construction.
    pub fn from_slice<T>(items: &[T]) -> Self
    where
        T: Into<Self> + Clone,
    {
        Self::List(items.iter().cloned().map(Into::into).collect())
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::Map` from owned key/value entries, preserving order.
    pub fn from_entries<K, V>(entries: Vec<(K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        match self {
            Self::List(_) | Self::Map(_) => false,
            _ => true,
        }
    }

    /// Stable variant label used in error messages.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::List(_) => "array",
            Self::Map(_) => "object",
        }
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self { Some(*b) } else { None }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_entries(&self) -> Option<&[(String, Self)]> {
        if let Self::Map(entries) = self {
            Some(entries.as_slice())
        } else {
            None
        }
    }

    /// Look up a top-level key of a `Map` value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_entries()?
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    ///
    /// EMPTY / LENGTH
    ///

    /// Null, `""`, `[]`, and `{}` count as empty; every other value does not.
    #[must_use]
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::List(xs) => xs.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Length for the sized variants: character count for text, element
    /// count for arrays. `None` for everything else.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            Self::List(xs) => Some(xs.len()),
            _ => None,
        }
    }

    ///
    /// COMPARISON
    ///

    /// Total deterministic comparator used by sort surfaces.
    #[must_use]
    pub fn canonical_cmp(left: &Self, right: &Self) -> Ordering {
        compare::canonical_cmp(left, right)
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool   => Bool,
    f32    => Number,
    f64    => Number,
    i8     => Number,
    i16    => Number,
    i32    => Number,
    u8     => Number,
    u16    => Number,
    u32    => Number,
    &str   => Text,
    String => Text,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}
