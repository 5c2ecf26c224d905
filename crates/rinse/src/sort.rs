///
/// SortSpec
///
/// Key-based ordering for [`crate::Collection::sort`]. Records order by the
/// canonical comparator on the value at `key`; records missing the key sort
/// first in ascending order. Sorting is stable, so equal keys keep their
/// collection order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortSpec {
    pub key: String,
    pub direction: Direction,
}

impl SortSpec {
    #[must_use]
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Ascending,
        }
    }

    #[must_use]
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Descending,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Ascending,
    Descending,
}
